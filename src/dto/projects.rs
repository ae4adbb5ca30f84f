use serde::Serialize;

use crate::domain::project::Project;

/// A project plus the budget figures the list displays.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectRow {
    #[serde(flatten)]
    pub project: Project,
    pub is_over_budget: bool,
    /// Whole percent of the budget consumed; may exceed 100.
    pub budget_used: u32,
}

impl From<Project> for ProjectRow {
    fn from(project: Project) -> Self {
        let budget_used = (project.budget_consumption() * 100.0).round().max(0.0) as u32;
        Self {
            is_over_budget: project.is_over_budget(),
            budget_used,
            project,
        }
    }
}

pub struct ProjectsPageData {
    pub projects: Vec<ProjectRow>,
    pub can_edit: bool,
}
