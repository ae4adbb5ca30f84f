//! Project list and progress reporting.

use crate::domain::project::ProjectStatus;
use crate::domain::types::EntityId;
use crate::domain::user::User;
use crate::dto::projects::{ProjectRow, ProjectsPageData};
use crate::forms::projects::{ProgressForm, ProgressPayload};
use crate::repository::{ProjectListQuery, ProjectReader, ProjectWriter};
use crate::services::{ServiceError, ServiceResult, ensure};

pub fn load_projects<R>(
    repo: &R,
    user: &User,
    status: Option<ProjectStatus>,
) -> ServiceResult<ProjectsPageData>
where
    R: ProjectReader + ?Sized,
{
    let mut query = ProjectListQuery::new();
    if let Some(status) = status {
        query = query.status(status);
    }

    let projects = repo
        .list_projects(query)?
        .into_iter()
        .map(ProjectRow::from)
        .collect();

    Ok(ProjectsPageData {
        projects,
        can_edit: user.role.can_edit_projects(),
    })
}

/// Records new progress (and optionally spending) on a project.
///
/// Reaching 100% on an active project marks it completed.
pub fn update_progress<R>(
    repo: &R,
    user: &User,
    project_id: &str,
    form: ProgressForm,
) -> ServiceResult<ProjectRow>
where
    R: ProjectReader + ProjectWriter + ?Sized,
{
    ensure(user.role.can_edit_projects())?;

    let payload = ProgressPayload::try_from(form)?;

    let project_id = EntityId::new(project_id).map_err(|_| ServiceError::NotFound)?;
    let mut project = repo
        .get_project_by_id(&project_id)?
        .ok_or(ServiceError::NotFound)?;

    project.progress = payload.progress;
    if let Some(spent) = payload.spent {
        project.spent = spent;
    }
    if payload.progress.get() == 100 && project.status.is_active() {
        project.status = ProjectStatus::Completed;
    }

    let saved = repo.save_project(&project).map_err(|err| {
        log::error!("Failed to save project {project_id}: {err}");
        err
    })?;

    if saved.is_over_budget() {
        log::warn!("Project {} is over budget", saved.id);
    }

    Ok(ProjectRow::from(saved))
}
