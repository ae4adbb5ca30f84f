use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{EntityId, Percent};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ProjectStatus {
    Planning,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "On Hold")]
    OnHold,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    pub fn is_active(self) -> bool {
        matches!(self, ProjectStatus::Planning | ProjectStatus::InProgress)
    }
}

/// A unit of delivery work for a client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    pub client_id: EntityId,
    /// Copy of the client's name taken at write time.
    pub client_name: String,
    pub status: ProjectStatus,
    pub progress: Percent,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: f64,
    pub spent: f64,
    pub manager: String,
    pub description: String,
}

impl Project {
    pub fn is_over_budget(&self) -> bool {
        self.spent > self.budget
    }

    /// Share of the budget consumed so far, `0.0` for an empty budget.
    pub fn budget_consumption(&self) -> f64 {
        if self.budget <= 0.0 {
            0.0
        } else {
            self.spent / self.budget
        }
    }

    pub fn remaining_budget(&self) -> f64 {
        self.budget - self.spent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(budget: f64, spent: f64) -> Project {
        Project {
            id: EntityId::new("p-1").unwrap(),
            name: "Migration".into(),
            client_id: EntityId::new("c-1").unwrap(),
            client_name: "Acme".into(),
            status: ProjectStatus::InProgress,
            progress: Percent::new(40).unwrap(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            budget,
            spent,
            manager: "Paul".into(),
            description: String::new(),
        }
    }

    #[test]
    fn over_budget_is_strict() {
        assert!(!project(1000.0, 1000.0).is_over_budget());
        assert!(project(1000.0, 1000.5).is_over_budget());
    }

    #[test]
    fn consumption_handles_zero_budget() {
        assert_eq!(project(0.0, 10.0).budget_consumption(), 0.0);
        assert_eq!(project(200.0, 50.0).budget_consumption(), 0.25);
    }

    #[test]
    fn status_uses_display_labels_on_the_wire() {
        let json = serde_json::to_string(&ProjectStatus::OnHold).unwrap();
        assert_eq!(json, "\"On Hold\"");
    }
}
