use serde::{Deserialize, Serialize};

use crate::domain::types::{EntityId, UserEmail};

/// Organizational role of an authenticated actor.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    Sales,
    Support,
    Viewer,
}

impl UserRole {
    /// Whether the role may change ticket status or add internal notes.
    pub fn can_edit_tickets(self) -> bool {
        !matches!(self, UserRole::Viewer | UserRole::Sales)
    }

    /// Whether the role may move finished tickets to the archive.
    pub fn can_archive_tickets(self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Manager)
    }

    /// Whether the role may update project progress and spending.
    pub fn can_edit_projects(self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Manager)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub email: UserEmail,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    /// Initials shown in the top bar when no avatar is set.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}
