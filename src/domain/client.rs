use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::EntityId;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ClientType {
    Prospect,
    Client,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ClientStatus {
    Active,
    Inactive,
    Pending,
}

/// A company or contact the organization engages with.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ClientType,
    pub status: ClientStatus,
    pub contact: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub last_interaction: NaiveDate,
    /// Denormalized number of projects referencing this client; maintained
    /// by the repository on write.
    pub projects_count: u32,
}

impl Client {
    /// Case-insensitive match against name, contact and email.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        [&self.name, &self.contact, &self.email]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}
