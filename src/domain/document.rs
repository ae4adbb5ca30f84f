use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::EntityId;

/// Filing category; the French labels are accepted as aliases.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DocumentCategory {
    #[serde(alias = "Contrat")]
    Contract,
    #[serde(alias = "Facture")]
    Invoice,
    #[serde(alias = "Devis")]
    Quote,
    #[serde(alias = "Rapport")]
    Report,
    #[serde(alias = "Autre")]
    Other,
}

impl DocumentCategory {
    pub const ALL: [DocumentCategory; 5] = [
        DocumentCategory::Contract,
        DocumentCategory::Invoice,
        DocumentCategory::Quote,
        DocumentCategory::Report,
        DocumentCategory::Other,
    ];

    /// Parses either label set, as used by query strings.
    pub fn parse(value: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(value.trim().to_string())).ok()
    }
}

/// A filed artifact, optionally attached to a client or a project.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: EntityId,
    pub name: String,
    pub category: DocumentCategory,
    pub version: String,
    pub upload_date: NaiveDate,
    pub size: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<EntityId>,
}
