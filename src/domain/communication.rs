use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::EntityId;

/// Channel a communication went through.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CommunicationType {
    Email,
    Phone,
    Meeting,
    #[serde(rename = "SMS")]
    Sms,
    Chat,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CommunicationStatus {
    Sent,
    Received,
    Draft,
}

/// A logged interaction with a client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Communication {
    pub id: EntityId,
    pub client_id: EntityId,
    #[serde(rename = "type")]
    pub kind: CommunicationType,
    pub sender: String,
    pub recipient: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub status: CommunicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
}
