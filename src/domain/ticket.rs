//! Support cases and their append-only timeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::{AuthorName, EntityId, NoteText, Satisfaction};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TicketPriority {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TicketStatus {
    New,
    Qualified,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Pending Client")]
    PendingClient,
    Escalated,
    Resolved,
    Closed,
    Reopened,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 8] = [
        TicketStatus::New,
        TicketStatus::Qualified,
        TicketStatus::InProgress,
        TicketStatus::PendingClient,
        TicketStatus::Escalated,
        TicketStatus::Resolved,
        TicketStatus::Closed,
        TicketStatus::Reopened,
    ];

    /// Work on the ticket is finished.
    pub fn is_final(self) -> bool {
        matches!(self, TicketStatus::Resolved | TicketStatus::Closed)
    }

    pub fn label(self) -> &'static str {
        match self {
            TicketStatus::New => "New",
            TicketStatus::Qualified => "Qualified",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::PendingClient => "Pending Client",
            TicketStatus::Escalated => "Escalated",
            TicketStatus::Resolved => "Resolved",
            TicketStatus::Closed => "Closed",
            TicketStatus::Reopened => "Reopened",
        }
    }

    /// Parses a wire label such as `"In Progress"`.
    pub fn parse(value: &str) -> Option<Self> {
        TicketStatus::ALL
            .into_iter()
            .find(|status| status.label() == value.trim())
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TicketType {
    Incident,
    Request,
    Complaint,
    Information,
    Technical,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TicketChannel {
    Email,
    Phone,
    Portal,
    #[serde(rename = "On Site")]
    OnSite,
}

/// Team owning the ticket: back office or technical service.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Department {
    #[serde(rename = "BO")]
    BackOffice,
    #[serde(rename = "Serv Tech")]
    TechnicalService,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TimelineEventType {
    StatusChange,
    Note,
    Communication,
    Escalation,
}

/// One immutable entry in a ticket's history.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TicketTimelineEvent {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub kind: TimelineEventType,
    pub content: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_from: Option<TicketStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_to: Option<TicketStatus>,
}

/// A support or service case.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: EntityId,
    pub client_id: EntityId,
    pub client_name: String,
    pub subject: String,
    pub description: String,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    #[serde(rename = "type")]
    pub kind: TicketType,
    pub channel: TicketChannel,
    pub department: Department,
    pub assigned_to: String,
    pub created_at: DateTime<Utc>,
    pub sla_deadline: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualification: Option<String>,
    #[serde(default)]
    pub internal_notes: Vec<String>,
    #[serde(default)]
    pub timeline: Vec<TicketTimelineEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    /// Minutes between creation and resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satisfaction: Option<Satisfaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_comment: Option<String>,
    #[serde(default)]
    pub is_archived: bool,
}

/// Reasons a ticket workflow step is refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TicketError {
    #[error("ticket is archived")]
    Archived,
    #[error("ticket is already {0:?}")]
    SameStatus(TicketStatus),
    #[error("only resolved or closed tickets can be archived")]
    NotFinished,
}

/// A requested status change with its audit details.
#[derive(Clone, Debug)]
pub struct StatusChange {
    pub to: TicketStatus,
    pub author: AuthorName,
    pub comment: Option<NoteText>,
    pub at: DateTime<Utc>,
}

impl Ticket {
    pub fn is_open(&self) -> bool {
        !self.status.is_final() && !self.is_archived
    }

    pub fn is_sla_breached(&self, now: DateTime<Utc>) -> bool {
        self.is_open() && now > self.sla_deadline
    }

    /// Moves the ticket to a new status and appends the matching
    /// `status_change` event whose `statusFrom`/`statusTo` bracket the change.
    pub fn change_status(
        &mut self,
        change: StatusChange,
    ) -> Result<&TicketTimelineEvent, TicketError> {
        if self.is_archived {
            return Err(TicketError::Archived);
        }
        if self.status == change.to {
            return Err(TicketError::SameStatus(change.to));
        }

        let from = self.status;
        self.status = change.to;

        match change.to {
            TicketStatus::Resolved => {
                self.resolved_at = Some(change.at);
                self.resolution_time = Some((change.at - self.created_at).num_minutes());
                if let Some(comment) = &change.comment {
                    self.resolution_summary = Some(comment.as_str().to_string());
                }
            }
            TicketStatus::Reopened => {
                self.resolved_at = None;
                self.resolution_time = None;
                self.resolution_summary = None;
            }
            _ => {}
        }

        let content = match &change.comment {
            Some(comment) => comment.as_str().to_string(),
            None => format!("Status changed from {} to {}", from.label(), change.to.label()),
        };

        Ok(self.push_event(TicketTimelineEvent {
            id: EntityId::generate(),
            kind: TimelineEventType::StatusChange,
            content,
            author: change.author.into_inner(),
            timestamp: change.at,
            status_from: Some(from),
            status_to: Some(change.to),
        }))
    }

    /// Records an internal note and mirrors it on the timeline.
    pub fn add_note(
        &mut self,
        author: AuthorName,
        note: NoteText,
        at: DateTime<Utc>,
    ) -> Result<&TicketTimelineEvent, TicketError> {
        if self.is_archived {
            return Err(TicketError::Archived);
        }
        self.internal_notes.push(note.as_str().to_string());
        Ok(self.push_event(TicketTimelineEvent {
            id: EntityId::generate(),
            kind: TimelineEventType::Note,
            content: note.into_inner(),
            author: author.into_inner(),
            timestamp: at,
            status_from: None,
            status_to: None,
        }))
    }

    /// Moves a finished ticket out of the working queues.
    pub fn archive(&mut self) -> Result<(), TicketError> {
        if self.is_archived {
            return Err(TicketError::Archived);
        }
        if !self.status.is_final() {
            return Err(TicketError::NotFinished);
        }
        self.is_archived = true;
        Ok(())
    }

    fn push_event(&mut self, event: TicketTimelineEvent) -> &TicketTimelineEvent {
        self.timeline.push(event);
        &self.timeline[self.timeline.len() - 1]
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    pub(crate) fn sample_ticket() -> Ticket {
        let created_at = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
        Ticket {
            id: EntityId::new("t-1").unwrap(),
            client_id: EntityId::new("c-1").unwrap(),
            client_name: "Acme".into(),
            subject: "Printer offline".into(),
            description: "The office printer stopped answering.".into(),
            priority: TicketPriority::High,
            status: TicketStatus::New,
            kind: TicketType::Incident,
            channel: TicketChannel::Phone,
            department: Department::TechnicalService,
            assigned_to: "Lina".into(),
            created_at,
            sla_deadline: created_at + Duration::hours(8),
            qualification: None,
            internal_notes: Vec::new(),
            timeline: Vec::new(),
            resolved_at: None,
            resolution_time: None,
            resolution_summary: None,
            satisfaction: None,
            final_comment: None,
            is_archived: false,
        }
    }

    fn change(to: TicketStatus, at: DateTime<Utc>) -> StatusChange {
        StatusChange {
            to,
            author: AuthorName::new("Lina").unwrap(),
            comment: None,
            at,
        }
    }

    #[test]
    fn status_change_appends_bracketing_event() {
        let mut ticket = sample_ticket();
        let at = ticket.created_at + Duration::minutes(30);

        let event = ticket
            .change_status(change(TicketStatus::InProgress, at))
            .unwrap()
            .clone();

        assert_eq!(ticket.status, TicketStatus::InProgress);
        assert_eq!(ticket.timeline.len(), 1);
        assert_eq!(event.kind, TimelineEventType::StatusChange);
        assert_eq!(event.status_from, Some(TicketStatus::New));
        assert_eq!(event.status_to, Some(TicketStatus::InProgress));
        assert_eq!(event.content, "Status changed from New to In Progress");
    }

    #[test]
    fn timeline_keeps_insertion_order() {
        let mut ticket = sample_ticket();
        let t0 = ticket.created_at;
        ticket
            .change_status(change(TicketStatus::Qualified, t0 + Duration::minutes(1)))
            .unwrap();
        ticket
            .add_note(
                AuthorName::new("Lina").unwrap(),
                NoteText::new("Asked for model number").unwrap(),
                t0 + Duration::minutes(2),
            )
            .unwrap();
        ticket
            .change_status(change(TicketStatus::Escalated, t0 + Duration::minutes(3)))
            .unwrap();

        let kinds: Vec<_> = ticket.timeline.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TimelineEventType::StatusChange,
                TimelineEventType::Note,
                TimelineEventType::StatusChange
            ]
        );
        assert_eq!(ticket.internal_notes, vec!["Asked for model number"]);
    }

    #[test]
    fn escalation_is_recorded_as_a_status_change() {
        let mut ticket = sample_ticket();
        let at = ticket.created_at + Duration::minutes(5);

        let event = ticket
            .change_status(change(TicketStatus::Escalated, at))
            .unwrap()
            .clone();

        assert_eq!(event.kind, TimelineEventType::StatusChange);
        assert_eq!(event.status_from, Some(TicketStatus::New));
        assert_eq!(event.status_to, Some(TicketStatus::Escalated));
        assert_eq!(ticket.timeline.len(), 1);
    }

    #[test]
    fn resolving_records_resolution_time_and_reopen_clears_it() {
        let mut ticket = sample_ticket();
        let resolved_at = ticket.created_at + Duration::minutes(95);
        ticket
            .change_status(StatusChange {
                comment: Some(NoteText::new("Replaced the network card").unwrap()),
                ..change(TicketStatus::Resolved, resolved_at)
            })
            .unwrap();

        assert_eq!(ticket.resolved_at, Some(resolved_at));
        assert_eq!(ticket.resolution_time, Some(95));
        assert_eq!(
            ticket.resolution_summary.as_deref(),
            Some("Replaced the network card")
        );

        ticket
            .change_status(change(
                TicketStatus::Reopened,
                resolved_at + Duration::hours(1),
            ))
            .unwrap();
        assert_eq!(ticket.resolved_at, None);
        assert_eq!(ticket.resolution_time, None);
        assert_eq!(ticket.resolution_summary, None);
    }

    #[test]
    fn same_status_is_refused_without_event() {
        let mut ticket = sample_ticket();
        let result = ticket.change_status(change(TicketStatus::New, ticket.created_at));
        assert_eq!(result.err(), Some(TicketError::SameStatus(TicketStatus::New)));
        assert!(ticket.timeline.is_empty());
    }

    #[test]
    fn archive_requires_finished_ticket() {
        let mut ticket = sample_ticket();
        assert_eq!(ticket.archive(), Err(TicketError::NotFinished));

        ticket
            .change_status(change(TicketStatus::Closed, ticket.created_at))
            .unwrap();
        assert_eq!(ticket.archive(), Ok(()));
        assert!(!ticket.is_open());
        assert_eq!(ticket.archive(), Err(TicketError::Archived));

        let result = ticket.change_status(change(TicketStatus::Reopened, ticket.created_at));
        assert_eq!(result.err(), Some(TicketError::Archived));
    }

    #[test]
    fn sla_breach_only_for_open_tickets() {
        let mut ticket = sample_ticket();
        let late = ticket.sla_deadline + Duration::minutes(1);
        assert!(ticket.is_sla_breached(late));
        ticket.change_status(change(TicketStatus::Resolved, late)).unwrap();
        assert!(!ticket.is_sla_breached(late));
    }

    #[test]
    fn status_labels_round_trip_through_parse() {
        for status in TicketStatus::ALL {
            assert_eq!(TicketStatus::parse(status.label()), Some(status));
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.label()));
        }
        assert_eq!(TicketStatus::parse("Unknown"), None);
    }
}
