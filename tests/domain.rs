use crm_desk::domain::document::DocumentCategory;
use crm_desk::domain::lead::LeadStage;
use crm_desk::domain::ticket::{Department, Ticket, TicketStatus};
use serde_json::{Value, json};

fn ticket_json() -> Value {
    json!({
        "id": "t-1",
        "clientId": "c-1",
        "clientName": "Acme",
        "subject": "Printer jam",
        "description": "Paper stuck in tray 2",
        "priority": "Medium",
        "status": "Pending Client",
        "type": "Incident",
        "channel": "On Site",
        "department": "BO",
        "assignedTo": "Lina",
        "createdAt": "2024-03-04T09:00:00Z",
        "slaDeadline": "2024-03-05T09:00:00Z",
        "internalNotes": [],
        "timeline": [],
        "isArchived": false
    })
}

#[test]
fn ticket_wire_shape_survives_a_round_trip() {
    let ticket: Ticket = serde_json::from_value(ticket_json()).unwrap();
    assert_eq!(ticket.status, TicketStatus::PendingClient);
    assert_eq!(ticket.department, Department::BackOffice);
    assert!(ticket.resolved_at.is_none());

    let back = serde_json::to_value(&ticket).unwrap();
    assert_eq!(back, ticket_json());
    assert!(back.get("resolvedAt").is_none());
    assert!(back.get("satisfaction").is_none());
}

#[test]
fn satisfaction_outside_one_to_five_is_rejected() {
    let mut value = ticket_json();
    value["satisfaction"] = json!(6);
    assert!(serde_json::from_value::<Ticket>(value).is_err());
}

#[test]
fn empty_identifier_is_rejected() {
    let mut value = ticket_json();
    value["id"] = json!("");
    assert!(serde_json::from_value::<Ticket>(value).is_err());
}

#[test]
fn bilingual_labels_share_a_value() {
    let stage: LeadStage = serde_json::from_value(json!("Perdu")).unwrap();
    assert_eq!(stage, LeadStage::ClosedLost);
    assert_eq!(serde_json::to_value(stage).unwrap(), json!("Closed Lost"));

    assert_eq!(
        DocumentCategory::parse("Facture"),
        Some(DocumentCategory::Invoice)
    );
    assert_eq!(DocumentCategory::parse("Memo"), None);
}
