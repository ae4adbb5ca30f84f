//! DTOs for the ticket list and detail templates.

use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::ticket::{Ticket, TicketStatus};
use crate::pagination::Paginated;

/// Query parameters accepted by the ticket list.
#[derive(Debug, Default)]
pub struct TicketsQuery {
    pub status: Option<String>,
    pub archived: bool,
    pub page: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TicketRow {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub sla_breached: bool,
}

pub struct TicketsPageData {
    pub tickets: Paginated<TicketRow>,
    pub archived: bool,
    pub status: Option<TicketStatus>,
}

#[derive(Debug)]
pub struct TicketPageData {
    pub ticket: Ticket,
    pub client: Option<Client>,
    pub sla_breached: bool,
    pub can_edit: bool,
    pub can_archive: bool,
    /// Statuses the ticket can be moved to.
    pub next_statuses: Vec<TicketStatus>,
}
