//! Ticket queue, ticket detail and the ticket workflow.
//!
//! Workflow steps load the ticket, apply the change on the domain record and
//! hand the whole record back to the repository.

use chrono::{DateTime, Utc};

use crate::domain::ticket::{StatusChange, Ticket, TicketStatus};
use crate::domain::types::{AuthorName, EntityId};
use crate::domain::user::User;
use crate::dto::tickets::{TicketPageData, TicketRow, TicketsPageData, TicketsQuery};
use crate::forms::tickets::{NoteForm, NotePayload, StatusForm, StatusPayload};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{ClientReader, TicketListQuery, TicketReader, TicketWriter};
use crate::services::{ServiceError, ServiceResult, ensure};

pub fn load_tickets<R>(
    repo: &R,
    query: TicketsQuery,
    now: DateTime<Utc>,
) -> ServiceResult<TicketsPageData>
where
    R: TicketReader + ?Sized,
{
    let status = match query.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(label) => Some(
            TicketStatus::parse(label)
                .ok_or_else(|| ServiceError::Form(format!("Unknown status {label}")))?,
        ),
        None => None,
    };

    let page = query.page.unwrap_or(1);
    let mut list_query = TicketListQuery::new()
        .archived(query.archived)
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(status) = status {
        list_query = list_query.status(status);
    }

    let (total, tickets) = repo.list_tickets(list_query)?;
    let rows = tickets
        .into_iter()
        .map(|ticket| TicketRow {
            sla_breached: ticket.is_sla_breached(now),
            ticket,
        })
        .collect();

    Ok(TicketsPageData {
        tickets: Paginated::new(rows, page, total, DEFAULT_ITEMS_PER_PAGE),
        archived: query.archived,
        status,
    })
}

/// The record exactly as the data source holds it.
pub fn get_ticket<R>(repo: &R, ticket_id: &str) -> ServiceResult<Ticket>
where
    R: TicketReader + ?Sized,
{
    let ticket_id = EntityId::new(ticket_id).map_err(|_| ServiceError::NotFound)?;
    repo.get_ticket_by_id(&ticket_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn load_ticket<R>(
    repo: &R,
    user: &User,
    ticket_id: &str,
    now: DateTime<Utc>,
) -> ServiceResult<TicketPageData>
where
    R: TicketReader + ClientReader + ?Sized,
{
    let ticket = get_ticket(repo, ticket_id)?;
    let client = repo.get_client_by_id(&ticket.client_id)?;

    let can_edit = user.role.can_edit_tickets() && !ticket.is_archived;
    let next_statuses = if can_edit {
        TicketStatus::ALL
            .into_iter()
            .filter(|status| *status != ticket.status)
            .collect()
    } else {
        Vec::new()
    };

    Ok(TicketPageData {
        sla_breached: ticket.is_sla_breached(now),
        can_archive: user.role.can_archive_tickets()
            && !ticket.is_archived
            && ticket.status.is_final(),
        can_edit,
        next_statuses,
        client,
        ticket,
    })
}

fn author_of(user: &User) -> ServiceResult<AuthorName> {
    Ok(AuthorName::new(user.name.as_str())?)
}

/// Moves the ticket to the submitted status, appending a timeline event.
pub fn change_status<R>(
    repo: &R,
    user: &User,
    ticket_id: &str,
    form: StatusForm,
    now: DateTime<Utc>,
) -> ServiceResult<Ticket>
where
    R: TicketReader + TicketWriter + ?Sized,
{
    ensure(user.role.can_edit_tickets())?;

    let payload = StatusPayload::try_from(form)?;
    let mut ticket = get_ticket(repo, ticket_id)?;

    let event = ticket.change_status(StatusChange {
        to: payload.to,
        author: author_of(user)?,
        comment: payload.comment,
        at: now,
    })?;
    log::info!("Ticket {} {}", ticket_id, event.content);

    let saved = repo.save_ticket(&ticket).map_err(|err| {
        log::error!("Failed to save ticket {ticket_id}: {err}");
        err
    })?;
    Ok(saved)
}

/// Records an internal note on the ticket.
pub fn add_note<R>(
    repo: &R,
    user: &User,
    ticket_id: &str,
    form: NoteForm,
    now: DateTime<Utc>,
) -> ServiceResult<Ticket>
where
    R: TicketReader + TicketWriter + ?Sized,
{
    ensure(user.role.can_edit_tickets())?;

    let payload = NotePayload::try_from(form)?;
    let mut ticket = get_ticket(repo, ticket_id)?;
    ticket.add_note(author_of(user)?, payload.note, now)?;

    Ok(repo.save_ticket(&ticket)?)
}

/// Moves a resolved or closed ticket to the archive.
pub fn archive_ticket<R>(repo: &R, user: &User, ticket_id: &str) -> ServiceResult<Ticket>
where
    R: TicketReader + TicketWriter + ?Sized,
{
    ensure(user.role.can_archive_tickets())?;

    let mut ticket = get_ticket(repo, ticket_id)?;
    ticket.archive()?;

    Ok(repo.save_ticket(&ticket)?)
}
