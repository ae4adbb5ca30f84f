//! Ticket queue, ticket detail with its status and note dialogs, and the
//! workflow actions posted from them.
//!
//! Dialogs are server-driven: `?dialog=status|note` opens one, the close
//! affordance links back to the bare detail page.

use std::rc::Rc;

use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tera::Tera;

use crate::dialog::environment::{Document, Overflow};
use crate::dialog::{Dialog, DialogFooter, DialogProps, DialogView};
use crate::domain::ticket::TicketStatus;
use crate::dto::tickets::{TicketPageData, TicketsQuery};
use crate::forms::tickets::{NoteForm, StatusForm};
use crate::models::auth::{AuthenticatedUser, Shell};
use crate::repository::MemoryRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, ServiceResult, tickets as tickets_service};

#[derive(Deserialize)]
struct TicketsQueryParams {
    status: Option<String>,
    #[serde(default)]
    archived: bool,
    page: Option<usize>,
}

#[get("/tickets")]
pub async fn show_tickets(
    params: web::Query<TicketsQueryParams>,
    shell: Shell,
    repo: web::Data<MemoryRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = params.into_inner();
    let query = TicketsQuery {
        status: params.status,
        archived: params.archived,
        page: params.page,
    };

    match tickets_service::load_tickets(repo.get_ref(), query, Utc::now()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &shell, "tickets");
            context.insert("tickets", &data.tickets);
            context.insert("archived", &data.archived);
            context.insert("status", &data.status);
            context.insert("statuses", &TicketStatus::ALL);
            render_template(&tera, "tickets/index.html", &context)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/tickets")
        }
        Err(err) => {
            log::error!("Failed to list tickets: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum TicketDialog {
    Status,
    Note,
}

#[derive(Deserialize)]
struct TicketQueryParams {
    dialog: Option<TicketDialog>,
}

/// Body of an open ticket dialog.
#[derive(Serialize)]
struct DialogContent {
    kind: TicketDialog,
    action: String,
    statuses: Vec<TicketStatus>,
    footer: DialogFooter<&'static str>,
}

/// Builds the open dialog, if any, and applies its effects to a page
/// document so the body can be rendered with the matching overflow.
fn ticket_dialog(
    kind: Option<TicketDialog>,
    data: &TicketPageData,
    document: &Rc<Document>,
) -> (Dialog, Option<DialogView<DialogContent>>) {
    let kind = kind.filter(|_| data.can_edit);
    let (title, description) = match kind {
        Some(TicketDialog::Status) => (
            "Change status",
            "The change is recorded on the ticket timeline.",
        ),
        Some(TicketDialog::Note) => ("Add internal note", "Notes are only visible to the team."),
        None => ("", ""),
    };

    // Closing is a navigation back to the bare detail page.
    let mut dialog = Dialog::new(
        DialogProps {
            is_open: kind.is_some(),
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            class_name: None,
        },
        Rc::new(|| {}),
    );
    dialog.sync(document);

    let view = kind.and_then(|kind| {
        let action = match kind {
            TicketDialog::Status => format!("/tickets/{}/status", data.ticket.id),
            TicketDialog::Note => format!("/tickets/{}/note", data.ticket.id),
        };
        dialog.view(DialogContent {
            kind,
            action,
            statuses: data.next_statuses.clone(),
            footer: DialogFooter::new(None, vec!["Cancel", "Save"]),
        })
    });

    (dialog, view)
}

#[get("/tickets/{ticket_id}")]
pub async fn show_ticket(
    ticket_id: web::Path<String>,
    params: web::Query<TicketQueryParams>,
    shell: Shell,
    repo: web::Data<MemoryRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let result =
        tickets_service::load_ticket(repo.get_ref(), &shell.user, &ticket_id, Utc::now());
    let data = match result {
        Ok(data) => data,
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Ticket not found.").send();
            return redirect("/tickets");
        }
        Err(err) => {
            log::error!("Failed to load ticket {ticket_id}: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let document = Document::new();
    let (_dialog, dialog_view) = ticket_dialog(params.dialog, &data, &document);

    let mut context = base_context(&flash_messages, &shell, "tickets");
    if document.body_overflow() == Overflow::Hidden {
        context.insert("body_class", "overflow-hidden");
    }
    context.insert("ticket", &data.ticket);
    context.insert("client", &data.client);
    context.insert("sla_breached", &data.sla_breached);
    context.insert("can_edit", &data.can_edit);
    context.insert("can_archive", &data.can_archive);
    context.insert("dialog", &dialog_view);
    context.insert("dialog_close_url", &format!("/tickets/{}", data.ticket.id));

    render_template(&tera, "tickets/show.html", &context)
}

/// Flash message and redirect for the outcome of a workflow action.
fn workflow_response<T>(ticket_id: &str, result: ServiceResult<T>, success: &str) -> HttpResponse {
    let detail = format!("/tickets/{ticket_id}");
    match result {
        Ok(_) => {
            FlashMessage::success(success).send();
            redirect(&detail)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient rights.").send();
            redirect(&detail)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Ticket not found.").send();
            redirect("/tickets")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&detail)
        }
        Err(ServiceError::Workflow(err)) => {
            FlashMessage::warning(format!("Cannot update the ticket: {err}.")).send();
            redirect(&detail)
        }
        Err(err) => {
            log::error!("Failed to update ticket {ticket_id}: {err}");
            FlashMessage::error("Failed to update the ticket.").send();
            redirect(&detail)
        }
    }
}

#[post("/tickets/{ticket_id}/status")]
pub async fn change_status(
    ticket_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<MemoryRepository>,
    web::Form(form): web::Form<StatusForm>,
) -> impl Responder {
    let result =
        tickets_service::change_status(repo.get_ref(), &user, &ticket_id, form, Utc::now());
    workflow_response(&ticket_id, result, "Status updated.")
}

#[post("/tickets/{ticket_id}/note")]
pub async fn add_note(
    ticket_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<MemoryRepository>,
    web::Form(form): web::Form<NoteForm>,
) -> impl Responder {
    let result = tickets_service::add_note(repo.get_ref(), &user, &ticket_id, form, Utc::now());
    workflow_response(&ticket_id, result, "Note added.")
}

#[post("/tickets/{ticket_id}/archive")]
pub async fn archive_ticket(
    ticket_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<MemoryRepository>,
) -> impl Responder {
    let result = tickets_service::archive_ticket(repo.get_ref(), &user, &ticket_id);
    workflow_response(&ticket_id, result, "Ticket archived.")
}
