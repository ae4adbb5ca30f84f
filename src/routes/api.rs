use actix_web::{HttpResponse, Responder, get, web};

use crate::repository::MemoryRepository;
use crate::services::{ServiceError, tickets as tickets_service};

/// The ticket in its wire shape.
#[get("/v1/tickets/{ticket_id}")]
pub async fn api_v1_ticket(
    ticket_id: web::Path<String>,
    repo: web::Data<MemoryRepository>,
) -> impl Responder {
    match tickets_service::get_ticket(repo.get_ref(), &ticket_id) {
        Ok(ticket) => HttpResponse::Ok().json(ticket),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to load ticket {ticket_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
