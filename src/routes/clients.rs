use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::dto::clients::ClientsQuery;
use crate::models::auth::Shell;
use crate::repository::MemoryRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, clients as clients_service};

#[derive(Deserialize)]
struct ClientsQueryParams {
    q: Option<String>,
    page: Option<usize>,
}

#[get("/clients")]
pub async fn show_clients(
    params: web::Query<ClientsQueryParams>,
    shell: Shell,
    repo: web::Data<MemoryRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = params.into_inner();
    let query = ClientsQuery {
        search: params.q,
        page: params.page,
    };

    match clients_service::load_clients(repo.get_ref(), query) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &shell, "clients");
            context.insert("clients", &data.clients);
            if let Some(search_query) = &data.search_query {
                context.insert("search_query", search_query);
            }
            render_template(&tera, "clients/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list clients: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/clients/{client_id}")]
pub async fn show_client(
    client_id: web::Path<String>,
    shell: Shell,
    repo: web::Data<MemoryRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match clients_service::load_client(repo.get_ref(), &client_id) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &shell, "clients");
            context.insert("client", &data.client);
            context.insert("projects", &data.projects);
            context.insert("communications", &data.communications);
            context.insert("documents", &data.documents);
            context.insert("tickets", &data.tickets);
            render_template(&tera, "clients/show.html", &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Client not found.").send();
            redirect("/clients")
        }
        Err(err) => {
            log::error!("Failed to load client {client_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
