//! Communication log and document register.

use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::domain::document::DocumentCategory;
use crate::models::auth::Shell;
use crate::repository::MemoryRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{
    ServiceError, communications as communications_service, documents as documents_service,
};

#[derive(Deserialize)]
struct CommunicationsQueryParams {
    client: Option<String>,
}

#[get("/communications")]
pub async fn show_communications(
    params: web::Query<CommunicationsQueryParams>,
    shell: Shell,
    repo: web::Data<MemoryRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match communications_service::load_communications(repo.get_ref(), params.client.as_deref()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &shell, "communications");
            context.insert("communications", &data.communications);
            render_template(&tera, "communications/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list communications: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[derive(Deserialize)]
struct DocumentsQueryParams {
    category: Option<String>,
}

#[get("/documents")]
pub async fn show_documents(
    params: web::Query<DocumentsQueryParams>,
    shell: Shell,
    repo: web::Data<MemoryRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match documents_service::load_documents(repo.get_ref(), params.category.as_deref()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &shell, "documents");
            context.insert("documents", &data.documents);
            context.insert("category", &data.category);
            context.insert("categories", &DocumentCategory::ALL);
            render_template(&tera, "documents/index.html", &context)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/documents")
        }
        Err(err) => {
            log::error!("Failed to list documents: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
