use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::models::auth::Shell;
use crate::repository::MemoryRepository;
use crate::routes::{base_context, render_template};
use crate::services::sales as sales_service;
use crate::services::dashboard::format_amount;

#[get("/sales")]
pub async fn show_sales(
    shell: Shell,
    repo: web::Data<MemoryRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match sales_service::load_pipeline(repo.get_ref()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &shell, "sales");
            context.insert("columns", &data.columns);
            context.insert("open_value", &format_amount(data.open_value));
            context.insert("weighted_value", &format_amount(data.weighted_value));
            render_template(&tera, "sales/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load the pipeline: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
