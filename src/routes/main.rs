use actix_identity::Identity;
use actix_session::Session;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Utc;
use tera::Tera;

use crate::forms::auth::LoginForm;
use crate::forms::layout::SidebarForm;
use crate::middleware::NAV_COLLAPSED_KEY;
use crate::models::auth::{AuthenticatedUser, Shell};
use crate::repository::MemoryRepository;
use crate::routes::{base_context, public_context, redirect, render_template, safe_return_path};
use crate::services::{ServiceError, auth as auth_service, dashboard as dashboard_service};

const HOME_ROUTE: &str = "/dashboard";

/// Entry route: the sign-in surface. It is served to everyone; a signed-in
/// user also gets a link back to the desk.
#[get("/")]
pub async fn show_entry(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = public_context(&flash_messages);
    if let Some(AuthenticatedUser(user)) = user {
        context.insert("signed_in_as", &user.name);
        context.insert("home_route", HOME_ROUTE);
    }
    render_template(&tera, "main/entry.html", &context)
}

#[post("/login")]
pub async fn login(
    request: HttpRequest,
    repo: web::Data<MemoryRepository>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    match auth_service::sign_in(repo.get_ref(), form) {
        Ok(user) => match Identity::login(&request.extensions(), user.id.to_string()) {
            Ok(_) => redirect(HOME_ROUTE),
            Err(err) => {
                log::error!("Failed to attach identity: {err}");
                HttpResponse::InternalServerError().finish()
            }
        },
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("No account matches this email.").send();
            redirect("/")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to sign in: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/logout")]
pub async fn logout(user: Identity) -> impl Responder {
    user.logout();
    redirect("/")
}

#[get("/dashboard")]
pub async fn show_dashboard(
    shell: Shell,
    repo: web::Data<MemoryRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match dashboard_service::load_dashboard(repo.get_ref(), Utc::now()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &shell, "dashboard");
            context.insert("stats", &data.stats);
            context.insert("recent_tickets", &data.recent_tickets);
            context.insert("breached_tickets", &data.breached_tickets);
            context.insert("pipeline", &data.pipeline);
            render_template(&tera, "main/dashboard.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load dashboard: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Flips the collapse flag of the navigation rail for this session.
#[post("/layout/sidebar")]
pub async fn toggle_sidebar(
    shell: Shell,
    session: Session,
    web::Form(form): web::Form<SidebarForm>,
) -> impl Responder {
    let rail = shell.rail.toggle();
    if let Err(err) = session.insert(NAV_COLLAPSED_KEY, rail.is_collapsed()) {
        log::error!("Failed to store the sidebar state: {err}");
    }

    redirect(safe_return_path(&form.next).unwrap_or(HOME_ROUTE))
}
