use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::domain::project::ProjectStatus;
use crate::forms::projects::ProgressForm;
use crate::models::auth::{AuthenticatedUser, Shell};
use crate::repository::MemoryRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, projects as projects_service};

#[derive(Deserialize)]
struct ProjectsQueryParams {
    status: Option<ProjectStatus>,
}

#[get("/projects")]
pub async fn show_projects(
    params: web::Query<ProjectsQueryParams>,
    shell: Shell,
    repo: web::Data<MemoryRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let status = params.into_inner().status;
    match projects_service::load_projects(repo.get_ref(), &shell.user, status) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &shell, "projects");
            context.insert("projects", &data.projects);
            context.insert("can_edit", &data.can_edit);
            context.insert("status", &status);
            render_template(&tera, "projects/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list projects: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/projects/{project_id}/progress")]
pub async fn update_progress(
    project_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<MemoryRepository>,
    web::Form(form): web::Form<ProgressForm>,
) -> impl Responder {
    match projects_service::update_progress(repo.get_ref(), &user, &project_id, form) {
        Ok(row) => {
            if row.is_over_budget {
                FlashMessage::warning(format!("{} is over budget.", row.project.name)).send();
            } else {
                FlashMessage::success("Progress updated.").send();
            }
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient rights.").send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Project not found.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to update project {project_id}: {err}");
            FlashMessage::error("Failed to update the project.").send();
        }
    }
    redirect("/projects")
}
