//! HTTP handlers and the helpers they share.

use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::Serialize;
use tera::{Context, Tera};

use crate::shell::ShellLayout;

pub mod api;
pub mod clients;
pub mod main;
pub mod projects;
pub mod records;
pub mod sales;
pub mod tickets;

/// Maps a flash message level to the CSS alert class used by the templates.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn alerts(flash_messages: &IncomingFlashMessages) -> Vec<(String, &'static str)> {
    flash_messages
        .iter()
        .map(|f| (f.content().to_string(), alert_level_to_str(&f.level())))
        .collect()
}

#[derive(Serialize)]
struct NavLink {
    label: &'static str,
    href: &'static str,
    icon: &'static str,
    active: bool,
}

/// Context shared by the public entry page.
pub fn public_context(flash_messages: &IncomingFlashMessages) -> Context {
    let mut context = Context::new();
    context.insert("alerts", &alerts(flash_messages));
    context.insert("current_page", "entry");
    context
}

/// Context every protected page starts from: alerts, the signed-in user and
/// the layout state of the shell.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    shell: &ShellLayout,
    current_page: &str,
) -> Context {
    let nav_items: Vec<NavLink> = shell
        .nav_items()
        .into_iter()
        .map(|(item, active)| NavLink {
            label: item.label,
            href: item.href,
            icon: item.icon,
            active,
        })
        .collect();

    let mut context = Context::new();
    context.insert("alerts", &alerts(flash_messages));
    context.insert("current_user", &shell.user);
    context.insert("user_initials", &shell.user.initials());
    context.insert("current_page", current_page);
    context.insert("current_route", &shell.route);
    context.insert("transition_key", shell.transition_key());
    context.insert("nav_collapsed", &shell.rail.is_collapsed());
    context.insert("rail_class", shell.rail_class());
    context.insert("content_offset_class", shell.content_offset_class());
    context.insert("nav_items", &nav_items);
    context.insert("body_class", "");
    context
}

/// Only same-site absolute paths are accepted as return targets.
pub fn safe_return_path(candidate: &str) -> Option<&str> {
    let candidate = candidate.trim();
    (candidate.starts_with('/') && !candidate.starts_with("//") && !candidate.contains('\\'))
        .then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_path_must_stay_on_site() {
        assert_eq!(safe_return_path("/clients?page=2"), Some("/clients?page=2"));
        assert_eq!(safe_return_path("//evil.example"), None);
        assert_eq!(safe_return_path("https://evil.example"), None);
        assert_eq!(safe_return_path("/\\evil"), None);
        assert_eq!(safe_return_path(""), None);
    }
}
