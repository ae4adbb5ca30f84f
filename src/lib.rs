//! CRM desk: session-gated application shell, modal dialogs and the domain
//! records they present.
//!
//! With only the `data` feature the crate exposes the domain contract, the
//! shell and dialog state machines, the repository and the services. The
//! `server` feature adds the Actix-web application on top.

#[cfg(feature = "data")]
pub mod dialog;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod services;
#[cfg(feature = "data")]
pub mod shell;

#[cfg(feature = "server")]
mod server {
    use std::sync::Arc;

    use actix_cors::Cors;
    use actix_files::Files;
    use actix_identity::IdentityMiddleware;
    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::middleware::{SessionGate, SharedUserReader};
    use crate::models::config::ServerConfig;
    use crate::repository::MemoryRepository;
    use crate::routes::api::api_v1_ticket;
    use crate::routes::clients::{show_client, show_clients};
    use crate::routes::main::{login, logout, show_dashboard, show_entry, toggle_sidebar};
    use crate::routes::projects::{show_projects, update_progress};
    use crate::routes::records::{show_communications, show_documents};
    use crate::routes::sales::show_sales;
    use crate::routes::tickets::{
        add_note, archive_ticket, change_status, show_ticket, show_tickets,
    };

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        let repo = MemoryRepository::load(&server_config.seed_path).map_err(|e| {
            std::io::Error::other(format!("Failed to load {}: {e}", server_config.seed_path))
        })?;
        let users: SharedUserReader = Arc::new(repo.clone());

        // Keys and stores for identity, sessions, and flash messages.
        let secret_key = Key::try_from(server_config.secret.as_bytes())
            .map_err(|e| std::io::Error::other(format!("Invalid secret: {e}")))?;

        let message_store = CookieMessageStore::builder(secret_key.clone()).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        let bind_address = (server_config.address.clone(), server_config.port);
        log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

        HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(message_framework.clone())
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                        .cookie_secure(server_config.cookie_secure)
                        .cookie_domain(
                            (!server_config.domain.is_empty())
                                .then(|| server_config.domain.clone()),
                        )
                        .build(),
                )
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(Files::new("/assets", "./assets"))
                .service(login)
                .service(
                    web::scope("/api")
                        .wrap(SessionGate::new(Arc::clone(&users)))
                        .service(api_v1_ticket),
                )
                .service(
                    web::scope("")
                        .wrap(SessionGate::new(Arc::clone(&users)))
                        .service(show_entry)
                        .service(logout)
                        .service(show_dashboard)
                        .service(toggle_sidebar)
                        .service(show_clients)
                        .service(show_client)
                        .service(show_projects)
                        .service(update_progress)
                        .service(show_sales)
                        .service(show_communications)
                        .service(show_documents)
                        .service(show_tickets)
                        .service(show_ticket)
                        .service(change_status)
                        .service(add_note)
                        .service(archive_ticket),
                )
                .app_data(web::Data::new(tera.clone()))
                .app_data(web::Data::new(repo.clone()))
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}

#[cfg(feature = "server")]
pub use server::run;
