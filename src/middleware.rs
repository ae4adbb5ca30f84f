//! Session gate in front of every page of the desk.
//!
//! Each request runs a freshly mounted [`ShellGuard`] against the identity
//! cookie. A redirect requested by the guard becomes `303 See Other`; a
//! protected page gets the resolved [`User`] and [`ShellLayout`] in the
//! request extensions.

use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::sync::Arc;

use actix_identity::IdentityExt;
use actix_session::SessionExt;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header;
use actix_web::{Error, HttpMessage, HttpResponse};

use crate::domain::user::User;
use crate::repository::UserReader;
use crate::services::auth::resolve_session_user;
use crate::shell::nav::NavRail;
use crate::shell::{ENTRY_ROUTE, Navigator, ShellGuard, ShellOutcome};

/// Session key holding the collapse flag of the navigation rail.
pub const NAV_COLLAPSED_KEY: &str = "nav_collapsed";

pub type SharedUserReader = Arc<dyn UserReader + Send + Sync>;

/// Navigator that turns the guard's navigation request into a `Location`.
#[derive(Debug, Default)]
struct HttpRedirect {
    location: Option<String>,
}

impl Navigator for HttpRedirect {
    fn navigate(&mut self, route: &str) {
        self.location = Some(route.to_string());
    }
}

#[derive(Clone)]
pub struct SessionGate {
    users: SharedUserReader,
}

impl SessionGate {
    pub fn new(users: SharedUserReader) -> Self {
        Self { users }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = SessionGateMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGateMiddleware {
            service,
            users: Arc::clone(&self.users),
        }))
    }
}

pub struct SessionGateMiddleware<S> {
    service: S,
    users: SharedUserReader,
}

impl<S> SessionGateMiddleware<S> {
    fn current_user(&self, req: &ServiceRequest) -> Option<User> {
        let id = req.get_identity().ok()?.id().ok()?;
        match resolve_session_user(self.users.as_ref(), &id) {
            Ok(user) => {
                if user.is_none() {
                    log::warn!("Identity {id} does not match any user");
                }
                user
            }
            Err(err) => {
                log::error!("Failed to resolve session user: {err}");
                None
            }
        }
    }
}

fn stored_rail(req: &ServiceRequest) -> NavRail {
    req.get_session()
        .get::<bool>(NAV_COLLAPSED_KEY)
        .ok()
        .flatten()
        .map(NavRail::from_collapsed)
        .unwrap_or_default()
}

impl<S, B> Service<ServiceRequest> for SessionGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let session = self.current_user(&req);

        // One guard per request: the transition never leaves `Idle` here, so
        // pages only get its key and the page script runs the phases.
        let mut guard = ShellGuard::new(ENTRY_ROUTE);
        guard.mount();
        guard.set_rail(stored_rail(&req));

        let mut navigator = HttpRedirect::default();
        let route = req.path().to_string();

        match guard.evaluate(&route, &session, &mut navigator) {
            ShellOutcome::Redirecting { to } => {
                let location = navigator.location.unwrap_or(to);
                let response = HttpResponse::SeeOther()
                    .insert_header((header::LOCATION, location))
                    .finish();
                let (req, _) = req.into_parts();
                return Box::pin(async move {
                    Ok(ServiceResponse::new(req, response).map_into_right_body())
                });
            }
            ShellOutcome::Protected(layout) => {
                let mut extensions = req.extensions_mut();
                extensions.insert(layout.user.clone());
                extensions.insert(layout);
            }
            ShellOutcome::Public | ShellOutcome::Nothing => {
                if let Some(user) = session {
                    req.extensions_mut().insert(user);
                }
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}
