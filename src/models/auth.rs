//! Extractors for what the session gate resolved for the request.

use std::future::{Ready, ready};
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::error::ErrorUnauthorized;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::Serialize;

use crate::domain::user::User;
use crate::shell::ShellLayout;

/// The signed-in user attached by [`crate::middleware::SessionGate`].
#[derive(Clone, Debug, Serialize)]
pub struct AuthenticatedUser(pub User);

impl Deref for AuthenticatedUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let user = req.extensions().get::<User>().cloned();
        ready(user.map(AuthenticatedUser).ok_or_else(|| ErrorUnauthorized("Not signed in")))
    }
}

/// Layout state of a protected page.
#[derive(Clone, Debug)]
pub struct Shell(pub ShellLayout);

impl Deref for Shell {
    type Target = ShellLayout;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Shell {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let layout = req.extensions().get::<ShellLayout>().cloned();
        ready(layout.map(Shell).ok_or_else(|| ErrorUnauthorized("Not signed in")))
    }
}
