//! Request-scoped and configuration models of the HTTP layer.

pub mod auth;
pub mod config;
