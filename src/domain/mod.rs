//! Domain entities shared by the shell, services and repository.
//!
//! Records are immutable by convention: callers replace whole records through
//! the repository instead of mutating shared copies.

pub mod client;
pub mod communication;
pub mod consistency;
pub mod document;
pub mod lead;
pub mod project;
pub mod ticket;
pub mod types;
pub mod user;
