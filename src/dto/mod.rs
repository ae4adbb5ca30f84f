//! Data transfer objects shaped for templates and JSON responses.

pub mod clients;
pub mod dashboard;
pub mod projects;
pub mod records;
pub mod sales;
pub mod tickets;
