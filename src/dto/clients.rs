//! DTOs shaped for the client list and detail templates.


use crate::domain::client::Client;
use crate::domain::communication::Communication;
use crate::domain::document::Document;
use crate::domain::project::Project;
use crate::domain::ticket::Ticket;
use crate::pagination::Paginated;

/// Query parameters accepted by the client list.
#[derive(Debug, Default)]
pub struct ClientsQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
}

pub struct ClientsPageData {
    pub clients: Paginated<Client>,
    /// Search query echoed back to the template when present.
    pub search_query: Option<String>,
}

/// Aggregated data required to render the client details page.
#[derive(Debug)]
pub struct ClientPageData {
    pub client: Client,
    pub projects: Vec<Project>,
    pub communications: Vec<Communication>,
    pub documents: Vec<Document>,
    pub tickets: Vec<Ticket>,
}
