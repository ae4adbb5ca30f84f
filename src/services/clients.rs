//! Client list and client detail pages.

use crate::domain::types::EntityId;
use crate::dto::clients::{ClientPageData, ClientsPageData, ClientsQuery};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{
    ClientListQuery, ClientReader, CommunicationListQuery, CommunicationReader, DocumentListQuery,
    DocumentReader, ProjectListQuery, ProjectReader, TicketListQuery, TicketReader,
};
use crate::services::{ServiceError, ServiceResult};

/// Loads one page of clients, optionally filtered by a search term.
pub fn load_clients<R>(repo: &R, query: ClientsQuery) -> ServiceResult<ClientsPageData>
where
    R: ClientReader + ?Sized,
{
    let page = query.page.unwrap_or(1);
    let mut list_query = ClientListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);

    let search_query = query
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    if let Some(term) = &search_query {
        list_query = list_query.search(term.clone());
    }

    let (total, clients) = repo.list_clients(list_query)?;

    Ok(ClientsPageData {
        clients: Paginated::new(clients, page, total, DEFAULT_ITEMS_PER_PAGE),
        search_query,
    })
}

/// Loads a client with everything attached to it.
pub fn load_client<R>(repo: &R, client_id: &str) -> ServiceResult<ClientPageData>
where
    R: ClientReader
        + ProjectReader
        + CommunicationReader
        + DocumentReader
        + TicketReader
        + ?Sized,
{
    let client_id = EntityId::new(client_id).map_err(|_| ServiceError::NotFound)?;
    let client = repo
        .get_client_by_id(&client_id)?
        .ok_or(ServiceError::NotFound)?;

    let projects = repo.list_projects(ProjectListQuery::new().client(client_id.clone()))?;
    let communications =
        repo.list_communications(CommunicationListQuery::new().client(client_id.clone()))?;
    let documents = repo.list_documents(DocumentListQuery::new().client(client_id.clone()))?;
    let (_, tickets) = repo.list_tickets(TicketListQuery::new().client(client_id))?;

    Ok(ClientPageData {
        client,
        projects,
        communications,
        documents,
        tickets,
    })
}
