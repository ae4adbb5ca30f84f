//! Access to the records supplied by the external data source.
//!
//! Reader and writer traits are split per aggregate so services can ask for
//! exactly the capabilities they need (`R: ClientReader + TicketReader`), and
//! tests can substitute [`mock::MockRepository`].

use crate::domain::client::{Client, ClientStatus};
use crate::domain::communication::Communication;
use crate::domain::document::{Document, DocumentCategory};
use crate::domain::lead::SaleLead;
use crate::domain::project::{Project, ProjectStatus};
use crate::domain::ticket::{Ticket, TicketStatus};
use crate::domain::types::{EntityId, UserEmail};
use crate::domain::user::User;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod memory;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use memory::{Dataset, MemoryRepository};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientListQuery {
    pub search: Option<String>,
    pub status: Option<ClientStatus>,
    pub pagination: Option<Pagination>,
}

impl ClientListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn status(mut self, status: ClientStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectListQuery {
    pub client_id: Option<EntityId>,
    pub status: Option<ProjectStatus>,
}

impl ProjectListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client(mut self, client_id: EntityId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommunicationListQuery {
    pub client_id: Option<EntityId>,
}

impl CommunicationListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client(mut self, client_id: EntityId) -> Self {
        self.client_id = Some(client_id);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentListQuery {
    pub client_id: Option<EntityId>,
    pub project_id: Option<EntityId>,
    pub category: Option<DocumentCategory>,
}

impl DocumentListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client(mut self, client_id: EntityId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn category(mut self, category: DocumentCategory) -> Self {
        self.category = Some(category);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketListQuery {
    pub client_id: Option<EntityId>,
    pub status: Option<TicketStatus>,
    /// `false` lists the working queue, `true` the archive.
    pub archived: bool,
    pub pagination: Option<Pagination>,
}

impl TicketListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client(mut self, client_id: EntityId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = archived;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait UserReader {
    fn get_user_by_id(&self, id: &EntityId) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>>;
}

pub trait ClientReader {
    fn get_client_by_id(&self, id: &EntityId) -> RepositoryResult<Option<Client>>;
    /// Returns the total number of matches and the requested page.
    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
}

pub trait ProjectReader {
    fn get_project_by_id(&self, id: &EntityId) -> RepositoryResult<Option<Project>>;
    fn list_projects(&self, query: ProjectListQuery) -> RepositoryResult<Vec<Project>>;
}

pub trait ProjectWriter {
    /// Replaces the stored project and refreshes denormalized fields.
    fn save_project(&self, project: &Project) -> RepositoryResult<Project>;
}

pub trait LeadReader {
    fn list_leads(&self) -> RepositoryResult<Vec<SaleLead>>;
}

pub trait CommunicationReader {
    /// Newest first, optionally restricted to one client.
    fn list_communications(
        &self,
        query: CommunicationListQuery,
    ) -> RepositoryResult<Vec<Communication>>;
}

pub trait DocumentReader {
    fn list_documents(&self, query: DocumentListQuery) -> RepositoryResult<Vec<Document>>;
}

pub trait TicketReader {
    fn get_ticket_by_id(&self, id: &EntityId) -> RepositoryResult<Option<Ticket>>;
    fn list_tickets(&self, query: TicketListQuery) -> RepositoryResult<(usize, Vec<Ticket>)>;
}

pub trait TicketWriter {
    /// Replaces the stored ticket with `ticket`.
    fn save_ticket(&self, ticket: &Ticket) -> RepositoryResult<Ticket>;
}
