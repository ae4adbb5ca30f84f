//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::client::Client;
use crate::domain::communication::Communication;
use crate::domain::document::Document;
use crate::domain::lead::SaleLead;
use crate::domain::project::Project;
use crate::domain::ticket::Ticket;
use crate::domain::types::{EntityId, UserEmail};
use crate::domain::user::User;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ClientListQuery, ClientReader, CommunicationListQuery, CommunicationReader, DocumentListQuery,
    DocumentReader, LeadReader, ProjectListQuery, ProjectReader, ProjectWriter, TicketListQuery,
    TicketReader, TicketWriter, UserReader,
};

mock! {
    pub Repository {}

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: &EntityId) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>>;
    }

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: &EntityId) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
    }

    impl ProjectReader for Repository {
        fn get_project_by_id(&self, id: &EntityId) -> RepositoryResult<Option<Project>>;
        fn list_projects(&self, query: ProjectListQuery) -> RepositoryResult<Vec<Project>>;
    }

    impl ProjectWriter for Repository {
        fn save_project(&self, project: &Project) -> RepositoryResult<Project>;
    }

    impl LeadReader for Repository {
        fn list_leads(&self) -> RepositoryResult<Vec<SaleLead>>;
    }

    impl CommunicationReader for Repository {
        fn list_communications(
            &self,
            query: CommunicationListQuery,
        ) -> RepositoryResult<Vec<Communication>>;
    }

    impl DocumentReader for Repository {
        fn list_documents(&self, query: DocumentListQuery) -> RepositoryResult<Vec<Document>>;
    }

    impl TicketReader for Repository {
        fn get_ticket_by_id(&self, id: &EntityId) -> RepositoryResult<Option<Ticket>>;
        fn list_tickets(&self, query: TicketListQuery) -> RepositoryResult<(usize, Vec<Ticket>)>;
    }

    impl TicketWriter for Repository {
        fn save_ticket(&self, ticket: &Ticket) -> RepositoryResult<Ticket>;
    }
}
