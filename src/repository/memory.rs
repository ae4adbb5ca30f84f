//! In-memory repository seeded from a JSON document.
//!
//! The seed file carries every collection in the wire shape of the domain
//! model. Derived fields are recomputed on load and after every write while
//! the write lock is held.

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::domain::communication::Communication;
use crate::domain::consistency::{self, Records};
use crate::domain::document::Document;
use crate::domain::lead::SaleLead;
use crate::domain::project::Project;
use crate::domain::ticket::Ticket;
use crate::domain::types::{EntityId, UserEmail};
use crate::domain::user::User;
use crate::pagination::page_slice;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    ClientListQuery, ClientReader, CommunicationListQuery, CommunicationReader, DocumentListQuery,
    DocumentReader, LeadReader, ProjectListQuery, ProjectReader, ProjectWriter, TicketListQuery,
    TicketReader, TicketWriter, UserReader,
};

/// Every collection the desk works with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub users: Vec<User>,
    pub clients: Vec<Client>,
    pub projects: Vec<Project>,
    pub leads: Vec<SaleLead>,
    pub communications: Vec<Communication>,
    pub documents: Vec<Document>,
    pub tickets: Vec<Ticket>,
}

impl Dataset {
    fn refresh_derived(&mut self) -> consistency::RefreshReport {
        consistency::refresh(Records {
            clients: &mut self.clients,
            projects: &mut self.projects,
            leads: &mut self.leads,
            tickets: &mut self.tickets,
        })
    }

    fn client_exists(&self, id: &EntityId) -> bool {
        self.clients.iter().any(|client| &client.id == id)
    }

    /// Rejects collections that reuse an identifier.
    fn check_unique_ids(&self) -> RepositoryResult<()> {
        fn unique<'a>(
            collection: &str,
            ids: impl Iterator<Item = &'a EntityId>,
        ) -> RepositoryResult<()> {
            let mut seen = HashSet::new();
            for id in ids {
                if !seen.insert(id) {
                    return Err(RepositoryError::ConstraintViolation(format!(
                        "duplicate {collection} id {id}"
                    )));
                }
            }
            Ok(())
        }

        unique("user", self.users.iter().map(|r| &r.id))?;
        unique("client", self.clients.iter().map(|r| &r.id))?;
        unique("project", self.projects.iter().map(|r| &r.id))?;
        unique("lead", self.leads.iter().map(|r| &r.id))?;
        unique("communication", self.communications.iter().map(|r| &r.id))?;
        unique("document", self.documents.iter().map(|r| &r.id))?;
        unique("ticket", self.tickets.iter().map(|r| &r.id))?;
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MemoryRepository {
    data: Arc<RwLock<Dataset>>,
}

impl MemoryRepository {
    /// Builds the repository, validating identifiers and repairing derived
    /// fields.
    pub fn from_dataset(mut dataset: Dataset) -> RepositoryResult<Self> {
        dataset.check_unique_ids()?;

        let report = dataset.refresh_derived();
        if !report.is_clean() {
            log::warn!(
                "Seed data had {} stale project counts and {} stale client names",
                report.counts_fixed,
                report.names_fixed
            );
        }
        for id in &report.dangling {
            log::warn!("Record {id} references an unknown client");
        }

        log::info!(
            "Loaded {} users, {} clients, {} projects, {} tickets",
            dataset.users.len(),
            dataset.clients.len(),
            dataset.projects.len(),
            dataset.tickets.len()
        );

        Ok(Self {
            data: Arc::new(RwLock::new(dataset)),
        })
    }

    pub fn from_json(json: &str) -> RepositoryResult<Self> {
        let dataset: Dataset = serde_json::from_str(json)?;
        Self::from_dataset(dataset)
    }

    pub fn load(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|err| {
            RepositoryError::Seed(format!("cannot read {}: {err}", path.display()))
        })?;
        Self::from_json(&json)
    }
}

impl UserReader for MemoryRepository {
    fn get_user_by_id(&self, id: &EntityId) -> RepositoryResult<Option<User>> {
        let data = self.data.read()?;
        Ok(data.users.iter().find(|user| &user.id == id).cloned())
    }

    fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>> {
        let data = self.data.read()?;
        Ok(data.users.iter().find(|user| &user.email == email).cloned())
    }
}

impl ClientReader for MemoryRepository {
    fn get_client_by_id(&self, id: &EntityId) -> RepositoryResult<Option<Client>> {
        let data = self.data.read()?;
        Ok(data.clients.iter().find(|client| &client.id == id).cloned())
    }

    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)> {
        let data = self.data.read()?;
        let term = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty());

        let mut clients: Vec<Client> = data
            .clients
            .iter()
            .filter(|client| term.is_none_or(|term| client.matches(term)))
            .filter(|client| query.status.is_none_or(|status| client.status == status))
            .cloned()
            .collect();
        clients.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        let total = clients.len();
        let clients = match &query.pagination {
            Some(p) => page_slice(&clients, p.page, p.per_page),
            None => clients,
        };
        Ok((total, clients))
    }
}

impl ProjectReader for MemoryRepository {
    fn get_project_by_id(&self, id: &EntityId) -> RepositoryResult<Option<Project>> {
        let data = self.data.read()?;
        Ok(data.projects.iter().find(|project| &project.id == id).cloned())
    }

    fn list_projects(&self, query: ProjectListQuery) -> RepositoryResult<Vec<Project>> {
        let data = self.data.read()?;
        let mut projects: Vec<Project> = data
            .projects
            .iter()
            .filter(|p| query.client_id.as_ref().is_none_or(|id| &p.client_id == id))
            .filter(|p| query.status.is_none_or(|status| p.status == status))
            .cloned()
            .collect();
        projects.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(projects)
    }
}

impl ProjectWriter for MemoryRepository {
    fn save_project(&self, project: &Project) -> RepositoryResult<Project> {
        let mut data = self.data.write()?;
        if !data.client_exists(&project.client_id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "project {} references unknown client {}",
                project.id, project.client_id
            )));
        }

        match data.projects.iter_mut().find(|p| p.id == project.id) {
            Some(stored) => *stored = project.clone(),
            None => data.projects.push(project.clone()),
        }
        data.refresh_derived();

        data.projects
            .iter()
            .find(|p| p.id == project.id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }
}

impl LeadReader for MemoryRepository {
    fn list_leads(&self) -> RepositoryResult<Vec<SaleLead>> {
        let data = self.data.read()?;
        let mut leads = data.leads.clone();
        leads.sort_by(|a, b| a.stage.cmp(&b.stage).then(a.expected_close.cmp(&b.expected_close)));
        Ok(leads)
    }
}

impl CommunicationReader for MemoryRepository {
    fn list_communications(
        &self,
        query: CommunicationListQuery,
    ) -> RepositoryResult<Vec<Communication>> {
        let data = self.data.read()?;
        let mut communications: Vec<Communication> = data
            .communications
            .iter()
            .filter(|c| query.client_id.as_ref().is_none_or(|id| &c.client_id == id))
            .cloned()
            .collect();
        communications.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(communications)
    }
}

impl DocumentReader for MemoryRepository {
    fn list_documents(&self, query: DocumentListQuery) -> RepositoryResult<Vec<Document>> {
        let data = self.data.read()?;
        let mut documents: Vec<Document> = data
            .documents
            .iter()
            .filter(|d| {
                query
                    .client_id
                    .as_ref()
                    .is_none_or(|id| d.client_id.as_ref() == Some(id))
            })
            .filter(|d| {
                query
                    .project_id
                    .as_ref()
                    .is_none_or(|id| d.project_id.as_ref() == Some(id))
            })
            .filter(|d| query.category.is_none_or(|category| d.category == category))
            .cloned()
            .collect();
        documents.sort_by(|a, b| b.upload_date.cmp(&a.upload_date));
        Ok(documents)
    }
}

impl TicketReader for MemoryRepository {
    fn get_ticket_by_id(&self, id: &EntityId) -> RepositoryResult<Option<Ticket>> {
        let data = self.data.read()?;
        Ok(data.tickets.iter().find(|ticket| &ticket.id == id).cloned())
    }

    fn list_tickets(&self, query: TicketListQuery) -> RepositoryResult<(usize, Vec<Ticket>)> {
        let data = self.data.read()?;
        let mut tickets: Vec<Ticket> = data
            .tickets
            .iter()
            .filter(|t| t.is_archived == query.archived)
            .filter(|t| query.client_id.as_ref().is_none_or(|id| &t.client_id == id))
            .filter(|t| query.status.is_none_or(|status| t.status == status))
            .cloned()
            .collect();
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = tickets.len();
        let tickets = match &query.pagination {
            Some(p) => page_slice(&tickets, p.page, p.per_page),
            None => tickets,
        };
        Ok((total, tickets))
    }
}

impl TicketWriter for MemoryRepository {
    fn save_ticket(&self, ticket: &Ticket) -> RepositoryResult<Ticket> {
        let mut data = self.data.write()?;
        if !data.client_exists(&ticket.client_id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "ticket {} references unknown client {}",
                ticket.id, ticket.client_id
            )));
        }

        match data.tickets.iter_mut().find(|t| t.id == ticket.id) {
            Some(stored) => *stored = ticket.clone(),
            None => data.tickets.push(ticket.clone()),
        }
        data.refresh_derived();

        data.tickets
            .iter()
            .find(|t| t.id == ticket.id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }
}
