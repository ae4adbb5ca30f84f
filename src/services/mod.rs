//! Page-level use cases shared by the HTTP handlers.
//!
//! Services are generic over the repository traits they need and return
//! [`ServiceError`] so routes can map failures to flash messages or status
//! codes in one place.

use thiserror::Error;

use crate::domain::ticket::TicketError;
use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

pub mod auth;
pub mod clients;
pub mod communications;
pub mod dashboard;
pub mod documents;
pub mod projects;
pub mod sales;
pub mod tickets;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(#[from] TypeConstraintError),

    #[error("ticket workflow: {0}")]
    Workflow(#[from] TicketError),

    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

/// Fails with [`ServiceError::Unauthorized`] unless `allowed` holds.
pub fn ensure(allowed: bool) -> ServiceResult<()> {
    if allowed {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

#[cfg(all(test, feature = "test-mocks"))]
pub(crate) mod fixtures {
    //! Records shared by the service tests.

    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::domain::client::{Client, ClientStatus, ClientType};
    use crate::domain::lead::{LeadStage, SaleLead};
    use crate::domain::project::{Project, ProjectStatus};
    use crate::domain::types::{EntityId, Percent, UserEmail};
    use crate::domain::user::{User, UserRole};

    pub fn user(role: UserRole) -> User {
        User {
            id: EntityId::new("u-1").unwrap(),
            name: "Ana Lopez".to_string(),
            email: UserEmail::new("ana@example.com").unwrap(),
            role,
            avatar: None,
        }
    }

    pub fn client(id: &str, name: &str, status: ClientStatus) -> Client {
        Client {
            id: EntityId::new(id).unwrap(),
            name: name.to_string(),
            kind: ClientType::Client,
            status,
            contact: "Contact".to_string(),
            email: "contact@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            address: "1 Main St".to_string(),
            last_interaction: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            projects_count: 0,
        }
    }

    pub fn project(id: &str, status: ProjectStatus, start: NaiveDate) -> Project {
        Project {
            id: EntityId::new(id).unwrap(),
            name: format!("Project {id}"),
            client_id: EntityId::new("c-1").unwrap(),
            client_name: "Acme".to_string(),
            status,
            progress: Percent::new(30).unwrap(),
            start_date: start,
            end_date: start + chrono::Duration::days(90),
            budget: 1000.0,
            spent: 250.0,
            manager: "Ana Lopez".to_string(),
            description: String::new(),
        }
    }

    pub fn lead(id: &str, stage: LeadStage, value: f64, probability: u8) -> SaleLead {
        SaleLead {
            id: EntityId::new(id).unwrap(),
            title: format!("Lead {id}"),
            value,
            stage,
            probability: Percent::new(probability).unwrap(),
            expected_close: Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap().date_naive(),
            client_id: EntityId::new("c-1").unwrap(),
            client_name: "Acme".to_string(),
        }
    }
}
