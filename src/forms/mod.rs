//! Form definitions backing the desk routes.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod auth;
pub mod layout;
pub mod projects;
pub mod tickets;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("unknown ticket status")]
    InvalidStatus,

    #[error("note cannot be empty")]
    InvalidNote,

    #[error("invalid progress value")]
    InvalidProgress,

    #[error("invalid amount")]
    InvalidAmount,
}

impl From<TypeConstraintError> for FormError {
    fn from(err: TypeConstraintError) -> Self {
        match err {
            TypeConstraintError::InvalidEmail => FormError::InvalidEmail,
            TypeConstraintError::OutOfRange { .. } => FormError::InvalidProgress,
            TypeConstraintError::EmptyString | TypeConstraintError::InvalidValue(_) => {
                FormError::InvalidNote
            }
        }
    }
}
