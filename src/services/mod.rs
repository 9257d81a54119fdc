use thiserror::Error;

use crate::domain::filter::FilterError;
use crate::repository::errors::RepositoryError;

pub mod filter_options;
pub mod products;

/// Errors surfaced by the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid form: {0}")]
    Form(String),

    #[error("Type constraint violated: {0}")]
    TypeConstraint(String),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
