//! Query-string forms backing the product list and its filter links.

use thiserror::Error;
use validator::ValidationErrors;

pub mod filters;

#[derive(Debug, Error)]
/// Errors that can occur when processing query-string forms.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("malformed query string: {0}")]
    Malformed(String),
}
