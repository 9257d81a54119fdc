use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Catalog responded with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(feature = "server")]
impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            RepositoryError::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            if status == reqwest::StatusCode::NOT_FOUND {
                RepositoryError::NotFound
            } else {
                RepositoryError::Status {
                    status: status.as_u16(),
                    message: err.to_string(),
                }
            }
        } else if err.is_decode() {
            RepositoryError::Decode(err.to_string())
        } else {
            RepositoryError::Unexpected(format!("Unexpected HTTP error: {err}"))
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Decode(err.to_string())
    }
}
