use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

pub mod products;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Form(_) | ServiceError::TypeConstraint(_) | ServiceError::Filter(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            ServiceError::Repository(
                RepositoryError::Connection(_)
                | RepositoryError::Status { .. }
                | RepositoryError::Decode(_),
            ) => StatusCode::BAD_GATEWAY,
            ServiceError::Repository(RepositoryError::Unexpected(_)) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error = if status.is_server_error() {
            log::error!("Request failed: {self}");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        HttpResponse::build(status).json(ErrorBody { error })
    }
}

/// `303 See Other` to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
