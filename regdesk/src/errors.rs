use crate::db::errors::DbError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Missing or empty required form field (or missing attachment)
    #[error("{message}")]
    Validation { message: String },

    /// Attachment refused by the upload acceptance policy (type or size)
    #[error("{message}")]
    UploadRejected { message: String },

    /// Duplicate submission, e.g. an email address that is already registered
    #[error("{message}")]
    Conflict { message: String },

    /// Requested resource not found
    #[error("{resource} not found")]
    NotFound { resource: String, id: String },

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Store operation error
    #[error(transparent)]
    Database(#[from] DbError),

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Duplicate submissions are reported as plain client errors, not 409s:
            // the public contract only distinguishes 400/404/500.
            Error::Validation { .. } | Error::UploadRejected { .. } | Error::Conflict { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Database(db_err) => match db_err {
                DbError::NotFound => StatusCode::NOT_FOUND,
                DbError::UniqueViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation { message } | Error::UploadRejected { message } | Error::Conflict { message } => message.clone(),
            Error::NotFound { resource, .. } => format!("{resource} not found"),
            Error::Internal { operation } => format!("Failed to {operation}"),
            Error::Database(db_err) => match db_err {
                DbError::NotFound => "Resource not found".to_string(),
                DbError::UniqueViolation { constraint, .. } => match constraint.as_deref() {
                    Some(c) if c.contains("email") => "User already registered".to_string(),
                    _ => "Resource already exists".to_string(),
                },
                DbError::Other(_) => "Internal Server Error".to_string(),
            },
            Error::Other(_) => "Internal Server Error".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::Database(DbError::Other(_)) | Error::Internal { .. } | Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::Database(_) | Error::Conflict { .. } => {
                tracing::warn!("Constraint error: {}", self);
            }
            Error::Validation { .. } | Error::UploadRejected { .. } | Error::NotFound { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let status = self.status_code();
        let body = json!({ "error": self.user_message() });
        (status, axum::response::Json(body)).into_response()
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_and_conflict_map_to_bad_request() {
        let err = Error::Validation {
            message: "All fields and file upload are required!".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = Error::Conflict {
            message: "User already registered".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unique_violation_on_email_reads_as_already_registered() {
        let err = Error::Database(DbError::UniqueViolation {
            constraint: Some("registrations_email_unique".to_string()),
            table: Some("registrations".to_string()),
            message: "duplicate key value".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.user_message(), "User already registered");
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = Error::NotFound {
            resource: "User".to_string(),
            id: "deadbeef".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.user_message(), "User not found");
    }
}
