//! API error types with IntoResponse
//!
//! Every failure leaves a handler as an `ApiError` and is rendered here as
//! `{"error": {"message": ..., "status": ...}}` with the same status code.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;

/// Message returned for any failure that is not the caller's to see.
const INTERNAL_MESSAGE: &str = "an internal error occurred";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Requested key does not exist (404)
    NotFound { message: String },

    /// Request body or path could not be read (400)
    BadRequest { message: String },

    /// Path exists but not for this method (405)
    MethodNotAllowed,

    /// Database error (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::NotFound { message } | Self::BadRequest { message } => message,
            Self::MethodNotAllowed => "Method Not Allowed".to_owned(),
            Self::Database(DbError::Constraint {
                constraint,
                message,
            }) => {
                tracing::error!(%constraint, "Constraint violation: {}", message);
                INTERNAL_MESSAGE.to_owned()
            }
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                INTERNAL_MESSAGE.to_owned()
            }
        };

        let body = json!({
            "error": {
                "message": message,
                "status": status.as_u16()
            }
        });

        (status, Json(body)).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest {
            message: rejection.body_text(),
        }
    }
}
