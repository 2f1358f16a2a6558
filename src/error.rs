//! Unified error types for the service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::utils::short_id;

/// Startup and process-level errors.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// One failed constraint on a request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    /// Location of the offending value, e.g. `["body", "message"]`.
    pub loc: Vec<String>,
    /// Human-readable description.
    pub msg: String,
    /// Machine-readable error kind.
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    /// Error located at `body.<field>`.
    pub fn body_field(field: &str, msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc: vec!["body".to_string(), field.to_string()],
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }

    /// Error about the request body as a whole.
    pub fn body(msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc: vec!["body".to_string()],
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }
}

/// 422 response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorBody {
    pub detail: Vec<FieldError>,
}

/// 500 response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct InternalErrorBody {
    pub detail: String,
    pub request_id: String,
}

impl InternalErrorBody {
    pub fn new() -> Self {
        Self {
            detail: "Internal server error".to_string(),
            request_id: short_id(),
        }
    }
}

impl Default for InternalErrorBody {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors a single request can end in.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request input failed schema or constraint checks.
    #[error("validation failed: {}", join_messages(.0))]
    Validation(Vec<FieldError>),

    /// Unexpected failure while producing a response.
    #[error("internal error: {0}")]
    Internal(String),
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.msg.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<FieldError> for ApiError {
    fn from(err: FieldError) -> Self {
        ApiError::Validation(vec![err])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(detail) => {
                tracing::debug!(errors = detail.len(), "Rejected invalid request");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ValidationErrorBody { detail }),
                )
                    .into_response()
            }
            ApiError::Internal(reason) => {
                let body = InternalErrorBody::new();
                tracing::error!(request_id = %body.request_id, "Internal error: {}", reason);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
