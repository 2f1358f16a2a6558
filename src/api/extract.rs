//! Validating extractor for the echo request body.
//!
//! The body is parsed as JSON regardless of `Content-Type`, then checked
//! field by field so every failure surfaces as a 422 with a location.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::Value;

use super::models::{EchoRequest, MAX_MESSAGE_LEN};
use crate::error::{ApiError, FieldError};

/// A validated [`EchoRequest`].
#[derive(Debug, Clone)]
pub struct EchoPayload(pub EchoRequest);

#[async_trait]
impl<S> FromRequest<S> for EchoPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            ApiError::from(FieldError::body(rejection.body_text(), "body_read"))
        })?;

        parse_echo_request(&bytes).map(EchoPayload)
    }
}

/// Parse and validate a raw echo request body.
pub fn parse_echo_request(body: &[u8]) -> Result<EchoRequest, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        FieldError::body(format!("JSON decode error: {e}"), "json_invalid")
    })?;

    let Value::Object(fields) = value else {
        return Err(FieldError::body(
            "Input should be a valid dictionary or object to extract fields from",
            "model_attributes_type",
        )
        .into());
    };

    let message = match fields.get("message") {
        None => {
            return Err(FieldError::body_field("message", "Field required", "missing").into())
        }
        Some(Value::String(s)) => s,
        Some(_) => {
            return Err(FieldError::body_field(
                "message",
                "Input should be a valid string",
                "string_type",
            )
            .into())
        }
    };

    validate_message(message)?;

    Ok(EchoRequest {
        message: message.clone(),
    })
}

/// Check the 1..=1000 character bound.
fn validate_message(message: &str) -> Result<(), FieldError> {
    let len = message.chars().count();

    if len == 0 {
        return Err(FieldError::body_field(
            "message",
            "String should have at least 1 character",
            "string_too_short",
        ));
    }

    if len > MAX_MESSAGE_LEN {
        return Err(FieldError::body_field(
            "message",
            format!("String should have at most {MAX_MESSAGE_LEN} characters"),
            "string_too_long",
        ));
    }

    Ok(())
}
