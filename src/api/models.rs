//! Request and response bodies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum echo message length, in characters.
pub const MAX_MESSAGE_LEN: usize = 1000;

/// Welcome payload for `GET /`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    #[schema(example = "Welcome to Sample Microservice API")]
    pub message: String,
    #[schema(example = "a1b2c3d4")]
    pub service_id: String,
    #[schema(example = "/docs")]
    pub docs: String,
    #[schema(example = "/health")]
    pub health: String,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    #[schema(example = "1.0.0")]
    pub version: String,
    #[schema(example = "a1b2c3d4")]
    pub service_id: String,
    #[schema(example = "2024-01-01T00:00:00Z")]
    pub timestamp: String,
}

/// Echo request body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EchoRequest {
    /// Between 1 and 1000 characters.
    #[schema(example = "Hello World", min_length = 1, max_length = 1000)]
    pub message: String,
}

/// Echo response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EchoResponse {
    #[schema(example = "You said: Hello World")]
    pub echo: String,
    #[schema(example = "2024-01-01T00:00:00Z")]
    pub timestamp: String,
    #[schema(example = "9f8e7d6c")]
    pub request_id: String,
}

/// Service information response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfoResponse {
    #[schema(example = "sample-microservice")]
    pub service: String,
    #[schema(example = "1.0.0")]
    pub version: String,
    #[schema(example = "production")]
    pub environment: String,
    #[schema(example = "a1b2c3d4")]
    pub service_id: String,
    #[schema(example = 3600.5)]
    pub uptime_seconds: f64,
}

/// Basic metrics response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MetricsResponse {
    /// Placeholder, always zero.
    pub requests_served: u64,
    pub uptime_seconds: f64,
    pub service_id: String,
}

/// Body of 404 responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NotFoundResponse {
    #[schema(example = "Not Found")]
    pub detail: String,
}
