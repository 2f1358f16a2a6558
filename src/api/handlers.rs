//! HTTP API handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use super::extract::EchoPayload;
use super::models::{
    EchoRequest, EchoResponse, HealthResponse, MetricsResponse, NotFoundResponse, RootResponse,
    ServiceInfoResponse,
};
use super::state::{AppState, SERVICE_NAME, SERVICE_VERSION};
use crate::error::{InternalErrorBody, ValidationErrorBody};
use crate::utils::{short_id, utc_timestamp};

/// Root endpoint returning a welcome message.
#[utoipa::path(
    get,
    path = "/",
    tag = "service",
    responses((status = 200, description = "Welcome message", body = RootResponse))
)]
pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: "Welcome to Sample Microservice API".to_string(),
        service_id: state.service_id().to_string(),
        docs: "/docs".to_string(),
        health: "/health".to_string(),
    })
}

/// Health check for load balancers and probes - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    tag = "service",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: SERVICE_VERSION.to_string(),
        service_id: state.service_id().to_string(),
        timestamp: utc_timestamp(),
    })
}

/// Echo back the provided message with metadata.
#[utoipa::path(
    post,
    path = "/echo",
    tag = "echo",
    request_body = EchoRequest,
    responses(
        (status = 200, description = "Echoed message", body = EchoResponse),
        (status = 422, description = "Validation error", body = ValidationErrorBody),
        (status = 500, description = "Internal server error", body = InternalErrorBody)
    )
)]
pub async fn echo(EchoPayload(request): EchoPayload) -> Json<EchoResponse> {
    let request_id = short_id();
    tracing::debug!(%request_id, chars = request.message.chars().count(), "Echoing message");

    Json(EchoResponse {
        echo: format!("You said: {}", request.message),
        timestamp: utc_timestamp(),
        request_id,
    })
}

/// Service information and metadata.
#[utoipa::path(
    get,
    path = "/info",
    tag = "service",
    responses((status = 200, description = "Service information", body = ServiceInfoResponse))
)]
pub async fn info(State(state): State<AppState>) -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        service: SERVICE_NAME.to_string(),
        version: SERVICE_VERSION.to_string(),
        environment: state.environment().to_string(),
        service_id: state.service_id().to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// Basic metrics. `requests_served` is not tracked and always reports 0.
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "service",
    responses((status = 200, description = "Basic metrics", body = MetricsResponse))
)]
pub async fn metrics(State(state): State<AppState>) -> Json<MetricsResponse> {
    Json(MetricsResponse {
        requests_served: 0,
        uptime_seconds: state.uptime_seconds(),
        service_id: state.service_id().to_string(),
    })
}

/// Fallback for unmatched paths.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            detail: "Not Found".to_string(),
        }),
    )
}
