//! HTTP API route definitions.

use std::any::Any;

use axum::{
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{self, echo, health, info, metrics, not_found, root};
use super::models::{
    EchoRequest, EchoResponse, HealthResponse, MetricsResponse, NotFoundResponse, RootResponse,
    ServiceInfoResponse,
};
use super::state::AppState;
use crate::error::{ApiError, FieldError, InternalErrorBody, ValidationErrorBody};

/// OpenAPI document for the service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sample Microservice",
        version = "1.0.0",
        description = "A sample HTTP service for CI/CD demos"
    ),
    paths(
        handlers::root,
        handlers::health,
        handlers::echo,
        handlers::info,
        handlers::metrics
    ),
    components(schemas(
        RootResponse,
        HealthResponse,
        EchoRequest,
        EchoResponse,
        ServiceInfoResponse,
        MetricsResponse,
        NotFoundResponse,
        FieldError,
        ValidationErrorBody,
        InternalErrorBody
    )),
    tags(
        (name = "service", description = "Health and service metadata"),
        (name = "echo", description = "Echo service")
    )
)]
pub struct ApiDoc;

/// Swagger UI mount point, advertised by `GET /`.
pub const DOCS_PATH: &str = "/docs";
/// ReDoc page.
pub const REDOC_PATH: &str = "/redoc";
/// Raw OpenAPI document.
pub const OPENAPI_PATH: &str = "/openapi.json";

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        // Health endpoints
        .route("/health", get(health))
        .route("/info", get(info))
        .route("/metrics", get(metrics))
        .route("/echo", post(echo))
        // Interactive docs; Swagger UI also serves the raw document
        .merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, ApiDoc::openapi()))
        .merge(Redoc::with_url(REDOC_PATH, ApiDoc::openapi()))
        .fallback(not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

/// Turn a handler panic into the generic 500 body.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let reason = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };

    ApiError::Internal(format!("handler panicked: {reason}")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(AppState::with_identity("abcd1234", "testing"))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    async fn post_echo(app: Router, body: impl Into<Body>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/echo")
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap();
        send(app, request).await
    }

    #[tokio::test]
    async fn root_returns_welcome() {
        let (status, body) = get_json(app(), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "message": "Welcome to Sample Microservice API",
                "service_id": "abcd1234",
                "docs": "/docs",
                "health": "/health"
            })
        );
    }

    #[tokio::test]
    async fn health_endpoint_returns_healthy() {
        let (status, body) = get_json(app(), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], "1.0.0");
        assert_eq!(body["service_id"], "abcd1234");
        assert_eq!(body["timestamp"].as_str().unwrap().len(), 20);
    }

    #[tokio::test]
    async fn info_reports_service_metadata() {
        let (status, body) = get_json(app(), "/info").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "sample-microservice");
        assert_eq!(body["version"], "1.0.0");
        assert_eq!(body["environment"], "testing");
        assert_eq!(body["service_id"], "abcd1234");
        assert!(body["uptime_seconds"].is_f64());
    }

    #[tokio::test]
    async fn info_uptime_never_decreases() {
        let router = app();
        let (_, first) = get_json(router.clone(), "/info").await;
        let (_, second) = get_json(router, "/info").await;

        let first = first["uptime_seconds"].as_f64().unwrap();
        let second = second["uptime_seconds"].as_f64().unwrap();
        assert!(first >= 0.0);
        assert!(second >= first);
    }

    #[tokio::test]
    async fn metrics_uptime_never_decreases() {
        let router = app();
        let (_, first) = get_json(router.clone(), "/metrics").await;
        let (_, second) = get_json(router, "/metrics").await;

        let first = first["uptime_seconds"].as_f64().unwrap();
        let second = second["uptime_seconds"].as_f64().unwrap();
        assert!(first >= 0.0);
        assert!(second >= first);
    }

    #[tokio::test]
    async fn metrics_counter_is_placeholder() {
        let (status, body) = get_json(app(), "/metrics").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["requests_served"], 0);
        assert_eq!(body["service_id"], "abcd1234");
        assert!(body["uptime_seconds"].as_f64().unwrap() >= 0.0);
    }

    #[tokio::test]
    async fn service_id_is_consistent_across_endpoints() {
        let router = create_router(AppState::default());
        let (_, health) = get_json(router.clone(), "/health").await;
        let (_, info) = get_json(router.clone(), "/info").await;
        let (_, metrics) = get_json(router, "/metrics").await;

        assert_eq!(health["service_id"], info["service_id"]);
        assert_eq!(info["service_id"], metrics["service_id"]);
    }

    #[tokio::test]
    async fn echo_returns_prefixed_message() {
        let (status, body) = post_echo(app(), r#"{"message": "Hello CI/CD!"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["echo"], "You said: Hello CI/CD!");
        assert_eq!(body["request_id"].as_str().unwrap().len(), 8);
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn echo_accepts_message_at_limit() {
        let message = "x".repeat(1000);
        let (status, body) = post_echo(app(), json!({ "message": message }).to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["echo"], format!("You said: {message}"));
    }

    #[tokio::test]
    async fn echo_rejects_invalid_input() {
        let too_long = json!({ "message": "x".repeat(1001) }).to_string();
        let cases = [
            r#"{"message": ""}"#.to_string(),
            "{}".to_string(),
            "invalid json".to_string(),
            too_long,
        ];

        for case in cases {
            let (status, body) = post_echo(app(), case.clone()).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "body: {case}");
            assert!(body["detail"].as_array().is_some_and(|d| !d.is_empty()));
        }
    }

    #[tokio::test]
    async fn echo_length_limit_counts_characters_not_bytes() {
        let at_limit = "ü".repeat(1000);
        let (status, body) = post_echo(app(), json!({ "message": at_limit }).to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["echo"], format!("You said: {at_limit}"));

        let over = "ü".repeat(1001);
        let (status, body) = post_echo(app(), json!({ "message": over }).to_string()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["type"], "string_too_long");
    }

    #[tokio::test]
    async fn echo_rejects_empty_with_field_location() {
        let (_, body) = post_echo(app(), r#"{"message": ""}"#).await;

        assert_eq!(body["detail"][0]["loc"], json!(["body", "message"]));
        assert_eq!(body["detail"][0]["type"], "string_too_short");
    }

    #[tokio::test]
    async fn echo_without_content_type_still_parses() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/echo")
            .body(Body::from(r#"{"message": "plain"}"#))
            .unwrap();
        let (status, body) = send(app(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["echo"], "You said: plain");
    }

    #[tokio::test]
    async fn unknown_path_returns_404() {
        let (status, body) = get_json(app(), "/nonexistent-path").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Not Found");
    }

    #[tokio::test]
    async fn wrong_method_returns_405() {
        let request = Request::builder()
            .method(Method::PATCH)
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn get_on_echo_returns_405() {
        let request = Request::builder().uri("/echo").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    async fn boom() -> &'static str {
        panic!("boom")
    }

    #[tokio::test]
    async fn panicking_handler_returns_500() {
        let router: Router = Router::new()
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(panic_response));

        let (status, body) = get_json(router, "/boom").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "Internal server error");
        assert_eq!(body["request_id"].as_str().unwrap().len(), 8);
    }

    async fn get_status(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, location, String::from_utf8_lossy(&bytes).into_owned())
    }

    #[tokio::test]
    async fn advertised_docs_link_serves_swagger_ui() {
        let (_, welcome) = get_json(app(), "/").await;
        let docs = welcome["docs"].as_str().unwrap().to_string();
        assert_eq!(docs, DOCS_PATH);

        let (status, location, _) = get_status(app(), &docs).await;
        let page = if status.is_redirection() {
            location.unwrap()
        } else {
            assert_eq!(status, StatusCode::OK);
            docs
        };

        let (status, _, html) = get_status(app(), &page).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.to_lowercase().contains("swagger"));
    }

    #[tokio::test]
    async fn redoc_page_is_served() {
        let (status, _, html) = get_status(app(), REDOC_PATH).await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.to_lowercase().contains("redoc"));
    }

    #[tokio::test]
    async fn openapi_document_lists_routes() {
        let (status, body) = get_json(app(), OPENAPI_PATH).await;

        assert_eq!(status, StatusCode::OK);
        for path in ["/", "/health", "/echo", "/info", "/metrics"] {
            assert!(body["paths"].get(path).is_some(), "missing {path}");
        }
        assert!(body["paths"]["/echo"].get("post").is_some());
    }
}
