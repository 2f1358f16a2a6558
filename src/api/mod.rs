//! HTTP API: the five service endpoints plus the OpenAPI document.

pub mod extract;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

pub use routes::{create_router, ApiDoc};
pub use state::AppState;
