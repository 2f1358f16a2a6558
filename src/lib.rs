//! Sample HTTP microservice for CI/CD pipeline demos.
//!
//! Five stateless endpoints backed by a service id and startup instant
//! fixed when the process starts:
//!
//! ```text
//! GET  /          welcome message
//! GET  /health    liveness/readiness probe
//! POST /echo      {"message": "..."} -> "You said: ..."
//! GET  /info      name, version, environment, uptime
//! GET  /metrics   placeholder request counter and uptime
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Startup and per-request error types
//! - [`api`]: HTTP router, handlers, and request validation
//! - [`utils`]: Identifiers, timestamps, shutdown signal

pub mod api;
pub mod config;
pub mod error;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, Result, ServiceError};
