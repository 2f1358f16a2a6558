//! Process-wide state injected into the router.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::utils::short_id;

/// Service name reported by `/info`.
pub const SERVICE_NAME: &str = "sample-microservice";
/// Service version reported by `/health` and `/info`.
pub const SERVICE_VERSION: &str = "1.0.0";

/// Application state shared with handlers.
///
/// Everything here is fixed at construction; handlers only read it.
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    service_id: String,
    started_at: Instant,
    environment: String,
}

impl AppState {
    /// Create state with a fresh service id and the configured environment.
    pub fn new(config: &Config) -> Self {
        Self::with_identity(short_id(), config.environment.clone())
    }

    /// Create state with an explicit service id.
    pub fn with_identity(service_id: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Inner {
                service_id: service_id.into(),
                started_at: Instant::now(),
                environment: environment.into(),
            }),
        }
    }

    /// Identifier of this running instance.
    pub fn service_id(&self) -> &str {
        &self.inner.service_id
    }

    /// Deployment environment name.
    pub fn environment(&self) -> &str {
        &self.inner.environment
    }

    /// Seconds since the state was created.
    pub fn uptime_seconds(&self) -> f64 {
        self.inner.started_at.elapsed().as_secs_f64()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
