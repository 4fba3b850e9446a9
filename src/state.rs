//! Shared application state for Axum handlers.
//!
//! Everything here is read-only after startup: the configuration and the
//! reply generator are wrapped in `Arc` and cloned into each handler. No
//! request writes to shared state, so no locks are needed.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::services::{EchoResponder, Responder};

/// Shared application state for Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,
    /// Reply generator for honeypot messages
    pub responder: Arc<dyn Responder>,
    /// Timestamp when the application started
    pub started_at: Instant,
}

impl AppState {
    /// Create state with the default [`EchoResponder`].
    pub fn new(config: Config) -> Self {
        Self::with_responder(config, Arc::new(EchoResponder::new()))
    }

    /// Create state with a custom reply generator.
    pub fn with_responder(config: Config, responder: Arc<dyn Responder>) -> Self {
        Self {
            config: Arc::new(config),
            responder,
            started_at: Instant::now(),
        }
    }

    /// Get uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
