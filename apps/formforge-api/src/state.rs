//! Application state for the FormForge API

use crate::config::ServerConfig;

/// Shared, read-only state. Documents are never shared between requests.
pub struct AppState {
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }
}
