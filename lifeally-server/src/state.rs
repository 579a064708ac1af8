//! Application state management

use std::sync::Arc;

use lifeally::service::Lifeally;
use lifeally::storage::LifeallyStore;

use crate::api::auth_service::AuthService;
use crate::config::ServerConfig;

/// Application state shared across all handlers
#[derive(Debug)]
pub struct AppState {
    /// Pipeline and storage
    pub lifeally: Lifeally,

    /// Server configuration
    pub config: ServerConfig,

    /// Token issuing and password checks
    pub auth_service: AuthService,
}

impl AppState {
    /// Create new application state
    pub fn new(lifeally: Lifeally, config: ServerConfig) -> Self {
        let auth_service = AuthService::from_config(&config);

        Self {
            lifeally,
            config,
            auth_service,
        }
    }

    pub fn storage(&self) -> &Arc<dyn LifeallyStore> {
        self.lifeally.storage()
    }
}
