//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{AccountService, ServiceContainer, Services, TokenEncrypter, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Account service (sign-up, external sign-in)
    pub account_service: Arc<dyn AccountService>,
    /// User service (reads, profile updates)
    pub user_service: Arc<dyn UserService>,
    /// Token encrypter, used by the auth middleware
    pub encrypter: Arc<dyn TokenEncrypter>,
    /// Database connection (health checks)
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a database connection and config.
    ///
    /// Wires the canonical port implementations through the service
    /// container; this is the production construction path.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);

        Self {
            account_service: container.accounts(),
            user_service: container.users(),
            encrypter: container.encrypter(),
            database,
        }
    }

    /// Create application state with manually injected services.
    pub fn new(
        account_service: Arc<dyn AccountService>,
        user_service: Arc<dyn UserService>,
        encrypter: Arc<dyn TokenEncrypter>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            account_service,
            user_service,
            encrypter,
            database,
        }
    }
}
