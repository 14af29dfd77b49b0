//! Service Container - Centralized service wiring.
//!
//! Builds the canonical port implementations and hands out the two
//! application services behind their trait objects.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Config;
use crate::infra::{Argon2Hasher, JwtEncrypter, UserStore, UuidGenerator};

use super::{AccountManager, AccountService, TokenEncrypter, UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get account service
    fn accounts(&self) -> Arc<dyn AccountService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get the token encrypter (the auth middleware needs the reverse
    /// direction of the same capability that issues tokens)
    fn encrypter(&self) -> Arc<dyn TokenEncrypter>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    account_service: Arc<dyn AccountService>,
    user_service: Arc<dyn UserService>,
    encrypter: Arc<dyn TokenEncrypter>,
}

impl Services {
    /// Create a new service container from already-built services
    pub fn new(
        account_service: Arc<dyn AccountService>,
        user_service: Arc<dyn UserService>,
        encrypter: Arc<dyn TokenEncrypter>,
    ) -> Self {
        Self {
            account_service,
            user_service,
            encrypter,
        }
    }

    /// Create service container from database connection and config,
    /// wiring the canonical port implementations.
    pub fn from_connection(db: DatabaseConnection, config: &Config) -> Self {
        let repository = Arc::new(UserStore::new(db));
        let hasher = Arc::new(Argon2Hasher::new());
        let encrypter: Arc<dyn TokenEncrypter> = Arc::new(JwtEncrypter::new(config));
        let id_generator = Arc::new(UuidGenerator);

        let account_service = Arc::new(AccountManager::new(
            repository.clone(),
            hasher.clone(),
            encrypter.clone(),
            id_generator,
        ));
        let user_service = Arc::new(UserManager::new(repository, hasher));

        Self {
            account_service,
            user_service,
            encrypter,
        }
    }
}

impl ServiceContainer for Services {
    fn accounts(&self) -> Arc<dyn AccountService> {
        self.account_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn encrypter(&self) -> Arc<dyn TokenEncrypter> {
        self.encrypter.clone()
    }
}
