//! Account service - Handles sign-up and external sign-in.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::MAX_ID_GENERATION_ATTEMPTS;
use crate::domain::{NewUser, User, UserPatch, UserVisibleData};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

use super::ports::{IdGenerator, PasswordHasher, TokenEncrypter};

/// Account service trait for dependency injection.
///
/// Both operations take raw input; validation happens inside through the
/// `User` factory, and expected business conditions (validation failure,
/// duplicate email) come back as `Err` values rather than panics.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new account with a password
    async fn sign_up(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> AppResult<UserVisibleData>;

    /// Sign in a user whose identity was established externally.
    ///
    /// Upsert keyed on email: an existing account gets a fresh access
    /// token, an unknown email creates the account. The token rotates on
    /// every call.
    async fn external_sign_in(&self, name: String, email: String) -> AppResult<UserVisibleData>;
}

/// Concrete implementation of AccountService.
pub struct AccountManager {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    encrypter: Arc<dyn TokenEncrypter>,
    id_generator: Arc<dyn IdGenerator>,
}

impl AccountManager {
    /// Create new account service instance
    pub fn new(
        repository: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        encrypter: Arc<dyn TokenEncrypter>,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            repository,
            hasher,
            encrypter,
            id_generator,
        }
    }

    /// Allocate an id not yet present in the repository.
    ///
    /// Check-then-act: the check is not atomic against concurrent writers;
    /// the unique index on the users table is the final arbiter.
    async fn allocate_id(&self) -> AppResult<Uuid> {
        for _ in 0..MAX_ID_GENERATION_ATTEMPTS {
            let id = self.id_generator.generate();
            if self.repository.find_by_id(id).await?.is_none() {
                return Ok(id);
            }
            tracing::warn!(%id, "generated user id already in use, retrying");
        }
        Err(AppError::IdGenerationExhausted)
    }
}

#[async_trait]
impl AccountService for AccountManager {
    #[tracing::instrument(name = "AccountManager::sign_up", skip(self, password))]
    async fn sign_up(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> AppResult<UserVisibleData> {
        let user = User::new(&name, &email, Some(&password))?;

        // Uniqueness check comes before any hashing or id work, so a
        // duplicate email never touches the other ports
        if self
            .repository
            .find_by_email(user.email().as_str())
            .await?
            .is_some()
        {
            return Err(AppError::UserAlreadyExists);
        }

        let password = user
            .password()
            .ok_or_else(|| AppError::internal("sign-up user lost its password"))?;
        let password_hash = self.hasher.hash(password.as_str())?;

        let id = self.allocate_id().await?;
        let access_token = self.encrypter.encrypt(id)?;

        let record = self
            .repository
            .add(NewUser {
                id,
                name: user.name().as_str().to_string(),
                email: user.email().as_str().to_string(),
                password_hash: Some(password_hash),
                access_token,
            })
            .await?;

        tracing::info!(user_id = %record.id, "user signed up");
        Ok(UserVisibleData::from(record))
    }

    #[tracing::instrument(name = "AccountManager::external_sign_in", skip(self))]
    async fn external_sign_in(&self, name: String, email: String) -> AppResult<UserVisibleData> {
        let user = User::new(&name, &email, None)?;

        let record = match self
            .repository
            .find_by_email(user.email().as_str())
            .await?
        {
            // Idempotent re-login: rotate the token, keep everything else
            Some(existing) => {
                let access_token = self.encrypter.encrypt(existing.id)?;
                self.repository
                    .update_by_email(
                        &existing.email,
                        UserPatch {
                            access_token: Some(access_token),
                            ..UserPatch::default()
                        },
                    )
                    .await?
            }
            // First sight of this email: create the account without a password
            None => {
                let id = self.allocate_id().await?;
                let access_token = self.encrypter.encrypt(id)?;
                self.repository
                    .add(NewUser {
                        id,
                        name: user.name().as_str().to_string(),
                        email: user.email().as_str().to_string(),
                        password_hash: None,
                        access_token,
                    })
                    .await?
            }
        };

        tracing::info!(user_id = %record.id, "external sign-in completed");
        Ok(UserVisibleData::from(record))
    }
}
