//! User service - Read access and profile updates.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{User, UserPatch, UserVisibleData};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

use super::ports::PasswordHasher;

/// Partial update input: any subset of the three account fields.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserData {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get a user by id
    async fn get_user(&self, id: Uuid) -> AppResult<UserVisibleData>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<UserVisibleData>>;

    /// Apply a partial update to a user
    async fn update_user(&self, id: Uuid, data: UpdateUserData) -> AppResult<UserVisibleData>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user(&self, id: Uuid) -> AppResult<UserVisibleData> {
        self.repository
            .find_by_id(id)
            .await?
            .map(UserVisibleData::from)
            .ok_or(AppError::UserNotFound)
    }

    async fn list_users(&self) -> AppResult<Vec<UserVisibleData>> {
        let records = self.repository.list().await?;
        Ok(records.into_iter().map(UserVisibleData::from).collect())
    }

    #[tracing::instrument(name = "UserManager::update_user", skip(self, data))]
    async fn update_user(&self, id: Uuid, data: UpdateUserData) -> AppResult<UserVisibleData> {
        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        // Merge overrides onto the stored fields and revalidate the whole
        // through the User factory. Stored fields are revalidated on every
        // partial update so the merged result is always a fully valid user.
        let name = data.name.as_deref().unwrap_or(&current.name);
        let email = data.email.as_deref().unwrap_or(&current.email);
        let merged = User::new(name, email, data.password.as_deref())?;

        // An email change must not collide with another account; keeping
        // one's own email untouched is always allowed
        if let Some(new_email) = data.email.as_deref() {
            if new_email != current.email {
                if let Some(owner) = self.repository.find_by_email(new_email).await? {
                    if owner.id != id {
                        return Err(AppError::UserAlreadyExists);
                    }
                }
            }
        }

        let password_hash = match merged.password() {
            Some(password) => Some(self.hasher.hash(password.as_str())?),
            None => None,
        };

        // Only the fields actually supplied reach the repository, with
        // name/email normalized through their value objects
        let patch = UserPatch {
            name: data
                .name
                .is_some()
                .then(|| merged.name().as_str().to_string()),
            email: data
                .email
                .is_some()
                .then(|| merged.email().as_str().to_string()),
            password_hash,
            access_token: None,
        };

        let record = self.repository.update_by_id(id, patch).await?;
        tracing::info!(user_id = %record.id, "user updated");
        Ok(UserVisibleData::from(record))
    }
}
