//! User repository port and its SeaORM implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::domain::{NewUser, UserPatch, UserRecord};
use crate::errors::{AppError, AppResult};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Persistence port the use cases depend on.
///
/// `find_*` return the persisted record or `None`; `add`/`update_*`
/// return the new persisted shape including repository-assigned
/// timestamps. Uniqueness under concurrent writers is enforced by the
/// unique email index, surfacing as a database error here.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<UserRecord>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>>;
    async fn list(&self) -> AppResult<Vec<UserRecord>>;
    async fn add(&self, user: NewUser) -> AppResult<UserRecord>;
    async fn update_by_id(&self, id: Uuid, patch: UserPatch) -> AppResult<UserRecord>;
    async fn update_by_email(&self, email: &str, patch: UserPatch) -> AppResult<UserRecord>;
}

/// SeaORM-backed implementation of [`UserRepository`].
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn apply_patch(&self, model: user::Model, patch: UserPatch) -> AppResult<UserRecord> {
        let mut active: ActiveModel = model.into();

        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(email) = patch.email {
            active.email = Set(email);
        }
        if let Some(password_hash) = patch.password_hash {
            active.password_hash = Set(Some(password_hash));
        }
        if let Some(access_token) = patch.access_token {
            active.access_token = Set(access_token);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(UserRecord::from(model))
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<UserRecord>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(UserRecord::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(UserRecord::from))
    }

    async fn list(&self) -> AppResult<Vec<UserRecord>> {
        let models = UserEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(UserRecord::from).collect())
    }

    async fn add(&self, new_user: NewUser) -> AppResult<UserRecord> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(new_user.id),
            name: Set(new_user.name),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            access_token: Set(new_user.access_token),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(UserRecord::from(model))
    }

    async fn update_by_id(&self, id: Uuid, patch: UserPatch) -> AppResult<UserRecord> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::UserNotFound)?;

        self.apply_patch(model, patch).await
    }

    async fn update_by_email(&self, email: &str, patch: UserPatch) -> AppResult<UserRecord> {
        let model = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .ok_or(AppError::UserNotFound)?;

        self.apply_patch(model, patch).await
    }
}
