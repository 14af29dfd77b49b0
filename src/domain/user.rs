//! User entity and persisted record shapes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::ValidationError;

use super::{Email, Name, Password};

/// Transient, fully validated user entity.
///
/// Constructed per request through [`User::new`] and never persisted
/// directly; the repository owns the persisted [`UserRecord`] shape.
/// Password is absent for externally-authenticated users.
#[derive(Debug, Clone)]
pub struct User {
    name: Name,
    email: Email,
    password: Option<Password>,
}

impl User {
    /// Validate all fields atomically and build a `User`.
    ///
    /// Validation short-circuits on the first invalid field, in fixed
    /// name → email → password order, so a caller always receives exactly
    /// one error for any combination of invalid inputs.
    pub fn new(name: &str, email: &str, password: Option<&str>) -> Result<Self, ValidationError> {
        let name = Name::parse(name)?;
        let email = Email::parse(email)?;
        let password = password.map(Password::parse).transpose()?;
        Ok(Self {
            name,
            email,
            password,
        })
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> Option<&Password> {
        self.password.as_ref()
    }
}

/// Persisted user record as returned by the repository.
///
/// `access_token` is opaque and reassigned on every external sign-in;
/// timestamps are repository-assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub access_token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert shape handed to the repository; timestamps are assigned there.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub access_token: String,
}

/// Partial-update shape; only populated fields are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub access_token: Option<String>,
}

/// Redacted projection of a persisted record, safe to return to a caller.
///
/// This is the only shape the API ever serializes; the password hash has
/// no representation here at the type level.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserVisibleData {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// User display name
    #[schema(example = "Jo")]
    pub name: String,
    /// User email address
    #[schema(example = "jo@x.com")]
    pub email: String,
    /// Opaque access token, rotated on external sign-in
    pub access_token: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<UserRecord> for UserVisibleData {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            access_token: record.access_token,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
