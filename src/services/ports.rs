//! Capability ports the use cases depend on.
//!
//! Each port is an opaque, swappable capability with one canonical
//! implementation under `infra::security`. The repository port lives in
//! `infra::repositories` next to its SeaORM implementation.

use uuid::Uuid;

use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// One-way password hashing.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> AppResult<String>;
}

/// Reversible access-token issuance, keyed on the user id.
///
/// `decrypt` is the inverse used by the authentication middleware.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait TokenEncrypter: Send + Sync {
    fn encrypt(&self, user_id: Uuid) -> AppResult<String>;
    fn decrypt(&self, token: &str) -> AppResult<Uuid>;
}

/// Unique id production. Expected to be random enough that collisions
/// against the repository are rare.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> Uuid;
}
