//! Infrastructure layer - External systems integration
//!
//! Canonical implementations of the ports the services depend on:
//! - SeaORM-backed persistence and migrations
//! - Argon2 hashing, JWT token issuance, UUID id generation

pub mod db;
pub mod repositories;
pub mod security;

pub use db::{Database, Migrator};
pub use repositories::{UserRepository, UserStore};
pub use security::{Argon2Hasher, JwtEncrypter, UuidGenerator};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
