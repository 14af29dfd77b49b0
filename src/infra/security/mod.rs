//! Canonical implementations of the capability ports.

mod argon2_hasher;
mod jwt_encrypter;
mod uuid_generator;

pub use argon2_hasher::Argon2Hasher;
pub use jwt_encrypter::JwtEncrypter;
pub use uuid_generator::UuidGenerator;
