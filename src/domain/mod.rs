//! Domain layer - Core business entities and logic
//!
//! Value objects validate and wrap raw input; the `User` entity is the
//! single validated construction path for account data. The persisted
//! record shapes owned by the repository also live here so the service
//! layer can speak one vocabulary.

pub mod email;
pub mod name;
pub mod password;
pub mod user;

pub use email::Email;
pub use name::Name;
pub use password::Password;
pub use user::{NewUser, User, UserPatch, UserRecord, UserVisibleData};
