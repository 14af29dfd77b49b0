//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain validation and infrastructure ports to
//! fulfill application use cases. They depend on abstractions (traits)
//! for dependency inversion: the repository port plus the capability
//! ports (hasher, encrypter, id generator).

mod account_service;
pub mod container;
mod ports;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use account_service::{AccountManager, AccountService};
pub use user_service::{UpdateUserData, UserManager, UserService};

// Capability ports
pub use ports::{IdGenerator, PasswordHasher, TokenEncrypter};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use ports::{MockIdGenerator, MockPasswordHasher, MockTokenEncrypter};
