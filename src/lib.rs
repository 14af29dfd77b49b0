//! Accounts API - A user-account backend
//!
//! Registration, external (token-based) sign-in, profile update and read
//! access, fronted by an HTTP API. The design core is the services layer:
//! use cases that validate input through value objects, enforce
//! account-uniqueness and existence invariants, and coordinate the
//! repository and capability ports.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Value objects, the user entity and record shapes
//! - **services**: Application use cases and capability ports
//! - **infra**: Infrastructure concerns (database, security adapters)
//! - **api**: HTTP handlers, middleware, and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{User, UserRecord, UserVisibleData};
pub use errors::{AppError, AppResult, ValidationError};
