//! Password value object.
//!
//! Holds validated plaintext only for the duration of a request; hashing
//! is a capability of the service layer's `PasswordHasher` port.

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::ValidationError;

/// Validated plaintext password.
///
/// Invariant: non-empty, at least [`MIN_PASSWORD_LENGTH`] characters and
/// containing at least one ASCII digit.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

// Don't expose the plaintext in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Password").field(&"[REDACTED]").finish()
    }
}

impl Password {
    /// Validate and wrap a raw password.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let long_enough = raw.len() >= MIN_PASSWORD_LENGTH;
        let has_digit = raw.chars().any(|c| c.is_ascii_digit());
        if raw.is_empty() || !long_enough || !has_digit {
            return Err(ValidationError::InvalidPassword(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    /// Plaintext access for the hasher port.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
