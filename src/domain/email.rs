//! Email value object.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ValidationError;

/// Standard address pattern: local part, `@`, domain with at least one dot.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email pattern must compile")
});

/// Email address wrapper. Guaranteed non-empty and pattern-valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    /// Validate and wrap a raw email address.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.is_empty() || !EMAIL_PATTERN.is_match(raw) {
            return Err(ValidationError::InvalidEmail(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
