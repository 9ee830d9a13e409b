use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StorageError};

/// A newtype that ensures email addresses are compared and stored in a single
/// canonical form, so "Jane@Example.com " and "jane@example.com" are the same
/// allowlist entry and the same account.
///
/// # Examples
///
/// ```
/// use storage::models::NormalizedEmail;
///
/// let a = NormalizedEmail::new("  Jane@Example.COM ");
/// let b = NormalizedEmail::new("jane@example.com");
///
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "jane@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct NormalizedEmail(String);

impl NormalizedEmail {
    /// Trims surrounding whitespace and lower-cases the address.
    pub fn new(email: impl AsRef<str>) -> Self {
        Self(email.as_ref().trim().to_lowercase())
    }

    /// Normalizes and rejects values that cannot be an email address.
    pub fn parse(email: impl AsRef<str>) -> Result<Self> {
        let normalized = Self::new(email);
        if normalized.is_plausible() {
            Ok(normalized)
        } else {
            Err(StorageError::Validation(format!(
                "Invalid email format: {}",
                normalized.0
            )))
        }
    }

    /// Local part and domain must both be non-empty, with no inner whitespace.
    pub fn is_plausible(&self) -> bool {
        match self.0.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.is_empty()
                    && !domain.contains('@')
                    && !self.0.chars().any(char::is_whitespace)
            }
            None => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NormalizedEmail {
    fn from(email: String) -> Self {
        Self::new(email)
    }
}

impl From<&str> for NormalizedEmail {
    fn from(email: &str) -> Self {
        Self::new(email)
    }
}

impl From<NormalizedEmail> for String {
    fn from(email: NormalizedEmail) -> Self {
        email.0
    }
}
