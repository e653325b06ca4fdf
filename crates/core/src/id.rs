//! Unique identifiers for Wordwise entities.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Opaque identifier of the learner owning a progress record.
///
/// Generated once per installation and carried through migrations unchanged.
/// Older documents may hold ids in any format, so the value is not parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Generate a new UserId
    pub fn new() -> Self {
        Self(format!("user_{}", Ulid::new().to_string().to_lowercase()))
    }

    /// Wrap an existing id. Empty strings are rejected.
    pub fn from_existing(s: impl Into<String>) -> Option<Self> {
        let s = s.into();
        if s.is_empty() {
            None
        } else {
            Some(Self(s))
        }
    }

    /// Borrow the id as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
