use std::fmt;

use serde::{Deserialize, Serialize};

/// Isolated account/credential context against which operations are issued.
///
/// The value is opaque to the engine; adapters decide how to turn it into a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile(String);

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Profile {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Profile {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Profile {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
