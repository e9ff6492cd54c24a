use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Compute resource scoped to exactly one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetInstance {
    pub id: String,
    /// Raw platform tag reported by the inventory (`windows`, ...).
    ///
    /// `None` when the inventory reports nothing, which is how most Linux hosts show up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl TargetInstance {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            platform: None,
        }
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Platform tag, empty when unknown.
    #[inline]
    pub fn platform_tag(&self) -> &str {
        self.platform.as_deref().unwrap_or("")
    }
}

impl fmt::Display for TargetInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Platform filter applied to discovered instances.
///
/// `Linux` keeps everything whose tag is not exactly `windows` (case-insensitive),
/// so instances with an unknown or empty tag are kept as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlatformFilter {
    Windows,
    Linux,
}

impl PlatformFilter {
    pub fn matches(&self, target: &TargetInstance) -> bool {
        let tag = target.platform_tag().to_ascii_lowercase();
        match self {
            PlatformFilter::Windows => tag.contains("windows"),
            PlatformFilter::Linux => tag != "windows",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformFilter::Windows => "windows",
            PlatformFilter::Linux => "linux",
        }
    }
}

impl FromStr for PlatformFilter {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        match norm.as_str() {
            "win" | "windows" => Ok(PlatformFilter::Windows),
            "lin" | "linux" => Ok(PlatformFilter::Linux),
            _ => Err(ModelError::InvalidPlatformFilter(s.to_string())),
        }
    }
}

impl fmt::Display for PlatformFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
