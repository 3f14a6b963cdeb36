//! Shared enums used by both the HTTP client and the framework declaration.
//!
//! These serialize to the same strings the browser and the framework use, so
//! they can appear directly in config documents.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ─── CredentialMode ──────────────────────────────────────────────────────────

/// When cookies travel with a request (Fetch API `credentials`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CredentialMode {
    /// Never send or store cookies.
    Omit,
    /// Only for the base URL's origin.
    SameOrigin,
    /// For every origin, including cross-origin API hosts.
    #[default]
    Include,
}

impl CredentialMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Omit => "omit",
            Self::SameOrigin => "same-origin",
            Self::Include => "include",
        }
    }
}

impl std::fmt::Display for CredentialMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CredentialMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "omit" => Ok(Self::Omit),
            "same-origin" => Ok(Self::SameOrigin),
            "include" => Ok(Self::Include),
            other => Err(format!("unknown credential mode: {}", other)),
        }
    }
}

// ─── ColorMode ───────────────────────────────────────────────────────────────

/// Color scheme the color-mode module toggles between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    System,
    Light,
    Dark,
}

impl ColorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
