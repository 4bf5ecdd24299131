// src/types/domain_types.rs
//! Domain-specific records and newtypes for the save pipeline.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integration token for Notion API authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new API key. The token is pre-issued, so only emptiness is checked.
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into().trim().to_string();

        if key.is_empty() {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot be empty".to_string(),
            });
        }

        Ok(Self(key))
    }

    /// Get the API key as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shows the first few characters only.
    pub fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(6).collect();
        format!("{}…", prefix)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.redacted()).finish()
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.redacted())
    }
}

/// The text a user selected, along with the page it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub text: String,
    pub title: String,
    pub url: String,
}

impl Selection {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_source(mut self, title: impl Into<String>, url: impl Into<String>) -> Self {
        self.title = title.into();
        self.url = url.into();
        self
    }

    /// The selection with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }
}

/// Snapshot of the save target settings, read fresh for every save.
///
/// Empty strings mean "not set".
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TargetConfig {
    pub credential: String,
    pub raw_identifier: String,
    pub is_database: bool,
}

impl TargetConfig {
    pub fn new(
        credential: impl Into<String>,
        raw_identifier: impl Into<String>,
        is_database: bool,
    ) -> Self {
        Self {
            credential: credential.into(),
            raw_identifier: raw_identifier.into(),
            is_database,
        }
    }

    /// No credential and no target.
    pub fn unconfigured() -> Self {
        Self::default()
    }
}

impl fmt::Debug for TargetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let credential = ApiKey::new(self.credential.as_str())
            .map(|key| key.redacted())
            .unwrap_or_default();
        f.debug_struct("TargetConfig")
            .field("credential", &credential)
            .field("raw_identifier", &self.raw_identifier)
            .field("is_database", &self.is_database)
            .finish()
    }
}
