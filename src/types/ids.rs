//! Notion identifier normalization.
//!
//! Users paste whatever they have: share links, `Title-<32 hex>` slugs, bare
//! 32-hex ids or dashed UUIDs. Notion accepts the dashed form everywhere, so
//! that is what we produce. Input that cannot be coerced is passed through
//! unchanged and flagged; the API then reports the authoritative error.

use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use url::Url;
use uuid::Uuid;

lazy_static::lazy_static! {
    static ref TRAILING_HEX_ID: Regex = Regex::new(r"[0-9a-fA-F]{32}$")
        .expect("Failed to compile trailing id regex - this is a bug in the code");
    static ref DASHED_UUID: Regex = Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$"
    )
    .expect("Failed to compile dashed uuid regex - this is a bug in the code");
}

/// A Notion page or database id after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedId {
    value: String,
    canonical: bool,
}

impl NormalizedId {
    /// Normalizes a user-supplied id or URL. Returns `None` only for empty input.
    pub fn parse(raw: &str) -> Option<Self> {
        normalize_notion_id(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// True when the value is a 36-character lowercase dashed UUID.
    pub fn is_canonical(&self) -> bool {
        self.canonical
    }

    pub fn into_string(self) -> String {
        self.value
    }

    fn canonical(value: String) -> Self {
        Self {
            value,
            canonical: true,
        }
    }

    fn degraded(value: &str) -> Self {
        Self {
            value: value.to_string(),
            canonical: false,
        }
    }
}

impl fmt::Display for NormalizedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Serialize for NormalizedId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.value.serialize(serializer)
    }
}

/// Normalizes a Notion id in any of its pasted forms into the dashed form.
pub fn normalize_notion_id(raw: &str) -> Option<NormalizedId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Share links carry the id in their last path segment
    let mut candidate = match Url::parse(trimmed) {
        Ok(url) => match url.path().rsplit('/').next() {
            Some(segment) if !segment.is_empty() => segment.to_string(),
            _ => trimmed.to_string(),
        },
        Err(_) => trimmed.to_string(),
    };

    if let Some(end) = candidate.find(['?', '#']) {
        candidate.truncate(end);
    }

    if let Some(m) = TRAILING_HEX_ID.find(&candidate) {
        candidate = m.as_str().to_string();
    }

    if DASHED_UUID.is_match(&candidate) {
        return Some(NormalizedId::canonical(candidate.to_lowercase()));
    }

    let hex: String = candidate
        .chars()
        .filter(|c| c.is_ascii_hexdigit())
        .collect();
    if hex.len() == 32 {
        if let Ok(uuid) = Uuid::try_parse(&hex) {
            return Some(NormalizedId::canonical(uuid.hyphenated().to_string()));
        }
    }

    Some(NormalizedId::degraded(trimmed))
}
