// src/error.rs
//! Application error types with structured error handling.
//!
//! Every failure the save pipeline can hit has a variant here. None of them
//! escape the controller: they are logged and mapped onto a
//! [`PublishOutcome`](crate::controller::PublishOutcome).

use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
///
/// Parsed from the `code` field of a Notion error body so that a failed write
/// can be logged as "unauthorized" or "object_not_found" instead of a raw
/// JSON blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded
    RateLimited,
    /// The target does not exist or is not shared with the integration
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request body contains invalid JSON
    InvalidJson,
    /// Request parameters failed Notion's validation (e.g. no `Name` property)
    ValidationFailed,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// Whether the failure points at the saved settings rather than at Notion.
    pub fn is_configuration_problem(&self) -> bool {
        matches!(
            self,
            Self::ObjectNotFound | Self::Unauthorized | Self::RestrictedResource
        )
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Notion API rejected the write ({code}, HTTP {status}): {body}")]
    RemoteWrite {
        code: NotionErrorCode,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error interacting with clipboard: {0}")]
    Clipboard(String),

    #[error("Could not read the selection: {0}")]
    Capture(String),

    #[error("Settings file {path} is unreadable: {source}")]
    SettingsParse {
        path: std::path::PathBuf,
        source: serde_json::Error,
    },

    #[error("Local save failed: {}", failures.join(", "))]
    LocalPersist { failures: Vec<String> },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

impl From<arboard::Error> for AppError {
    fn from(err: arboard::Error) -> Self {
        AppError::Clipboard(format!("Clipboard error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError {
            message: "Background task did not complete".to_string(),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_round_trip_through_display() {
        for code in [
            "rate_limited",
            "object_not_found",
            "unauthorized",
            "validation_error",
            "something_new",
        ] {
            assert_eq!(NotionErrorCode::from_api_response(code).to_string(), code);
        }
        assert_eq!(NotionErrorCode::from_http_status(502).to_string(), "http_502");
    }

    #[test]
    fn configuration_problems_are_flagged() {
        assert!(NotionErrorCode::ObjectNotFound.is_configuration_problem());
        assert!(NotionErrorCode::Unauthorized.is_configuration_problem());
        assert!(!NotionErrorCode::RateLimited.is_configuration_problem());
    }

    #[test]
    fn remote_write_message_carries_body() {
        let err = AppError::RemoteWrite {
            code: NotionErrorCode::ValidationFailed,
            status: reqwest::StatusCode::BAD_REQUEST,
            body: r#"{"message":"Name is not a property that exists."}"#.to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("validation_error"));
        assert!(msg.contains("400"));
        assert!(msg.contains("Name is not a property"));
    }
}
