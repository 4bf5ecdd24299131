// src/api/responses.rs
//! Interpretation of Notion API responses.

use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionErrorCode};
use reqwest::StatusCode;
use serde::Deserialize;

/// The error object Notion returns with every non-2xx response.
#[derive(Debug, Clone, Deserialize)]
pub struct NotionErrorBody {
    #[serde(default)]
    pub status: Option<u16>,
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Classifies a failed response, falling back to the HTTP status when the
/// body is not a Notion error object.
pub fn classify_error(status: StatusCode, body: &str) -> NotionErrorCode {
    match serde_json::from_str::<NotionErrorBody>(body) {
        Ok(error) => NotionErrorCode::from_api_response(&error.code),
        Err(_) => NotionErrorCode::from_http_status(status.as_u16()),
    }
}

/// Turns a status and body into the parsed JSON on success or a
/// [`AppError::RemoteWrite`] carrying the raw body otherwise.
pub fn interpret_write_response(
    status: StatusCode,
    body: String,
) -> Result<serde_json::Value, AppError> {
    if !status.is_success() {
        return Err(AppError::RemoteWrite {
            code: classify_error(status, &body),
            status,
            body,
        });
    }

    if body.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    Ok(serde_json::from_str(&body)?)
}

/// Shortens a response body for log lines.
pub fn preview_body(body: &str) -> String {
    if body.chars().count() <= ERROR_BODY_PREVIEW_LENGTH {
        body.to_string()
    } else {
        let head: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}…", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notion_error_body_is_classified() {
        let body = r#"{"object":"error","status":404,"code":"object_not_found","message":"Could not find page"}"#;
        assert_eq!(
            classify_error(StatusCode::NOT_FOUND, body),
            NotionErrorCode::ObjectNotFound
        );
    }

    #[test]
    fn test_unparseable_body_falls_back_to_status() {
        assert_eq!(
            classify_error(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>"),
            NotionErrorCode::HttpStatus(502)
        );
    }

    #[test]
    fn test_failure_keeps_raw_body() {
        let err = interpret_write_response(StatusCode::BAD_REQUEST, "nope".to_string())
            .expect_err("400 must fail");
        match err {
            AppError::RemoteWrite { status, body, .. } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(body, "nope");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_success_with_malformed_json_is_reported() {
        let err = interpret_write_response(StatusCode::OK, "{not json".to_string())
            .expect_err("malformed body must fail");
        assert!(matches!(err, AppError::MalformedResponse(_)));
    }

    #[test]
    fn test_preview_truncates_long_bodies() {
        let long = "x".repeat(ERROR_BODY_PREVIEW_LENGTH + 50);
        assert_eq!(
            preview_body(&long).chars().count(),
            ERROR_BODY_PREVIEW_LENGTH + 1
        );
        assert_eq!(preview_body("short"), "short");
    }
}
