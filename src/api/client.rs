// src/api/client.rs
//! Pure HTTP client wrapper for Notion API.
//!
//! This module provides a thin wrapper around reqwest for making
//! HTTP requests to the Notion API. It handles authentication and
//! basic request/response operations without business logic.

use crate::constants::{API_BASE_URL_ENV, NOTION_API_BASE_URL, NOTION_VERSION};
use crate::error::AppError;
use crate::types::{ApiKey, NormalizedId};
use reqwest::{header, Client, Response, Url};
use serde::Serialize;

use super::responses::{interpret_write_response, preview_body};
use super::types::{AppendChildrenRequest, CreatePageRequest};

/// Returns the API base URL, honouring the environment override.
pub fn api_base_url() -> String {
    std::env::var(API_BASE_URL_ENV)
        .ok()
        .map(|url| url.trim().trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| NOTION_API_BASE_URL.to_string())
}

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: Url,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        Self::with_base_url(api_key, api_base_url())
    }

    /// Creates a client that talks to `base_url` instead of api.notion.com.
    pub fn with_base_url(api_key: &ApiKey, base_url: impl Into<String>) -> Result<Self, AppError> {
        let base_url = base_url.into();
        let base_url = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            AppError::MissingConfiguration(format!("Invalid API base URL '{}': {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::MissingConfiguration(format!(
                "Invalid API base URL '{}'",
                base_url
            )));
        }

        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Joins `segments` onto the base URL. Each one is percent-encoded and
    /// stays a single path segment.
    pub fn endpoint_url(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AppError::MissingConfiguration(format!("Invalid API base URL '{}'", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        let mut auth_value = header::HeaderValue::from_str(&auth_header).map_err(|e| {
            AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
        })?;
        auth_value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth_value);

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a POST request with JSON body to `url`.
    pub async fn post<T: Serialize>(&self, url: Url, body: &T) -> Result<Response, AppError> {
        log::debug!("POST {}", url);
        Ok(self.client.post(url).json(body).send().await?)
    }

    /// Makes a PATCH request with JSON body to `url`.
    pub async fn patch<T: Serialize>(&self, url: Url, body: &T) -> Result<Response, AppError> {
        log::debug!("PATCH {}", url);
        Ok(self.client.patch(url).json(body).send().await?)
    }
}

#[async_trait::async_trait]
impl super::NotionWriter for NotionHttpClient {
    async fn create_page(
        &self,
        request: &CreatePageRequest<'_>,
    ) -> Result<serde_json::Value, AppError> {
        let url = self.endpoint_url(&["pages"])?;
        let response = self.post(url, request).await?;
        extract_write_result(response).await
    }

    async fn append_children(
        &self,
        page: &NormalizedId,
        request: &AppendChildrenRequest<'_>,
    ) -> Result<serde_json::Value, AppError> {
        let url = self.endpoint_url(&["blocks", page.as_str(), "children"])?;
        let response = self.patch(url, request).await?;
        extract_write_result(response).await
    }
}

/// Reads the response body and maps non-2xx statuses to
/// [`AppError::RemoteWrite`].
async fn extract_write_result(response: Response) -> Result<serde_json::Value, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    if status.is_success() {
        log::debug!("{} answered {}", url, status);
    } else {
        log::debug!("{} answered {}: {}", url, status, preview_body(&text));
    }

    interpret_write_response(status, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> NotionHttpClient {
        let key = ApiKey::new("secret_test_token").unwrap();
        NotionHttpClient::with_base_url(&key, base_url).unwrap()
    }

    #[test]
    fn test_endpoints_are_joined_under_the_versioned_base() {
        let client = client("https://api.notion.com/v1/");
        assert_eq!(
            client.endpoint_url(&["pages"]).unwrap().as_str(),
            "https://api.notion.com/v1/pages"
        );
        assert_eq!(
            client
                .endpoint_url(&["blocks", "550e8400-e29b-41d4-a716-446655440000", "children"])
                .unwrap()
                .as_str(),
            "https://api.notion.com/v1/blocks/550e8400-e29b-41d4-a716-446655440000/children"
        );
    }

    #[test]
    fn test_unrecognized_id_stays_a_single_path_segment() {
        let client = client("http://localhost:8080/v1");
        let url = client
            .endpoint_url(&["blocks", "my-page?x=1#top/../pages", "children"])
            .unwrap();

        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
        assert_eq!(
            url.path_segments().unwrap().collect::<Vec<_>>(),
            vec!["v1", "blocks", "my-page%3Fx=1%23top%2F..%2Fpages", "children"]
        );
    }

    #[test]
    fn test_base_without_path_still_joins() {
        let client = client("http://localhost:8080");
        assert_eq!(client.endpoint_url(&["pages"]).unwrap().path(), "/pages");
    }

    #[test]
    fn test_invalid_base_url_is_a_configuration_error() {
        let key = ApiKey::new("secret_test_token").unwrap();
        assert!(matches!(
            NotionHttpClient::with_base_url(&key, "not a url"),
            Err(AppError::MissingConfiguration(_))
        ));
    }
}
