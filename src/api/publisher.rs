// src/api/publisher.rs
//! Writes a highlight into its Notion target.
//!
//! A database target gets a new row titled `Highlight - <local time>` with the
//! blocks as its body. A page target gets the blocks appended directly, so
//! repeated saves do not pile up nested sub-pages.

use super::types::{AppendChildrenRequest, CreatePageRequest};
use super::{NotionHttpClient, NotionWriter};
use crate::constants::HIGHLIGHT_TITLE_PREFIX;
use crate::error::AppError;
use crate::model::ContentBlock;
use crate::pipeline::HighlightPublisher;
use crate::types::{ApiKey, NormalizedId};
use chrono::{DateTime, Local};

/// Where a highlight goes, decided once per save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishTarget {
    /// A new row is created in this database.
    Database(NormalizedId),
    /// Blocks are appended to this page.
    Page(NormalizedId),
}

impl PublishTarget {
    pub fn new(id: NormalizedId, is_database: bool) -> Self {
        if is_database {
            PublishTarget::Database(id)
        } else {
            PublishTarget::Page(id)
        }
    }

    pub fn id(&self) -> &NormalizedId {
        match self {
            PublishTarget::Database(id) | PublishTarget::Page(id) => id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PublishTarget::Database(_) => "database",
            PublishTarget::Page(_) => "page",
        }
    }
}

/// Title for a database row, e.g. `Highlight - 10/19/2026, 3:04:05 PM`.
pub fn highlight_title(now: DateTime<Local>) -> String {
    format!(
        "{}{}",
        HIGHLIGHT_TITLE_PREFIX,
        now.format("%-m/%-d/%Y, %-I:%M:%S %p")
    )
}

/// Issues the single write for `target`. Failures are returned, never retried.
pub async fn publish_blocks(
    writer: &dyn NotionWriter,
    target: &PublishTarget,
    blocks: &[ContentBlock],
) -> Result<serde_json::Value, AppError> {
    match target {
        PublishTarget::Database(database_id) => {
            let title = highlight_title(Local::now());
            log::info!("Creating '{}' in database {}", title, database_id);
            let request = CreatePageRequest::new(database_id, &title, blocks);
            writer.create_page(&request).await
        }
        PublishTarget::Page(page_id) => {
            log::info!("Appending {} block(s) to page {}", blocks.len(), page_id);
            let request = AppendChildrenRequest { children: blocks };
            writer.append_children(page_id, &request).await
        }
    }
}

/// Publishes over HTTP with a client built from the caller's credential.
#[derive(Debug, Clone)]
pub struct NotionPublisher {
    base_url: Option<String>,
}

impl NotionPublisher {
    /// Talks to the Notion API (or the `NOTION_API_BASE_URL` override).
    pub fn new() -> Self {
        Self { base_url: None }
    }

    /// Talks to `base_url` instead.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
        }
    }

    fn client(&self, credential: &ApiKey) -> Result<NotionHttpClient, AppError> {
        match &self.base_url {
            Some(base_url) => NotionHttpClient::with_base_url(credential, base_url.as_str()),
            None => NotionHttpClient::new(credential),
        }
    }
}

impl Default for NotionPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl HighlightPublisher for NotionPublisher {
    async fn publish(
        &self,
        credential: &ApiKey,
        target: &NormalizedId,
        is_database: bool,
        blocks: &[ContentBlock],
    ) -> Result<serde_json::Value, AppError> {
        let target = PublishTarget::new(target.clone(), is_database);
        log::debug!("Publishing to Notion {} {}", target.kind(), target.id());
        let client = self.client(credential)?;
        publish_blocks(&client, &target, blocks).await
    }
}
