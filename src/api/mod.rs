// src/api/mod.rs
//! Notion API interaction — the ability to write content into a workspace.
//!
//! I/O lives in [`client`], request shapes in [`types`], response
//! interpretation in [`responses`] and the page-vs-database decision in
//! [`publisher`].

pub mod client;
pub mod publisher;
pub mod responses;
pub mod types;

use crate::error::AppError;
use crate::types::NormalizedId;
use types::{AppendChildrenRequest, CreatePageRequest};

/// The two writes a highlight save can make.
///
/// Publishing logic depends on this trait, never on HTTP details.
#[async_trait::async_trait]
pub trait NotionWriter: Send + Sync {
    /// `POST /v1/pages`
    async fn create_page(
        &self,
        request: &CreatePageRequest<'_>,
    ) -> Result<serde_json::Value, AppError>;

    /// `PATCH /v1/blocks/{page}/children`
    async fn append_children(
        &self,
        page: &NormalizedId,
        request: &AppendChildrenRequest<'_>,
    ) -> Result<serde_json::Value, AppError>;
}

// Re-export the public interface
pub use client::NotionHttpClient;
pub use publisher::{highlight_title, publish_blocks, NotionPublisher, PublishTarget};
