// src/pipeline.rs
//! Pipeline capability traits — the collaborators of a highlight save.
//!
//! Each trait describes a single capability, so the controller can be driven
//! by the CLI, a host integration, or in-memory fakes in tests.

use crate::controller::PublishOutcome;
use crate::error::AppError;
use crate::model::ContentBlock;
use crate::types::{ApiKey, NormalizedId, Selection, TargetConfig};
use std::path::PathBuf;

/// Reads the user's current selection.
#[async_trait::async_trait]
pub trait SelectionSource: Send + Sync {
    async fn capture(&self) -> Result<Selection, AppError>;
}

/// Reads the save target settings. Missing values mean "not configured".
#[async_trait::async_trait]
pub trait ConfigProvider: Send + Sync {
    async fn load(&self) -> Result<TargetConfig, AppError>;
}

/// Writes blocks into a Notion page or database.
#[async_trait::async_trait]
pub trait HighlightPublisher: Send + Sync {
    async fn publish(
        &self,
        credential: &ApiKey,
        target: &NormalizedId,
        is_database: bool,
        blocks: &[ContentBlock],
    ) -> Result<serde_json::Value, AppError>;
}

/// Keeps a selection locally when it cannot be published.
#[async_trait::async_trait]
pub trait LocalPersister: Send + Sync {
    /// Returns the path of the written artifact.
    async fn persist_locally(&self, selection_text: &str) -> Result<PathBuf, AppError>;
}

/// Tells the user how a save ended. Fire-and-forget.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, outcome: PublishOutcome);
}
