// src/lib.rs
//! highlight2notion library — saves selected text into Notion.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Controller** — `HighlightController`, `PublishOutcome`
//! - **Collaborators** — `SelectionSource`, `ConfigProvider`, `HighlightPublisher`,
//!   `LocalPersister`, `Notifier`
//! - **Normalization and content** — `normalize_notion_id`, `build_content_blocks`
//! - **Notion API** — `NotionPublisher`, `NotionHttpClient`, `PublishTarget`
//! - **Local fallback** — `FallbackPersister`
//! - **Configuration** — `CommandLineInput`, `SettingsFile`, `EnvOverride`

pub mod api;
pub mod capture;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod model;
pub mod notify;
pub mod output;
pub mod pipeline;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Controller ---
pub use crate::controller::{HighlightController, PublishOutcome, RemoteTarget};

// --- Pipeline Traits ---
pub use crate::pipeline::{
    ConfigProvider, HighlightPublisher, LocalPersister, Notifier, SelectionSource,
};

// --- Domain Types ---
pub use crate::types::{normalize_notion_id, ApiKey, NormalizedId, Selection, TargetConfig};

// --- Content ---
pub use crate::model::{build_content_blocks, ContentBlock};

// --- API Client ---
pub use crate::api::{
    highlight_title, publish_blocks, NotionHttpClient, NotionPublisher, NotionWriter,
    PublishTarget,
};

// --- Local Fallback ---
pub use crate::output::{fallback_filename, FallbackPersister};

// --- Host Collaborators ---
pub use crate::capture::{ClipboardSelection, StdinSelection, TextSelection};
pub use crate::config::{EnvOverride, SettingsFile, StoredSettings};
pub use crate::notify::{ConsoleNotifier, Notification};
