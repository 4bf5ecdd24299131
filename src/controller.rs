// src/controller.rs
//! Runs one highlight save from capture to notification.
//!
//! ```text
//! capture ─ blank? ──────────────────────────────▶ NothingSelected
//!    │
//! settings ─ configured? ─ no ─┐
//!    │ yes                     ▼
//! publish ─ error ──────▶ fall back ─ written ───▶ FallbackSaved
//!    │ ok                      └─ write failed ──▶ Failed
//!    ▼
//! Published
//! ```
//!
//! Every error is absorbed here. The caller only ever sees the outcome, and
//! the notifier hears about it exactly once.

use crate::error::AppError;
use crate::model::build_content_blocks;
use crate::pipeline::{
    ConfigProvider, HighlightPublisher, LocalPersister, Notifier, SelectionSource,
};
use crate::types::{ApiKey, NormalizedId, Selection, TargetConfig};
use std::fmt;
use std::sync::Arc;

/// How a save ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Written to Notion.
    Published,
    /// Written to a local file instead.
    FallbackSaved,
    /// The selection was blank; nothing was done.
    NothingSelected,
    /// Neither Notion nor the local file could be written.
    Failed,
}

impl PublishOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, PublishOutcome::Failed)
    }
}

impl fmt::Display for PublishOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PublishOutcome::Published => "published",
            PublishOutcome::FallbackSaved => "fallback-saved",
            PublishOutcome::NothingSelected => "nothing-selected",
            PublishOutcome::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Credential and target that are both present.
#[derive(Debug, Clone)]
pub struct RemoteTarget {
    pub credential: ApiKey,
    pub id: NormalizedId,
    pub is_database: bool,
}

impl RemoteTarget {
    /// `None` unless both the credential and the identifier are non-empty.
    pub fn resolve(config: &TargetConfig) -> Option<Self> {
        let id = NormalizedId::parse(&config.raw_identifier)?;
        let credential = ApiKey::new(config.credential.as_str()).ok()?;

        if !id.is_canonical() {
            log::warn!(
                "Notion target '{}' is not a recognizable page or database id; trying it as-is",
                id
            );
        }

        Some(Self {
            credential,
            id,
            is_database: config.is_database,
        })
    }
}

/// Wires the collaborators of a save together.
pub struct HighlightController {
    source: Arc<dyn SelectionSource>,
    settings: Arc<dyn ConfigProvider>,
    publisher: Arc<dyn HighlightPublisher>,
    fallback: Arc<dyn LocalPersister>,
    notifier: Arc<dyn Notifier>,
}

impl HighlightController {
    pub fn new(
        source: Arc<dyn SelectionSource>,
        settings: Arc<dyn ConfigProvider>,
        publisher: Arc<dyn HighlightPublisher>,
        fallback: Arc<dyn LocalPersister>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            source,
            settings,
            publisher,
            fallback,
            notifier,
        }
    }

    /// Runs one save and notifies its outcome.
    pub async fn run(&self) -> PublishOutcome {
        let outcome = self.save().await;
        log::debug!("Save finished: {}", outcome);
        self.notifier.notify(outcome).await;
        outcome
    }

    async fn save(&self) -> PublishOutcome {
        let selection = self.capture().await;
        if selection.is_blank() {
            log::info!("Nothing selected");
            return PublishOutcome::NothingSelected;
        }
        log::debug!(
            "Captured {} characters from '{}' ({})",
            selection.trimmed().len(),
            selection.title,
            selection.url
        );
        let text = selection.trimmed();

        match RemoteTarget::resolve(&self.load_settings().await) {
            Some(target) => match self.publish(text, &target).await {
                Ok(_) => {
                    log::info!("Saved to Notion {} {}", kind(&target), target.id);
                    return PublishOutcome::Published;
                }
                Err(e) => {
                    log::error!("Failed to save to Notion: {}", e);
                    if let AppError::RemoteWrite { code, .. } = &e {
                        if code.is_configuration_problem() {
                            log::warn!(
                                "Notion rejected the target ({}); check the saved token and \
                                 that the page or database is shared with the integration",
                                code
                            );
                        }
                    }
                }
            },
            None => log::info!("No Notion target configured; saving locally"),
        }

        self.fall_back(text).await
    }

    async fn capture(&self) -> Selection {
        self.source.capture().await.unwrap_or_else(|e| {
            log::warn!("Could not read the selection: {}", e);
            Selection::default()
        })
    }

    async fn load_settings(&self) -> TargetConfig {
        self.settings.load().await.unwrap_or_else(|e| {
            log::warn!("Could not read settings, treating as unconfigured: {}", e);
            TargetConfig::unconfigured()
        })
    }

    async fn publish(&self, text: &str, target: &RemoteTarget) -> Result<(), AppError> {
        let blocks = build_content_blocks(text);
        self.publisher
            .publish(&target.credential, &target.id, target.is_database, &blocks)
            .await?;
        Ok(())
    }

    async fn fall_back(&self, text: &str) -> PublishOutcome {
        match self.fallback.persist_locally(text).await {
            Ok(path) => {
                log::info!("Saved locally to {}", path.display());
                PublishOutcome::FallbackSaved
            }
            Err(e) => {
                log::error!("Error saving highlight: {}", e);
                PublishOutcome::Failed
            }
        }
    }
}

fn kind(target: &RemoteTarget) -> &'static str {
    if target.is_database {
        "database"
    } else {
        "page"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentBlock;
    use std::path::PathBuf;
    use std::sync::Mutex;

    const PAGE: &str = "https://www.notion.so/Inbox-550e8400e29b41d4a716446655440000";

    struct FixedSelection(Result<Selection, String>);

    #[async_trait::async_trait]
    impl SelectionSource for FixedSelection {
        async fn capture(&self) -> Result<Selection, AppError> {
            self.0.clone().map_err(AppError::Capture)
        }
    }

    struct FixedSettings(TargetConfig);

    #[async_trait::async_trait]
    impl ConfigProvider for FixedSettings {
        async fn load(&self) -> Result<TargetConfig, AppError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenSettings;

    #[async_trait::async_trait]
    impl ConfigProvider for BrokenSettings {
        async fn load(&self) -> Result<TargetConfig, AppError> {
            Err(AppError::MissingConfiguration("store unavailable".to_string()))
        }
    }

    #[derive(Default)]
    struct FakePublisher {
        fail: bool,
        calls: Mutex<Vec<(String, bool, Vec<ContentBlock>)>>,
    }

    #[async_trait::async_trait]
    impl HighlightPublisher for FakePublisher {
        async fn publish(
            &self,
            _credential: &ApiKey,
            target: &NormalizedId,
            is_database: bool,
            blocks: &[ContentBlock],
        ) -> Result<serde_json::Value, AppError> {
            self.calls
                .lock()
                .unwrap()
                .push((target.to_string(), is_database, blocks.to_vec()));
            if self.fail {
                Err(AppError::RemoteWrite {
                    code: crate::error::NotionErrorCode::Unauthorized,
                    status: reqwest::StatusCode::UNAUTHORIZED,
                    body: "{}".to_string(),
                })
            } else {
                Ok(serde_json::Value::Null)
            }
        }
    }

    #[derive(Default)]
    struct FakeFallback {
        fail: bool,
        saved: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl LocalPersister for FakeFallback {
        async fn persist_locally(&self, selection_text: &str) -> Result<PathBuf, AppError> {
            if self.fail {
                return Err(AppError::LocalPersist {
                    failures: vec!["disk full".to_string()],
                });
            }
            self.saved.lock().unwrap().push(selection_text.to_string());
            Ok(PathBuf::from("highlight.md"))
        }
    }

    #[derive(Default)]
    struct RecordingNotifier(Mutex<Vec<PublishOutcome>>);

    #[async_trait::async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, outcome: PublishOutcome) {
            self.0.lock().unwrap().push(outcome);
        }
    }

    struct Harness {
        publisher: Arc<FakePublisher>,
        fallback: Arc<FakeFallback>,
        notifier: Arc<RecordingNotifier>,
        controller: HighlightController,
    }

    fn harness(
        selection: Result<Selection, String>,
        settings: Arc<dyn ConfigProvider>,
        publisher: FakePublisher,
        fallback: FakeFallback,
    ) -> Harness {
        let publisher = Arc::new(publisher);
        let fallback = Arc::new(fallback);
        let notifier = Arc::new(RecordingNotifier::default());
        let controller = HighlightController::new(
            Arc::new(FixedSelection(selection)),
            settings,
            publisher.clone(),
            fallback.clone(),
            notifier.clone(),
        );
        Harness {
            publisher,
            fallback,
            notifier,
            controller,
        }
    }

    fn configured(is_database: bool) -> Arc<dyn ConfigProvider> {
        Arc::new(FixedSettings(TargetConfig::new(
            "secret_test_token_123456",
            PAGE,
            is_database,
        )))
    }

    #[tokio::test]
    async fn test_blank_selection_does_nothing() {
        let h = harness(
            Ok(Selection::new("  \n\t")),
            configured(false),
            FakePublisher::default(),
            FakeFallback::default(),
        );

        assert_eq!(h.controller.run().await, PublishOutcome::NothingSelected);
        assert!(h.publisher.calls.lock().unwrap().is_empty());
        assert!(h.fallback.saved.lock().unwrap().is_empty());
        assert_eq!(
            *h.notifier.0.lock().unwrap(),
            vec![PublishOutcome::NothingSelected]
        );
    }

    #[tokio::test]
    async fn test_configured_page_is_published() {
        let h = harness(
            Ok(Selection::new(" Hello \n\n world ")),
            configured(false),
            FakePublisher::default(),
            FakeFallback::default(),
        );

        assert_eq!(h.controller.run().await, PublishOutcome::Published);

        let calls = h.publisher.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (target, is_database, blocks) = &calls[0];
        assert_eq!(target, "550e8400-e29b-41d4-a716-446655440000");
        assert!(!is_database);
        assert_eq!(
            blocks,
            &vec![ContentBlock::paragraph("Hello"), ContentBlock::paragraph("world")]
        );
        assert!(h.fallback.saved.lock().unwrap().is_empty());
        assert_eq!(*h.notifier.0.lock().unwrap(), vec![PublishOutcome::Published]);
    }

    #[tokio::test]
    async fn test_database_flag_is_passed_through() {
        let h = harness(
            Ok(Selection::new("Hello")),
            configured(true),
            FakePublisher::default(),
            FakeFallback::default(),
        );

        assert_eq!(h.controller.run().await, PublishOutcome::Published);
        assert!(h.publisher.calls.lock().unwrap()[0].1);
    }

    #[tokio::test]
    async fn test_missing_credential_falls_back_without_publishing() {
        let settings = Arc::new(FixedSettings(TargetConfig::new("", PAGE, false)));
        let h = harness(
            Ok(Selection::new("Hello")),
            settings,
            FakePublisher::default(),
            FakeFallback::default(),
        );

        assert_eq!(h.controller.run().await, PublishOutcome::FallbackSaved);
        assert!(h.publisher.calls.lock().unwrap().is_empty());
        assert_eq!(*h.fallback.saved.lock().unwrap(), vec!["Hello"]);
    }

    #[tokio::test]
    async fn test_missing_target_falls_back() {
        let settings = Arc::new(FixedSettings(TargetConfig::new(
            "secret_test_token_123456",
            "   ",
            false,
        )));
        let h = harness(
            Ok(Selection::new("Hello")),
            settings,
            FakePublisher::default(),
            FakeFallback::default(),
        );

        assert_eq!(h.controller.run().await, PublishOutcome::FallbackSaved);
        assert!(h.publisher.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back() {
        let h = harness(
            Ok(Selection::new("Hello")),
            configured(false),
            FakePublisher {
                fail: true,
                ..FakePublisher::default()
            },
            FakeFallback::default(),
        );

        assert_eq!(h.controller.run().await, PublishOutcome::FallbackSaved);
        assert_eq!(h.publisher.calls.lock().unwrap().len(), 1);
        assert_eq!(*h.fallback.saved.lock().unwrap(), vec!["Hello"]);
        assert_eq!(
            *h.notifier.0.lock().unwrap(),
            vec![PublishOutcome::FallbackSaved]
        );
    }

    #[tokio::test]
    async fn test_failed_local_write_is_reported_once() {
        let h = harness(
            Ok(Selection::new("Hello")),
            configured(false),
            FakePublisher {
                fail: true,
                ..FakePublisher::default()
            },
            FakeFallback {
                fail: true,
                ..FakeFallback::default()
            },
        );

        assert_eq!(h.controller.run().await, PublishOutcome::Failed);
        assert_eq!(*h.notifier.0.lock().unwrap(), vec![PublishOutcome::Failed]);
    }

    #[tokio::test]
    async fn test_unreadable_settings_mean_unconfigured() {
        let h = harness(
            Ok(Selection::new("Hello")),
            Arc::new(BrokenSettings),
            FakePublisher::default(),
            FakeFallback::default(),
        );

        assert_eq!(h.controller.run().await, PublishOutcome::FallbackSaved);
        assert!(h.publisher.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_capture_failure_counts_as_nothing_selected() {
        let h = harness(
            Err("no active tab".to_string()),
            configured(false),
            FakePublisher::default(),
            FakeFallback::default(),
        );

        assert_eq!(h.controller.run().await, PublishOutcome::NothingSelected);
        assert!(h.fallback.saved.lock().unwrap().is_empty());
    }

    #[test]
    fn test_degraded_identifier_still_counts_as_configured() {
        let config = TargetConfig::new("secret_test_token_123456", "my-page", false);
        let target = RemoteTarget::resolve(&config).expect("configured");
        assert_eq!(target.id.as_str(), "my-page");
        assert!(!target.id.is_canonical());
    }
}
