// src/output/mod.rs
//! Local fallback for selections that could not be published.
//!
//! The selection is written to a timestamped file and, best effort, copied to
//! the clipboard. Only the file write can fail the fallback.

mod clipboard;
mod paths;
mod types;
mod writer;

pub use clipboard::{copy_to_clipboard, read_clipboard_text};
pub use paths::{fallback_filename, sanitize_filename};
pub use types::{DeliveryTarget, OutputPlan, OutputReport};
pub use writer::deliver;

use crate::error::AppError;
use crate::pipeline::LocalPersister;
use chrono::Utc;
use std::path::PathBuf;

/// Writes fallback artifacts into a directory.
#[derive(Debug, Clone)]
pub struct FallbackPersister {
    output_dir: PathBuf,
    clipboard: bool,
}

impl FallbackPersister {
    /// Persists into `output_dir` and copies to the clipboard.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            clipboard: true,
        }
    }

    /// Enables or disables the clipboard copy.
    pub fn with_clipboard(mut self, clipboard: bool) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// The operations a fallback save performs, in order.
    pub fn plan(&self, selection_text: &str) -> OutputPlan {
        let content = selection_text.trim().to_string();
        let path = self.output_dir.join(fallback_filename(Utc::now()));

        let mut plan = OutputPlan::new().with_operation(DeliveryTarget::WriteFile {
            path,
            content: content.clone(),
        });
        if self.clipboard {
            plan = plan.with_operation(DeliveryTarget::CopyToClipboard { content });
        }
        plan
    }
}

#[async_trait::async_trait]
impl LocalPersister for FallbackPersister {
    async fn persist_locally(&self, selection_text: &str) -> Result<PathBuf, AppError> {
        let plan = self.plan(selection_text);
        let report = tokio::task::spawn_blocking(move || deliver(plan)).await?;

        for failure in &report.failed {
            if !failure.operation.is_required() {
                log::trace!("Ignoring clipboard failure: {}", failure.error);
            }
        }

        let failures = report.required_failures();
        if !failures.is_empty() {
            return Err(AppError::LocalPersist { failures });
        }

        report.written_file().cloned().ok_or_else(|| AppError::InternalError {
            message: "Fallback plan finished without writing a file".to_string(),
            source: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_writes_trimmed_text_then_copies() {
        let persister = FallbackPersister::new("/tmp/highlights");
        let plan = persister.plan("  Hello \n");

        assert_eq!(plan.operations.len(), 2);
        match &plan.operations[0] {
            DeliveryTarget::WriteFile { path, content } => {
                assert_eq!(content, "Hello");
                assert!(path.starts_with("/tmp/highlights"));
                let name = path.file_name().unwrap().to_string_lossy();
                assert!(name.starts_with("highlight-") && name.ends_with(".md"));
            }
            other => panic!("expected a file write first, got {:?}", other),
        }
        assert!(matches!(
            &plan.operations[1],
            DeliveryTarget::CopyToClipboard { content } if content == "Hello"
        ));
    }

    #[test]
    fn test_plan_without_clipboard() {
        let plan = FallbackPersister::new(".").with_clipboard(false).plan("x");
        assert_eq!(plan.operations.len(), 1);
    }

    #[tokio::test]
    async fn test_persist_writes_exact_text() {
        let dir = tempfile::tempdir().unwrap();
        let persister = FallbackPersister::new(dir.path()).with_clipboard(false);

        let path = persister.persist_locally("\n  Hello  \n").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Hello");
        assert_eq!(path.parent(), Some(dir.path()));
    }

    #[tokio::test]
    async fn test_unwritable_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();
        let persister = FallbackPersister::new(&blocker).with_clipboard(false);

        let err = persister.persist_locally("Hello").await.unwrap_err();
        assert!(matches!(err, AppError::LocalPersist { .. }));
    }
}
