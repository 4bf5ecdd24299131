// src/notify.rs
//! User-facing outcome messages.

use crate::controller::PublishOutcome;
use crate::pipeline::Notifier;

/// A fixed title and message for one outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    pub title: &'static str,
    pub message: &'static str,
}

impl Notification {
    pub fn for_outcome(outcome: PublishOutcome) -> Self {
        match outcome {
            PublishOutcome::NothingSelected => Self {
                title: "Nothing selected",
                message: "Please select some text before using Save to Notion.",
            },
            PublishOutcome::Published => Self {
                title: "Saved to Notion",
                message: "Selection saved.",
            },
            PublishOutcome::FallbackSaved => Self {
                title: "Saved locally",
                message: "No Notion target configured — saved markdown and copied to clipboard.",
            },
            PublishOutcome::Failed => Self {
                title: "Save failed",
                message: "See the log for details.",
            },
        }
    }
}

/// Prints the notification to the terminal. Failures go to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

#[async_trait::async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, outcome: PublishOutcome) {
        let note = Notification::for_outcome(outcome);
        match outcome {
            PublishOutcome::Published | PublishOutcome::FallbackSaved => {
                println!("✓ {}: {}", note.title, note.message)
            }
            PublishOutcome::NothingSelected => {
                eprintln!("⚠️  {}: {}", note.title, note.message)
            }
            PublishOutcome::Failed => eprintln!("✗ {}: {}", note.title, note.message),
        }
    }
}
