// src/output/types.rs
//! Type definitions for output operations.
//!
//! A plan is built first and executed afterwards, so the fallback path can be
//! inspected without touching the filesystem.

use std::path::PathBuf;

/// Represents a complete output plan.
#[derive(Debug, Clone, Default)]
pub struct OutputPlan {
    /// Operations in execution order
    pub operations: Vec<DeliveryTarget>,
}

impl OutputPlan {
    /// Creates a new empty output plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an operation to the plan.
    pub fn with_operation(mut self, operation: DeliveryTarget) -> Self {
        self.operations.push(operation);
        self
    }
}

/// Represents a single output operation.
#[derive(Debug, Clone)]
pub enum DeliveryTarget {
    /// Write content to a file, creating parent directories
    WriteFile { path: PathBuf, content: String },
    /// Copy content to the system clipboard
    CopyToClipboard { content: String },
}

impl DeliveryTarget {
    /// Whether a failure of this operation should be reported to the user.
    pub fn is_required(&self) -> bool {
        matches!(self, DeliveryTarget::WriteFile { .. })
    }
}

/// Result of executing an output plan.
#[derive(Debug, Clone, Default)]
pub struct OutputReport {
    /// Successfully completed operations
    pub completed: Vec<CompletedOperation>,
    /// Failed operations with errors
    pub failed: Vec<FailedOperation>,
    /// Execution statistics
    pub stats: ExecutionStats,
}

impl OutputReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a completed operation to the report.
    pub fn with_completed(mut self, operation: CompletedOperation) -> Self {
        self.stats.operations_completed += 1;
        self.stats.bytes_written += operation.bytes_written;
        self.completed.push(operation);
        self
    }

    /// Adds a failed operation to the report.
    pub fn with_failed(mut self, operation: FailedOperation) -> Self {
        self.stats.operations_failed += 1;
        self.failed.push(operation);
        self
    }

    /// Failures of operations that had to succeed; best-effort ones are left out.
    pub fn required_failures(&self) -> Vec<String> {
        self.failed
            .iter()
            .filter(|f| f.operation.is_required())
            .map(|f| f.error.clone())
            .collect()
    }

    /// Path of the first file written, if any.
    pub fn written_file(&self) -> Option<&PathBuf> {
        self.completed.iter().find_map(|c| match &c.operation {
            DeliveryTarget::WriteFile { path, .. } => Some(path),
            DeliveryTarget::CopyToClipboard { .. } => None,
        })
    }
}

/// A successfully completed operation.
#[derive(Debug, Clone)]
pub struct CompletedOperation {
    pub operation: DeliveryTarget,
    pub bytes_written: usize,
}

/// A failed operation with error information.
#[derive(Debug, Clone)]
pub struct FailedOperation {
    pub operation: DeliveryTarget,
    pub error: String,
}

/// Execution statistics.
#[derive(Debug, Clone, Default)]
pub struct ExecutionStats {
    pub operations_completed: usize,
    pub operations_failed: usize,
    pub bytes_written: usize,
    pub total_duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipboard_failures_are_not_required() {
        let report = OutputReport::new()
            .with_completed(CompletedOperation {
                operation: DeliveryTarget::WriteFile {
                    path: PathBuf::from("highlight.md"),
                    content: "hi".to_string(),
                },
                bytes_written: 2,
            })
            .with_failed(FailedOperation {
                operation: DeliveryTarget::CopyToClipboard {
                    content: "hi".to_string(),
                },
                error: "no display".to_string(),
            });

        assert!(report.required_failures().is_empty());
        assert_eq!(report.written_file(), Some(&PathBuf::from("highlight.md")));
        assert_eq!(report.stats.bytes_written, 2);
        assert_eq!(report.stats.operations_failed, 1);
    }

    #[test]
    fn test_write_failure_is_required() {
        let report = OutputReport::new().with_failed(FailedOperation {
            operation: DeliveryTarget::WriteFile {
                path: PathBuf::from("/nope/highlight.md"),
                content: "hi".to_string(),
            },
            error: "permission denied".to_string(),
        });
        assert_eq!(report.required_failures(), vec!["permission denied"]);
        assert!(report.written_file().is_none());
    }
}
