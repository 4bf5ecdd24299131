// src/capture.rs
//! Selection sources for a terminal host.

use crate::error::AppError;
use crate::output::read_clipboard_text;
use crate::pipeline::SelectionSource;
use crate::types::Selection;
use tokio::io::AsyncReadExt;

/// A selection handed over up front, e.g. as a command-line argument.
#[derive(Debug, Clone)]
pub struct TextSelection(Selection);

impl TextSelection {
    pub fn new(selection: Selection) -> Self {
        Self(selection)
    }
}

#[async_trait::async_trait]
impl SelectionSource for TextSelection {
    async fn capture(&self) -> Result<Selection, AppError> {
        Ok(self.0.clone())
    }
}

/// Reads the selection text from standard input until EOF.
#[derive(Debug, Clone, Default)]
pub struct StdinSelection {
    title: String,
    url: String,
}

impl StdinSelection {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

#[async_trait::async_trait]
impl SelectionSource for StdinSelection {
    async fn capture(&self) -> Result<Selection, AppError> {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .map_err(|e| AppError::Capture(format!("stdin: {}", e)))?;
        Ok(Selection::new(text).with_source(self.title.as_str(), self.url.as_str()))
    }
}

/// Uses whatever text is currently on the clipboard as the selection.
#[derive(Debug, Clone, Default)]
pub struct ClipboardSelection {
    title: String,
    url: String,
}

impl ClipboardSelection {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

#[async_trait::async_trait]
impl SelectionSource for ClipboardSelection {
    async fn capture(&self) -> Result<Selection, AppError> {
        let text = tokio::task::spawn_blocking(read_clipboard_text).await??;
        Ok(Selection::new(text).with_source(self.title.as_str(), self.url.as_str()))
    }
}
