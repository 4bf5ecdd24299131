// src/output/clipboard.rs
//! Platform-specific clipboard operations.
//!
//! arboard is tried first; when it cannot reach a clipboard the platform's
//! command-line tool is spawned instead.

use crate::error::AppError;
use std::io::Write;
use std::process::{Command, Stdio};

/// Copies content to the system clipboard.
pub fn copy_to_clipboard(content: &str) -> Result<(), AppError> {
    log::debug!("Copying {} characters to clipboard", content.len());

    // Try arboard first (cross-platform)
    match try_arboard_clipboard(content) {
        Ok(()) => {
            log::debug!("Content copied to clipboard using arboard");
            return Ok(());
        }
        Err(e) => {
            log::debug!("Arboard failed: {}, trying platform-specific methods", e);
        }
    }

    copy_with_platform_command(content)
}

/// Reads the current clipboard text.
pub fn read_clipboard_text() -> Result<String, AppError> {
    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| AppError::Clipboard(format!("Failed to access clipboard: {}", e)))?;
    Ok(clipboard.get_text()?)
}

/// Tries to copy using the arboard crate.
fn try_arboard_clipboard(content: &str) -> Result<(), AppError> {
    use arboard::Clipboard;

    let mut clipboard = Clipboard::new()
        .map_err(|e| AppError::Clipboard(format!("Failed to access clipboard: {}", e)))?;

    clipboard
        .set_text(content)
        .map_err(|e| AppError::Clipboard(format!("Failed to set clipboard text: {}", e)))?;

    Ok(())
}

const NO_ARGS: &[&str] = &[];

/// Picks the clipboard tool for this platform and pipes the content into it.
fn copy_with_platform_command(content: &str) -> Result<(), AppError> {
    let (program, args) = platform_clipboard_command()?;
    pipe_into_command(program, args, content)
}

#[cfg(target_os = "linux")]
const XCLIP_ARGS: &[&str] = &["-selection", "clipboard"];

#[cfg(target_os = "linux")]
fn platform_clipboard_command() -> Result<(&'static str, &'static [&'static str]), AppError> {
    let is_wayland = std::env::var("WAYLAND_DISPLAY").is_ok()
        || std::env::var("XDG_SESSION_TYPE").is_ok_and(|s| s == "wayland");

    if is_wayland {
        Ok(("wl-copy", NO_ARGS))
    } else {
        Ok(("xclip", XCLIP_ARGS))
    }
}

#[cfg(target_os = "macos")]
fn platform_clipboard_command() -> Result<(&'static str, &'static [&'static str]), AppError> {
    Ok(("pbcopy", NO_ARGS))
}

#[cfg(target_os = "windows")]
fn platform_clipboard_command() -> Result<(&'static str, &'static [&'static str]), AppError> {
    Ok(("clip", NO_ARGS))
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn platform_clipboard_command() -> Result<(&'static str, &'static [&'static str]), AppError> {
    Err(AppError::Clipboard(
        "Clipboard not supported on this platform".to_string(),
    ))
}

/// Spawns `program`, writes `content` to its stdin and waits for it to exit.
fn pipe_into_command(program: &str, args: &[&str], content: &str) -> Result<(), AppError> {
    log::debug!("Attempting to copy with {}", program);

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        // xclip and wl-copy leave a daemon holding inherited pipes open
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| AppError::Clipboard(format!("Failed to spawn {}: {}", program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(content.as_bytes())
            .map_err(|e| AppError::Clipboard(format!("Failed to write to {}: {}", program, e)))?;
    }

    let status = child
        .wait()
        .map_err(|e| AppError::Clipboard(format!("Failed to wait for {}: {}", program, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(AppError::Clipboard(format!("{} exited with {}", program, status)))
    }
}
