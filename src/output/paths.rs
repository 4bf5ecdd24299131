// src/output/paths.rs
//! Pure functions for fallback file naming.

use crate::constants::{FALLBACK_FILE_EXTENSION, FALLBACK_FILE_PREFIX};
use chrono::{DateTime, SecondsFormat, Utc};

/// Name of the fallback file for a save at `now`,
/// e.g. `highlight-2026-10-19T08-15-30-123Z.md`.
pub fn fallback_filename(now: DateTime<Utc>) -> String {
    let stamp = now
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!(
        "{}{}.{}",
        FALLBACK_FILE_PREFIX,
        sanitize_filename(&stamp),
        FALLBACK_FILE_EXTENSION
    )
}

/// Sanitizes a string to be safe for use as a filename.
pub fn sanitize_filename(name: &str) -> String {
    let mut safe_name = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>();

    safe_name = safe_name.trim().trim_matches('.').to_string();

    if safe_name.len() > 100 {
        let mut cut = 100;
        while !safe_name.is_char_boundary(cut) {
            cut -= 1;
        }
        safe_name.truncate(cut);
    }

    if safe_name.is_empty() {
        safe_name = "unnamed".to_string();
    }

    safe_name
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Hello/World"), "Hello_World");
        assert_eq!(sanitize_filename("Test:File*Name"), "Test_File_Name");
        assert_eq!(sanitize_filename("   spaces   "), "spaces");
        assert_eq!(sanitize_filename("...dots..."), "dots");
        assert_eq!(sanitize_filename(""), "unnamed");
    }

    #[test]
    fn test_sanitize_truncates_on_char_boundary() {
        let long = "é".repeat(80);
        let safe = sanitize_filename(&long);
        assert!(safe.len() <= 100);
        assert!(safe.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_fallback_filename() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 8, 15, 30).unwrap()
            + chrono::Duration::milliseconds(123);
        assert_eq!(
            fallback_filename(now),
            "highlight-2026-10-19T08-15-30-123Z.md"
        );
    }

    #[test]
    fn test_fallback_filename_has_no_unsafe_characters() {
        let name = fallback_filename(Utc::now());
        assert!(name.starts_with("highlight-"));
        assert!(name.ends_with(".md"));
        assert!(!name.trim_end_matches(".md").contains(['.', ':', '/']));
    }
}
