// src/constants.rs
//! Domain constants that define the operational boundaries of the system.

// ---------------------------------------------------------------------------
// Notion API
// ---------------------------------------------------------------------------

/// API version sent with every request in the `Notion-Version` header.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Base URL of the public Notion API.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// Environment variable that overrides [`NOTION_API_BASE_URL`].
pub const API_BASE_URL_ENV: &str = "NOTION_API_BASE_URL";

/// Title property every Notion database has unless renamed.
pub const DATABASE_TITLE_PROPERTY: &str = "Name";

/// Prefix of the title given to rows created in a database.
pub const HIGHLIGHT_TITLE_PREFIX: &str = "Highlight - ";

// ---------------------------------------------------------------------------
// Local fallback
// ---------------------------------------------------------------------------

/// Prefix of the fallback file name; a sanitized timestamp follows.
pub const FALLBACK_FILE_PREFIX: &str = "highlight-";

/// Extension of the fallback file.
pub const FALLBACK_FILE_EXTENSION: &str = "md";

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Environment variable that overrides the stored integration token.
pub const API_KEY_ENV: &str = "NOTION_API_KEY";

/// Environment variable that points at a settings file.
pub const SETTINGS_PATH_ENV: &str = "HIGHLIGHT2NOTION_SETTINGS";

/// Directory under the user config dir that holds the settings file.
pub const SETTINGS_DIR_NAME: &str = "highlight2notion";

/// Settings file name.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
