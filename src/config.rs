// src/config.rs
use crate::constants::{API_KEY_ENV, SETTINGS_DIR_NAME, SETTINGS_FILE_NAME, SETTINGS_PATH_ENV};
use crate::error::AppError;
use crate::pipeline::ConfigProvider;
use crate::types::{ApiKey, NormalizedId, TargetConfig, ValidationError};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Settings file to use instead of the default location
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Save a selection to Notion, or to a local file if that is not possible
    Save(SaveArgs),

    /// Store the integration token and the target page or database
    Configure {
        /// Notion integration token
        #[arg(long)]
        token: String,

        /// Target page/database URL or ID
        #[arg(long)]
        target: String,

        /// The target is a database (a new row is created per save)
        #[arg(long, default_value_t = false)]
        database: bool,
    },

    /// Print the stored settings with the token redacted
    Show,

    /// Delete the stored settings
    Clear,
}

#[derive(Args, Debug)]
pub struct SaveArgs {
    /// Text to save (read from stdin when omitted)
    pub text: Option<String>,

    /// Save the current clipboard text
    #[arg(long, conflicts_with = "text", default_value_t = false)]
    pub from_clipboard: bool,

    /// Title of the page the text came from
    #[arg(long, default_value = "")]
    pub title: String,

    /// URL of the page the text came from
    #[arg(long, default_value = "")]
    pub url: String,

    /// Directory for fallback files (defaults to the current directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Do not copy fallback saves to the clipboard
    #[arg(long, default_value_t = false)]
    pub no_clipboard: bool,
}

/// Where the selection of a save comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionInput {
    Text(String),
    Clipboard,
    Stdin,
}

/// Resolved configuration for one `save`.
#[derive(Debug, Clone)]
pub struct SaveConfig {
    pub settings_path: PathBuf,
    pub input: SelectionInput,
    pub title: String,
    pub url: String,
    pub output_dir: PathBuf,
    pub clipboard: bool,
}

impl SaveConfig {
    /// Resolves a save from CLI arguments and the environment.
    pub fn resolve(args: SaveArgs, settings: Option<PathBuf>) -> Self {
        let input = match (args.text, args.from_clipboard) {
            (Some(text), _) => SelectionInput::Text(text),
            (None, true) => SelectionInput::Clipboard,
            (None, false) => SelectionInput::Stdin,
        };

        Self {
            settings_path: settings.unwrap_or_else(default_settings_path),
            input,
            title: args.title,
            url: args.url,
            output_dir: args.output_dir.unwrap_or_else(|| PathBuf::from(".")),
            clipboard: !args.no_clipboard,
        }
    }
}

/// Settings file location: `$HIGHLIGHT2NOTION_SETTINGS`, else the user config
/// directory, else the temp directory.
pub fn default_settings_path() -> PathBuf {
    if let Some(path) = non_empty_env(SETTINGS_PATH_ENV) {
        return PathBuf::from(path);
    }

    let config_dir = non_empty_env("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| non_empty_env("APPDATA").map(PathBuf::from))
        .or_else(|| non_empty_env("HOME").map(|home| Path::new(&home).join(".config")))
        .unwrap_or_else(std::env::temp_dir);

    config_dir.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME)
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// On-disk settings. Every key is optional; a missing key means "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notion_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notion_parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notion_parent_is_database: Option<bool>,
}

impl StoredSettings {
    /// Builds settings for saving. Both the token and the target are required.
    pub fn validated(
        token: &str,
        target: &str,
        is_database: bool,
    ) -> Result<Self, ValidationError> {
        let token = token.trim();
        let target = target.trim();
        if token.is_empty() {
            return Err(ValidationError::EmptyField("Notion integration token"));
        }
        if target.is_empty() {
            return Err(ValidationError::EmptyField("Notion parent page/database ID"));
        }

        Ok(Self {
            notion_token: Some(token.to_string()),
            notion_parent_id: Some(target.to_string()),
            notion_parent_is_database: Some(is_database),
        })
    }

    pub fn to_target_config(&self) -> TargetConfig {
        TargetConfig::new(
            self.notion_token.clone().unwrap_or_default(),
            self.notion_parent_id.clone().unwrap_or_default(),
            self.notion_parent_is_database.unwrap_or(false),
        )
    }

    /// Human-readable summary with the token redacted.
    pub fn describe(&self) -> String {
        let token = self
            .notion_token
            .as_deref()
            .and_then(|t| ApiKey::new(t).ok())
            .map(|key| key.redacted())
            .unwrap_or_else(|| "(not set)".to_string());
        let target = match self.notion_parent_id.as_deref().and_then(NormalizedId::parse) {
            Some(id) if id.is_canonical() => id.into_string(),
            Some(id) => format!("{} (unrecognized id)", id),
            None => "(not set)".to_string(),
        };
        let kind = if self.notion_parent_is_database.unwrap_or(false) {
            "database"
        } else {
            "page"
        };
        format!("token:  {}\ntarget: {}\nkind:   {}", token, target, kind)
    }
}

/// JSON settings file, read fresh on every load.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored settings. A missing file yields empty settings.
    pub async fn read(&self) -> Result<StoredSettings, AppError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings file at {}", self.path.display());
                return Ok(StoredSettings::default());
            }
            Err(e) => return Err(e.into()),
        };

        if text.trim().is_empty() {
            return Ok(StoredSettings::default());
        }

        serde_json::from_str(&text).map_err(|source| AppError::SettingsParse {
            path: self.path.clone(),
            source,
        })
    }

    pub async fn write(&self, settings: &StoredSettings) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(settings)?;
        tokio::fs::write(&self.path, json).await?;
        log::info!("Settings written to {}", self.path.display());
        Ok(())
    }

    /// Removes the settings file. Clearing absent settings is not an error.
    pub async fn clear(&self) -> Result<(), AppError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait::async_trait]
impl ConfigProvider for SettingsFile {
    async fn load(&self) -> Result<TargetConfig, AppError> {
        Ok(self.read().await?.to_target_config())
    }
}

/// Lets `NOTION_API_KEY` take precedence over the stored token.
pub struct EnvOverride {
    inner: Arc<dyn ConfigProvider>,
    api_key: Option<String>,
}

impl EnvOverride {
    pub fn new(inner: Arc<dyn ConfigProvider>, api_key: Option<String>) -> Self {
        Self { inner, api_key }
    }

    /// Reads the override from the environment.
    pub fn from_env(inner: Arc<dyn ConfigProvider>) -> Self {
        Self::new(inner, non_empty_env(API_KEY_ENV))
    }
}

#[async_trait::async_trait]
impl ConfigProvider for EnvOverride {
    async fn load(&self) -> Result<TargetConfig, AppError> {
        let mut config = self.inner.load().await?;
        if let Some(key) = &self.api_key {
            log::debug!("Using integration token from {}", API_KEY_ENV);
            config.credential = key.clone();
        }
        Ok(config)
    }
}
