// src/main.rs
use anyhow::Context;
use clap::Parser;
use highlight2notion::config::{
    default_settings_path, Command, CommandLineInput, SaveConfig, SelectionInput,
};
use highlight2notion::{
    ClipboardSelection, ConsoleNotifier, EnvOverride, FallbackPersister, HighlightController,
    NormalizedId, NotionPublisher, Selection, SelectionSource, SettingsFile, StdinSelection,
    StoredSettings, TextSelection,
};
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("highlight2notion.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    // Logs go to stderr so `show` output stays clean on stdout
    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(log_level)))
                .build("console", Box::new(console_appender)),
        )
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(LevelFilter::Debug),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Runs one save and returns whether it ended in failure.
async fn run_save(config: SaveConfig) -> bool {
    let source: Arc<dyn SelectionSource> = match config.input {
        SelectionInput::Text(text) => Arc::new(TextSelection::new(
            Selection::new(text).with_source(config.title, config.url),
        )),
        SelectionInput::Clipboard => Arc::new(ClipboardSelection::new(config.title, config.url)),
        SelectionInput::Stdin => Arc::new(StdinSelection::new(config.title, config.url)),
    };

    let settings = Arc::new(SettingsFile::new(config.settings_path));
    let controller = HighlightController::new(
        source,
        Arc::new(EnvOverride::from_env(settings)),
        Arc::new(NotionPublisher::new()),
        Arc::new(FallbackPersister::new(config.output_dir).with_clipboard(config.clipboard)),
        Arc::new(ConsoleNotifier),
    );

    controller.run().await.is_failure()
}

async fn configure(
    settings: SettingsFile,
    token: &str,
    target: &str,
    database: bool,
) -> anyhow::Result<()> {
    let stored =
        StoredSettings::validated(token, target, database).context("Settings not saved")?;

    if let Some(id) = NormalizedId::parse(target) {
        if !id.is_canonical() {
            eprintln!(
                "⚠️  '{}' does not look like a Notion page or database id; saves may fail.",
                id
            );
        }
    }

    settings
        .write(&stored)
        .await
        .with_context(|| format!("Could not write {}", settings.path().display()))?;
    println!("✓ Settings saved to {}", settings.path().display());
    println!("{}", stored.describe());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose).context("Could not initialize logging")?;

    let settings_path: Option<PathBuf> = cli.settings;
    match cli.command {
        Command::Save(args) => {
            if run_save(SaveConfig::resolve(args, settings_path)).await {
                std::process::exit(1);
            }
        }
        Command::Configure {
            token,
            target,
            database,
        } => {
            let settings = SettingsFile::new(settings_path.unwrap_or_else(default_settings_path));
            configure(settings, &token, &target, database).await?;
        }
        Command::Show => {
            let settings = SettingsFile::new(settings_path.unwrap_or_else(default_settings_path));
            let stored = settings.read().await?;
            println!("settings: {}", settings.path().display());
            println!("{}", stored.describe());
        }
        Command::Clear => {
            let settings = SettingsFile::new(settings_path.unwrap_or_else(default_settings_path));
            settings.clear().await?;
            println!("✓ Settings cleared");
        }
    }

    Ok(())
}
