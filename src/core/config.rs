//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.drafter/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DrafterConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub data_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EditorConfig {
    pub first_placeholder: Option<String>,
    pub placeholder: Option<String>,
    pub show_preview: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ThemeConfig {
    pub default_dark: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_FIRST_PLACEHOLDER: &str = "Start writing your text here...";
pub const DEFAULT_PLACEHOLDER: &str = "Continue your story...";
const APP_DIR: &str = ".drafter";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Where `storage.json` lives. `None` means in-memory (nothing persisted).
    pub data_dir: Option<PathBuf>,
    pub first_placeholder: String,
    pub placeholder: String,
    pub show_preview: bool,
    pub default_dark: bool,
}

/// Values taken from the command line (None/false = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub data_dir: Option<PathBuf>,
    pub ephemeral: bool,
    pub no_preview: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.drafter`.
pub fn app_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DIR))
}

/// Returns the path to `~/.drafter/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    app_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.drafter/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `DrafterConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<DrafterConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(DrafterConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(DrafterConfig::default());
    }

    load_config_from(&path)
}

/// Parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<DrafterConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: DrafterConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Drafter Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# data_dir = "~/.drafter"            # Or set DRAFTER_DATA_DIR env var

# [editor]
# first_placeholder = "Start writing your text here..."
# placeholder = "Continue your story..."
# show_preview = true

# [theme]
# default_dark = false               # Used until the theme is toggled once
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &DrafterConfig, cli: &CliOverrides) -> ResolvedConfig {
    let env_data_dir = std::env::var("DRAFTER_DATA_DIR").ok();
    resolve_with_env(config, cli, env_data_dir.as_deref())
}

fn resolve_with_env(
    config: &DrafterConfig,
    cli: &CliOverrides,
    env_data_dir: Option<&str>,
) -> ResolvedConfig {
    // Data dir: CLI → env → config → ~/.drafter; --ephemeral disables it
    let data_dir = if cli.ephemeral {
        None
    } else {
        cli.data_dir
            .clone()
            .or_else(|| env_data_dir.map(expand_home))
            .or_else(|| config.general.data_dir.as_deref().map(expand_home))
            .or_else(app_dir)
    };

    let show_preview = !cli.no_preview && config.editor.show_preview.unwrap_or(true);

    ResolvedConfig {
        data_dir,
        first_placeholder: config
            .editor
            .first_placeholder
            .clone()
            .unwrap_or_else(|| DEFAULT_FIRST_PLACEHOLDER.to_string()),
        placeholder: config
            .editor
            .placeholder
            .clone()
            .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
        show_preview,
        default_dark: config.theme.default_dark.unwrap_or(false),
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}
