//! Configuration management for Reseña.
//!
//! Loads configuration from ${RESENA_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_BASE_URL;

/// Environment variable overriding `api.base_url`.
pub const BASE_URL_ENV: &str = "RESENA_BASE_URL";

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for configuration and log files.
    //!
    //! `RESENA_HOME` resolution order:
    //! 1. `RESENA_HOME` environment variable (if set)
    //! 2. ~/.config/resena (default)
    //! 3. ./.resena when no home directory can be determined

    use std::path::PathBuf;

    pub fn home_dir() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .map(PathBuf::from)
    }

    pub fn resena_home() -> PathBuf {
        if let Some(home) = std::env::var_os("RESENA_HOME").filter(|h| !h.is_empty()) {
            return PathBuf::from(home);
        }
        home_dir().map_or_else(
            || PathBuf::from(".resena"),
            |h| h.join(".config").join("resena"),
        )
    }

    pub fn config_path() -> PathBuf {
        resena_home().join("config.toml")
    }

    pub fn logs_dir() -> PathBuf {
        resena_home().join("logs")
    }
}

/// Service connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix.
    pub base_url: String,
    /// Per-request timeout in seconds (0 disables).
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 0,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter used when `RESENA_LOG` is unset.
    pub level: String,
    /// Whether the terminal UI writes a log file.
    pub file: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: true,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub log: LogConfig,
}

impl Config {
    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the commented default template to `path`.
    ///
    /// # Errors
    /// Fails if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            bail!("Config file already exists at {}", path.display());
        }
        Self::write_config(path, default_config_template())
    }

    /// Resolves the base URL with precedence: override > env > config.
    ///
    /// Only the winning candidate is validated: a broken `base_url` in the
    /// file can still be bypassed with the flag or the environment.
    ///
    /// # Errors
    /// Returns an error if the selected URL is not a valid http(s) URL.
    pub fn resolve_base_url(&self, override_url: Option<&str>) -> Result<String> {
        let env_url = std::env::var(BASE_URL_ENV).ok();
        let candidate = [override_url, env_url.as_deref(), Some(self.api.base_url.as_str())]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BASE_URL);
        validate_base_url(candidate)?;
        Ok(candidate.to_string())
    }

    /// Saves only `api.base_url` to the default config file.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the file cannot be written.
    pub fn save_base_url(url: &str) -> Result<()> {
        Self::save_base_url_to(&paths::config_path(), url)
    }

    /// Saves only `api.base_url` to a specific config file.
    ///
    /// Starts from the default template when the file doesn't exist; otherwise
    /// edits the existing document in place, keeping comments and other keys.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the file cannot be parsed or written.
    pub fn save_base_url_to(path: &Path, url: &str) -> Result<()> {
        use toml_edit::{DocumentMut, Item, Table, value};

        validate_base_url(url)?;

        let contents = if path.exists() {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        if !doc.contains_table("api") {
            doc["api"] = Item::Table(Table::new());
        }
        doc["api"]["base_url"] = value(url);

        Self::write_config(path, &doc.to_string())
    }

    fn write_config(path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

fn validate_base_url(candidate: &str) -> Result<()> {
    let parsed = url::Url::parse(candidate)
        .with_context(|| format!("Invalid service base URL: {candidate}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("Invalid service base URL: {candidate} (expected http or https)");
    }
    Ok(())
}
