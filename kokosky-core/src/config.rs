use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Base address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Environment variable that overrides the base address.
pub const BASE_URL_ENV: &str = "KOKOSKY_API_URL";

/// Connection settings injected into the transport at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    /// Resolve the base address: explicit override, then `KOKOSKY_API_URL`,
    /// then the settings file, then [`DEFAULT_BASE_URL`].
    pub fn resolve(explicit: Option<&str>, settings: &Settings) -> Self {
        let env = std::env::var(BASE_URL_ENV).ok();
        Self::resolve_from(explicit, env.as_deref(), settings)
    }

    fn resolve_from(explicit: Option<&str>, env: Option<&str>, settings: &Settings) -> Self {
        let base_url = [explicit, env, settings.base_url.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(DEFAULT_BASE_URL);

        Self::new(base_url)
    }
}

/// User settings stored on disk.
///
/// Example TOML:
/// ```toml
/// base_url = "https://weather.example.com"
/// default_location = "NYC_USA"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Location code used by `show` when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_location: Option<String>,
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::settings_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Save settings to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::settings_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(self).context("Failed to serialize settings to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))?;

        Ok(())
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn settings_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "kokosky", "kokosky-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("settings.toml"))
    }

    /// Set or clear the stored base address. Blank input clears it.
    pub fn set_base_url(&mut self, url: &str) {
        self.base_url = non_blank(url);
    }

    /// Set or clear the default location code. Blank input clears it.
    pub fn set_default_location(&mut self, code: &str) {
        self.default_location = non_blank(code);
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
