use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::gemini::DEFAULT_BASE_URL;
use crate::core::settings::{Model, Temperature};

/// Persisted preferences. Never holds the API key, which is only typed into
/// the sidebar.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Model preselected in the sidebar (e.g., "gemini-1.5-pro")
    pub default_model: Option<Model>,
    /// Initial temperature for new sessions
    pub temperature: Option<Temperature>,
    /// Override for the Gemini REST endpoint
    pub base_url: Option<String>,
}

/// Keys accepted by `gemchat set` / `gemchat unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    DefaultModel,
    Temperature,
    BaseUrl,
}

impl ConfigKey {
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "default-model" => Some(ConfigKey::DefaultModel),
            "temperature" => Some(ConfigKey::Temperature),
            "base-url" => Some(ConfigKey::BaseUrl),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::DefaultModel => "default-model",
            ConfigKey::Temperature => "temperature",
            ConfigKey::BaseUrl => "base-url",
        }
    }
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

impl Config {
    pub fn model_or(&self, cli: Option<Model>) -> Model {
        cli.or(self.default_model).unwrap_or_default()
    }

    pub fn temperature_or(&self, cli: Option<Temperature>) -> Temperature {
        cli.or(self.temperature).unwrap_or_default()
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn set_value(&mut self, key: ConfigKey, value: &str) -> Result<(), String> {
        match key {
            ConfigKey::DefaultModel => self.default_model = Some(value.parse()?),
            ConfigKey::Temperature => self.temperature = Some(value.parse()?),
            ConfigKey::BaseUrl => {
                let trimmed = value.trim();
                if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
                    return Err(format!("base-url must start with http:// or https://: {trimmed}"));
                }
                self.base_url = Some(trimmed.to_string());
            }
        }
        Ok(())
    }

    pub fn unset_value(&mut self, key: ConfigKey) {
        match key {
            ConfigKey::DefaultModel => self.default_model = None,
            ConfigKey::Temperature => self.temperature = None,
            ConfigKey::BaseUrl => self.base_url = None,
        }
    }

    pub fn display_value(&self, key: ConfigKey) -> Option<String> {
        match key {
            ConfigKey::DefaultModel => self.default_model.map(|m| m.to_string()),
            ConfigKey::Temperature => self.temperature.map(|t| t.to_string()),
            ConfigKey::BaseUrl => self.base_url.clone(),
        }
    }
}
