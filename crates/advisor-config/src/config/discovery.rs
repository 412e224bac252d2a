use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use advisor_utils::error::ConfigError;

use super::{Config, ConfigSource, GenerationSection, LoggingSection, ProviderSection};

/// Directory searched for during discovery.
pub const CONFIG_DIR: &str = ".legal-advisor";

/// File name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize, Serialize)]
struct TomlConfig {
    provider: Option<ProviderSection>,
    analysis: Option<GenerationSection>,
    expert: Option<GenerationSection>,
    logging: Option<LoggingSection>,
}

impl Config {
    /// Discover configuration starting from the current directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the current directory is unavailable, a
    /// discovered file cannot be parsed, or validation fails.
    pub fn discover() -> Result<Self, ConfigError> {
        let start_dir = std::env::current_dir().map_err(|e| {
            ConfigError::InvalidFile(format!("Failed to get current directory: {e}"))
        })?;
        Self::discover_from(&start_dir)
    }

    /// Discover configuration starting from a specific directory.
    ///
    /// Missing config file means built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a discovered file cannot be parsed or
    /// validation fails.
    pub fn discover_from(start_dir: &Path) -> Result<Self, ConfigError> {
        match Self::discover_config_file_from(start_dir) {
            Some(path) => Self::load(&path),
            None => {
                debug!(start_dir = %start_dir.display(), "No config file found, using defaults");
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Load configuration from an explicit file path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist,
    /// `ConfigError::InvalidFile` if it cannot be read or parsed, and
    /// `ConfigError::InvalidValue` if a value fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        let file_config =
            load_config_file(path).map_err(|e| ConfigError::InvalidFile(format!("{e:#}")))?;

        let mut config = Self::default();
        config.apply(file_config);
        config.source = ConfigSource::File(path.to_path_buf());
        config.validate()?;

        debug!(
            path = %path.display(),
            model = %config.provider.model,
            "Loaded configuration file"
        );

        Ok(config)
    }

    /// Parse configuration from TOML text, without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` on parse or validation failure.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file_config: TomlConfig = toml::from_str(content)
            .map_err(|e| ConfigError::InvalidFile(e.to_string()))?;
        let mut config = Self::default();
        config.apply(file_config);
        config.source = ConfigSource::Programmatic;
        config.validate()?;
        Ok(config)
    }

    /// Walk up from `start_dir` looking for `.legal-advisor/config.toml`,
    /// stopping at repository root markers (.git, .hg, .svn) or the
    /// filesystem root.
    #[must_use]
    pub fn discover_config_file_from(start_dir: &Path) -> Option<PathBuf> {
        let mut current_dir = start_dir.to_path_buf();

        loop {
            let config_path = current_dir.join(CONFIG_DIR).join(CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }

            if current_dir.join(".git").exists()
                || current_dir.join(".hg").exists()
                || current_dir.join(".svn").exists()
            {
                return None;
            }

            match current_dir.parent() {
                Some(parent) => current_dir = parent.to_path_buf(),
                None => return None,
            }
        }
    }

    fn apply(&mut self, file_config: TomlConfig) {
        if let Some(provider) = file_config.provider {
            if let Some(api_key_env) = provider.api_key_env {
                self.provider.api_key_env = api_key_env;
            }
            if let Some(model) = provider.model {
                self.provider.model = model;
            }
            if provider.base_url.is_some() {
                self.provider.base_url = provider.base_url;
            }
            if let Some(secs) = provider.connect_timeout_secs {
                self.provider.connect_timeout_secs = secs;
            }
        }
        if let Some(analysis) = file_config.analysis {
            self.analysis.apply(&analysis);
        }
        if let Some(expert) = file_config.expert {
            self.expert.apply(&expert);
        }
        if let Some(verbose) = file_config.logging.and_then(|l| l.verbose) {
            self.logging.verbose = verbose;
        }
    }
}

fn load_config_file(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: TomlConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;
    Ok(config)
}
