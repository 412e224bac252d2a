use advisor_utils::error::ConfigError;

use super::{Config, GenerationConfig};

/// Value written into sample `.env` files; never a real key.
pub const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

/// Keys shorter than this are treated as placeholders.
pub const MIN_API_KEY_LEN: usize = 10;

const MAX_OUTPUT_TOKENS_LIMIT: u32 = 65_536;

impl Config {
    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.api_key_env.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "provider.api_key_env".to_string(),
                value: "must not be empty".to_string(),
            });
        }

        if self.provider.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "provider.model".to_string(),
                value: "must not be empty".to_string(),
            });
        }

        if let Some(url) = &self.provider.base_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidValue {
                key: "provider.base_url".to_string(),
                value: format!("'{url}' must start with http:// or https://"),
            });
        }

        if self.provider.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "provider.connect_timeout_secs".to_string(),
                value: "must be greater than 0".to_string(),
            });
        }

        validate_generation("analysis", &self.analysis)?;
        validate_generation("expert", &self.expert)?;

        Ok(())
    }

    /// Resolve the provider API key from the configured environment variable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingApiKey` when the variable is unset and
    /// `ConfigError::PlaceholderApiKey` when it holds a placeholder.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Same as [`Config::resolve_api_key`] with an injectable lookup.
    ///
    /// # Errors
    ///
    /// See [`Config::resolve_api_key`].
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Result<String, ConfigError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let env = &self.provider.api_key_env;
        let raw = lookup(env).ok_or_else(|| ConfigError::MissingApiKey { env: env.clone() })?;
        let key = raw.trim();
        if key.is_empty() {
            return Err(ConfigError::MissingApiKey { env: env.clone() });
        }
        if key == PLACEHOLDER_API_KEY || key.chars().count() < MIN_API_KEY_LEN {
            return Err(ConfigError::PlaceholderApiKey { env: env.clone() });
        }
        Ok(key.to_string())
    }
}

fn validate_generation(section: &str, params: &GenerationConfig) -> Result<(), ConfigError> {
    if !(0.0..=2.0).contains(&params.temperature) {
        return Err(ConfigError::InvalidValue {
            key: format!("{section}.temperature"),
            value: format!("{} is outside [0, 2]", params.temperature),
        });
    }
    if !(params.top_p > 0.0 && params.top_p <= 1.0) {
        return Err(ConfigError::InvalidValue {
            key: format!("{section}.top_p"),
            value: format!("{} is outside (0, 1]", params.top_p),
        });
    }
    if params.top_k == 0 {
        return Err(ConfigError::InvalidValue {
            key: format!("{section}.top_k"),
            value: "must be greater than 0".to_string(),
        });
    }
    if params.max_output_tokens == 0 || params.max_output_tokens > MAX_OUTPUT_TOKENS_LIMIT {
        return Err(ConfigError::InvalidValue {
            key: format!("{section}.max_output_tokens"),
            value: format!(
                "{} is outside [1, {MAX_OUTPUT_TOKENS_LIMIT}]",
                params.max_output_tokens
            ),
        });
    }
    Ok(())
}
