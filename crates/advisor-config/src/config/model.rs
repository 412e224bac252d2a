use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable read for the provider API key unless configured.
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Prefix of the Gemini `generateContent` endpoint; the model name follows.
pub const GEMINI_MODELS_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Default connect timeout for the provider HTTP client.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Built-in defaults only
    Defaults,
    /// Loaded from a config file
    File(PathBuf),
    /// Constructed in code
    Programmatic,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Defaults => write!(f, "defaults"),
            Self::File(path) => write!(f, "file:{}", path.display()),
            Self::Programmatic => write!(f, "programmatic"),
        }
    }
}

/// Configuration for the advisor.
///
/// Precedence: config file > built-in defaults.
///
/// # Configuration File Format
///
/// ```toml
/// [provider]
/// api_key_env = "GEMINI_API_KEY"
/// model = "gemini-1.5-flash"
///
/// [analysis]
/// temperature = 0.2
///
/// [expert]
/// temperature = 0.4
///
/// [logging]
/// verbose = true
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Language-model provider settings.
    pub provider: ProviderConfig,
    /// Generation parameters for the structured analysis call.
    pub analysis: GenerationConfig,
    /// Generation parameters for the follow-up expert advice call.
    pub expert: GenerationConfig,
    pub logging: LoggingConfig,
    pub source: ConfigSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            analysis: GenerationConfig::analysis(),
            expert: GenerationConfig::expert(),
            logging: LoggingConfig::default(),
            source: ConfigSource::Defaults,
        }
    }
}

/// Provider connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub model: String,
    /// Full endpoint override; derived from `model` when unset.
    pub base_url: Option<String>,
    pub connect_timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl ProviderConfig {
    /// Completion endpoint for the configured model.
    #[must_use]
    pub fn endpoint(&self) -> String {
        match &self.base_url {
            Some(url) => url.clone(),
            None => format!("{}/{}:generateContent", GEMINI_MODELS_URL, self.model),
        }
    }
}

/// Sampling parameters sent with each completion request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl GenerationConfig {
    /// Parameters for the JSON analysis request.
    #[must_use]
    pub const fn analysis() -> Self {
        Self {
            temperature: 0.2,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 4096,
        }
    }

    /// Parameters for the free-form expert advice request.
    #[must_use]
    pub const fn expert() -> Self {
        Self {
            temperature: 0.4,
            ..Self::analysis()
        }
    }

    pub(crate) fn apply(&mut self, section: &GenerationSection) {
        if let Some(temperature) = section.temperature {
            self.temperature = temperature;
        }
        if let Some(top_k) = section.top_k {
            self.top_k = top_k;
        }
        if let Some(top_p) = section.top_p {
            self.top_p = top_p;
        }
        if let Some(max_output_tokens) = section.max_output_tokens {
            self.max_output_tokens = max_output_tokens;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingConfig {
    pub verbose: bool,
}

/// `[provider]` section as written in the config file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProviderSection {
    pub api_key_env: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub connect_timeout_secs: Option<u64>,
}

/// `[analysis]` / `[expert]` sections as written in the config file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GenerationSection {
    pub temperature: Option<f32>,
    pub top_k: Option<u32>,
    pub top_p: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingSection {
    pub verbose: Option<bool>,
}
