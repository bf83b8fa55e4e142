//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub gemini: GeminiConfig,

    #[serde(default)]
    pub stub: StubConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default = "default_gemini_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
}

/// Offline provider replying with a fixed text
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StubConfig {
    #[serde(default)]
    pub response: String,
}

// Default value functions
fn default_provider() -> String {
    "gemini".to_string()
}

fn default_model() -> String {
    news_classifier_domain::usecases::DEFAULT_MODEL.to_string()
}

fn default_timeout() -> u64 {
    45
}

fn default_gemini_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_gemini_base_url() -> String {
    news_classifier_adapters::llm::gemini::DEFAULT_BASE_URL.to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            timeout_secs: default_timeout(),
            gemini: GeminiConfig::default(),
            stub: StubConfig::default(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_gemini_api_key_env(),
            base_url: default_gemini_base_url(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./config.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(
            config::Environment::with_prefix("NEWS_CLASSIFIER")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# news-classifier configuration

[llm]
provider = "gemini"  # gemini, stub
model = "gemini-2.0-flash"
# Transport timeout; no retries are attempted
timeout_secs = 45

[llm.gemini]
# Name of the environment variable holding the API key.
# When unset the classifier runs disabled and returns no results.
api_key_env = "GEMINI_API_KEY"
base_url = "https://generativelanguage.googleapis.com/v1beta"

[llm.stub]
# Fixed reply used by the offline stub provider
response = '{"category": "기타", "type": "기타"}'
"#
        .to_string()
    }
}
