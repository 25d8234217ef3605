//! Extractor configuration.
//!
//! Endpoint settings come from an optional YAML file; the API key comes from
//! the `OPENAI_API_KEY` environment variable (or `--api-key`), falling back to
//! an `api_key` entry in the file. Everything has a default except the key.

use serde::Deserialize;
use std::error::Error;
use tracing::info;

fn default_api_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

/// Settings for the chat-completions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractorConfig {
    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Model identifier sent with each request.
    #[serde(default = "default_model")]
    pub model: String,
    /// Token budget for each completion.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Fallback API key; the environment variable wins when both are set.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            api_key: None,
        }
    }
}

impl ExtractorConfig {
    /// Load configuration from a YAML file, or defaults when no path is given.
    pub async fn load(path: Option<&str>) -> Result<Self, Box<dyn Error>> {
        match path {
            Some(path) => {
                let contents = tokio::fs::read_to_string(path).await?;
                let config: ExtractorConfig = serde_yaml::from_str(&contents)?;
                info!(config_path = path, model = %config.model, "Loaded configuration");
                Ok(config)
            }
            None => {
                info!("No config file given; using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Resolve the API key: environment/CLI first, config file second.
    pub fn resolve_api_key(&self, env_key: Option<String>) -> Result<String, Box<dyn Error>> {
        env_key
            .or_else(|| self.api_key.clone())
            .ok_or_else(|| "no API key: set OPENAI_API_KEY or add api_key to the config file".into())
    }
}
