//! Runtime configuration.
//!
//! Every value has a default suitable for a local Ollama daemon and can be
//! overridden via environment variables:
//! - `CHAT_API_BASE` - OpenAI-compatible chat endpoint base. Defaults to `http://localhost:11434/v1`.
//! - `CHAT_API_KEY` - Bearer token for the chat endpoint. Defaults to `ollama`.
//! - `CHAT_MODEL` - Conversation model. Defaults to `llama3.1:8b`.
//! - `CODER_MODEL` - Model used by the `coder_llm` tool. Defaults to `codellama:code`.
//! - `MAX_TOOL_CALLS` - Per-turn tool round budget. Defaults to `5`.
//! - `WIKIPEDIA_API` - MediaWiki action API endpoint.
//! - `GEOCODING_API` - Open-Meteo geocoding endpoint.
//! - `FORECAST_API` - Open-Meteo forecast endpoint.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// OpenAI-compatible chat endpoint base URL.
    pub api_base: String,

    /// Bearer token sent to the chat endpoint. Local daemons ignore it.
    pub api_key: String,

    /// Model driving the conversation.
    pub model: String,

    /// Model the `coder_llm` tool delegates to.
    pub coder_model: String,

    /// Tool dispatch rounds allowed within a single user turn.
    pub max_tool_calls: usize,

    pub wikipedia_api: String,
    pub geocoding_api: String,
    pub forecast_api: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:11434/v1".to_string(),
            api_key: "ollama".to_string(),
            model: "llama3.1:8b".to_string(),
            coder_model: "codellama:code".to_string(),
            max_tool_calls: 5,
            wikipedia_api: "https://en.wikipedia.org/w/api.php".to_string(),
            geocoding_api: "https://geocoding-api.open-meteo.com/v1/search".to_string(),
            forecast_api: "https://api.open-meteo.com/v1/forecast".to_string(),
        }
    }
}

impl Config {
    /// Load configuration, applying any environment overrides on top of the
    /// defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(value) = std::env::var("CHAT_API_BASE") {
            config.api_base = value;
        }
        if let Ok(value) = std::env::var("CHAT_API_KEY") {
            config.api_key = value;
        }
        if let Ok(value) = std::env::var("CHAT_MODEL") {
            config.model = value;
        }
        if let Ok(value) = std::env::var("CODER_MODEL") {
            config.coder_model = value;
        }
        if let Ok(value) = std::env::var("MAX_TOOL_CALLS") {
            config.max_tool_calls = value
                .parse()
                .map_err(|_| ConfigError::InvalidValue("MAX_TOOL_CALLS".to_string(), value))?;
        }
        if let Ok(value) = std::env::var("WIKIPEDIA_API") {
            config.wikipedia_api = value;
        }
        if let Ok(value) = std::env::var("GEOCODING_API") {
            config.geocoding_api = value;
        }
        if let Ok(value) = std::env::var("FORECAST_API") {
            config.forecast_api = value;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_a_local_daemon() {
        let config = Config::default();
        assert_eq!(config.api_base, "http://localhost:11434/v1");
        assert_eq!(config.model, "llama3.1:8b");
        assert_eq!(config.coder_model, "codellama:code");
        assert_eq!(config.max_tool_calls, 5);
        assert_eq!(config.wikipedia_api, "https://en.wikipedia.org/w/api.php");
    }
}
