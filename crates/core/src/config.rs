//! Run configuration, read once at startup.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default OpenAI-compatible API base URL.
pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com";

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings for a single run, passed by reference to each component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// API key for the text generation service. Only runs that call the
    /// model need it.
    pub openai_api_key: Option<String>,

    /// Chat model name.
    pub model: String,

    /// Base URL of the OpenAI-compatible API.
    pub openai_endpoint: String,

    /// Dump raw model output when parsing fails.
    pub debug: bool,

    /// Google OAuth client secrets (`credentials.json`).
    pub credentials_path: PathBuf,

    /// Cached OAuth token (`token.json`).
    pub token_path: PathBuf,

    /// Timeout applied to every HTTP request.
    pub timeout_secs: u64,
}

impl Config {
    /// Build the configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `OPEN_AI_KEY` | none, checked by [`Config::openai_api_key`] |
    /// | `OPEN_AI_MODEL` | `gpt-3.5-turbo` |
    /// | `OPEN_AI_ENDPOINT` | `https://api.openai.com` |
    /// | `DEBUG` | `false` |
    /// | `GOOGLE_CREDENTIALS_FILE` | `./credentials.json` |
    /// | `GOOGLE_TOKEN_FILE` | `./token.json` |
    /// | `HTTP_TIMEOUT_SECS` | `60` |
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_secs = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                Error::ConfigError(format!("HTTP_TIMEOUT_SECS is not a number: {}", raw))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            openai_api_key: get("OPEN_AI_KEY"),
            model: get("OPEN_AI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            openai_endpoint: get("OPEN_AI_ENDPOINT")
                .map(|e| e.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_OPENAI_ENDPOINT.to_string()),
            debug: get("DEBUG").is_some_and(|v| v.trim().eq_ignore_ascii_case("true")),
            credentials_path: get("GOOGLE_CREDENTIALS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./credentials.json")),
            token_path: get("GOOGLE_TOKEN_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./token.json")),
            timeout_secs,
        })
    }

    /// The text generation API key, or a `ConfigError` when it is unset.
    pub fn openai_api_key(&self) -> Result<&str> {
        self.openai_api_key
            .as_deref()
            .ok_or_else(|| Error::ConfigError("OPEN_AI_KEY is not set".to_string()))
    }

    /// Force debug output on.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = self.debug || debug;
        self
    }
}
