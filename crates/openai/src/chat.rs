//! Chat completion client for OpenAI-compatible APIs.

use std::time::Duration;

use deck_core::{Config, Error, Result, TextGenerator};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

/// One chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for `/v1/chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

/// Response body for `/v1/chat/completions`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: Message,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

impl ChatResponse {
    /// Content of the first choice.
    pub fn first_content(self) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| Error::GenerationError("response contained no choices".to_string()))
    }
}

/// Turn a failed response into a one-line message.
fn describe_error(status: u16, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => format!("HTTP {}: {}", status, parsed.error.message),
        Err(_) => format!("HTTP {}", status),
    }
}

/// Text generator backed by a chat completion endpoint.
pub struct ChatCompletionClient {
    http: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl ChatCompletionClient {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    /// Client for the endpoint, model and key in `config`. Fails with a
    /// `ConfigError` when no key is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.openai_endpoint,
            &config.model,
            config.openai_api_key()?,
            config.timeout_secs,
        )
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.endpoint)
    }

    /// Single-message request for `prompt`.
    pub fn request_for(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![Message::user(prompt)],
        }
    }
}

impl TextGenerator for ChatCompletionClient {
    fn complete(&self, prompt: &str) -> Result<String> {
        let url = self.completions_url();
        log::debug!("POST {} (model {})", url, self.model);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request_for(prompt))
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    Error::GenerationError(format!("Request to {} timed out", url))
                } else {
                    Error::GenerationError(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::GenerationError(describe_error(status.as_u16(), &body)));
        }

        let body: ChatResponse = response
            .json()
            .map_err(|e| Error::GenerationError(format!("Invalid response: {}", e)))?;

        body.first_content()
    }
}
