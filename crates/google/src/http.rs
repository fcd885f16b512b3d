//! Authenticated JSON calls against Google REST APIs.

use std::time::Duration;

use deck_core::{Error, Result};
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Builds the error variant a caller reports transport failures as.
pub type ErrorKind = fn(String) -> Error;

/// Blocking HTTP client carrying a bearer token.
#[derive(Debug, Clone)]
pub struct GoogleApi {
    http: Client,
    access_token: String,
}

impl GoogleApi {
    /// Create a client that sends `access_token` with every request.
    pub fn new(access_token: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let http = build_client(timeout_secs)?;
        Ok(Self {
            http,
            access_token: access_token.into(),
        })
    }

    /// GET `url` and decode the JSON body.
    pub fn get_json<T: DeserializeOwned>(&self, url: &str, kind: ErrorKind) -> Result<T> {
        log::debug!("GET {}", url);
        self.send(self.http.get(url), url, kind)
    }

    /// POST a JSON body to `url` and decode the JSON response.
    pub fn post_json<B, T>(&self, url: &str, body: &B, kind: ErrorKind) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        log::debug!("POST {}", url);
        self.send(self.http.post(url).json(body), url, kind)
    }

    fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
        kind: ErrorKind,
    ) -> Result<T> {
        let response = request
            .bearer_auth(&self.access_token)
            .send()
            .map_err(|e| kind(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(kind(describe_error(status.as_u16(), &body)));
        }

        response
            .json::<T>()
            .map_err(|e| kind(format!("Invalid response from {}: {}", url, e)))
    }
}

/// Blocking client with the run's timeout.
pub(crate) fn build_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| Error::ConfigError(format!("Failed to create HTTP client: {}", e)))
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Turn a failed response into a one-line message.
///
/// Google APIs answer with `{"error": {"code", "message", "status"}}`; any
/// other body is quoted as-is, shortened.
pub(crate) fn describe_error(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.error.status.is_empty() => format!(
            "HTTP {} {}: {}",
            status, parsed.error.status, parsed.error.message
        ),
        Ok(parsed) => format!("HTTP {}: {}", status, parsed.error.message),
        Err(_) => {
            let snippet: String = body.trim().chars().take(200).collect();
            if snippet.is_empty() {
                format!("HTTP {}", status)
            } else {
                format!("HTTP {}: {}", status, snippet)
            }
        }
    }
}
