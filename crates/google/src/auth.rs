//! OAuth credentials for the Google APIs.
//!
//! The flow is the installed-application one:
//!
//! 1. Load the cached token from a [`CredentialStore`].
//! 2. No token: show the consent URL, read the pasted code, exchange it.
//! 3. Expired token with a refresh token: refresh it.
//! 4. Save whatever was obtained or refreshed.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use deck_core::{Config, Error, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::http::{build_client, describe_error, GoogleApi};

/// Scopes needed to read documents and edit presentations.
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/documents",
    "https://www.googleapis.com/auth/presentations",
];

/// Tokens this close to expiry are treated as expired.
pub const EXPIRY_SKEW_SECS: i64 = 60;

const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

/// OAuth client registration from the downloaded client-secret file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OAuthClient {
    pub client_id: String,
    pub client_secret: String,

    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,

    #[serde(default = "default_token_uri")]
    pub token_uri: String,

    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

fn default_auth_uri() -> String {
    DEFAULT_AUTH_URI.to_string()
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Deserialize)]
struct ClientSecretFile {
    installed: Option<OAuthClient>,
    web: Option<OAuthClient>,
}

impl OAuthClient {
    /// Parse a client-secret JSON document (`installed` or `web` section).
    pub fn from_json(json: &str) -> Result<Self> {
        let file: ClientSecretFile = serde_json::from_str(json)
            .map_err(|e| Error::CredentialError(format!("Invalid client secret file: {}", e)))?;

        file.installed.or(file.web).ok_or_else(|| {
            Error::CredentialError(
                "Client secret file has neither an \"installed\" nor a \"web\" section"
                    .to_string(),
            )
        })
    }

    /// Read and parse a client-secret file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            Error::CredentialError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Where the consent page sends the code.
    pub fn redirect_uri(&self) -> &str {
        self.redirect_uris
            .first()
            .map(String::as_str)
            .unwrap_or(OOB_REDIRECT_URI)
    }

    /// Consent page URL requesting offline access for `scopes`.
    pub fn authorization_url(&self, scopes: &[&str], state: &str) -> Result<String> {
        let url = url::Url::parse_with_params(
            &self.auth_uri,
            &[
                ("access_type", "offline"),
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri()),
                ("response_type", "code"),
                ("scope", scopes.join(" ").as_str()),
                ("state", state),
            ],
        )
        .map_err(|e| Error::CredentialError(format!("Invalid auth_uri {}: {}", self.auth_uri, e)))?;

        Ok(url.into())
    }
}

/// A cached OAuth token, stored in the usual oauth2 token-file layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,

    #[serde(default)]
    pub token_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

impl Token {
    /// Expiry time, if the token has a real one.
    ///
    /// Token files written by other tools use the zero time
    /// (`0001-01-01T00:00:00Z`) for "never expires".
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expiry.filter(|e| e.timestamp() > 0)
    }

    /// Whether the token should no longer be sent at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at()
            .is_some_and(|expiry| expiry - Duration::seconds(EXPIRY_SKEW_SECS) <= now)
    }

    /// Build a token from an endpoint response received at `now`.
    ///
    /// Refresh responses usually omit the refresh token; the previous one is
    /// kept in that case.
    pub fn from_response(
        response: TokenResponse,
        now: DateTime<Utc>,
        previous_refresh_token: Option<String>,
    ) -> Self {
        Self {
            access_token: response.access_token,
            token_type: response.token_type,
            refresh_token: response.refresh_token.or(previous_refresh_token),
            expiry: response.expires_in.map(|secs| now + Duration::seconds(secs)),
        }
    }
}

/// Body returned by the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,

    #[serde(default)]
    pub token_type: String,

    #[serde(default)]
    pub refresh_token: Option<String>,

    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Where tokens are kept between runs.
pub trait CredentialStore {
    /// The saved token, or `None` when there is nothing usable.
    fn load(&self) -> Result<Option<Token>>;

    fn save(&self, token: &Token) -> Result<()>;
}

/// Token stored as JSON in a local file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Token>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::IoError(e)),
        };

        match serde_json::from_str(&json) {
            Ok(token) => Ok(Some(token)),
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable token file {}: {}",
                    self.path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    fn save(&self, token: &Token) -> Result<()> {
        log::info!("Saving credential file to {}", self.path.display());
        let json = serde_json::to_string(token)
            .map_err(|e| Error::CredentialError(format!("Failed to encode token: {}", e)))?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

/// Calls to the token endpoint.
pub trait TokenExchange {
    /// Trade an authorization code for a token.
    fn exchange_code(&self, code: &str) -> Result<TokenResponse>;

    /// Get a new access token from a refresh token.
    fn refresh(&self, refresh_token: &str) -> Result<TokenResponse>;
}

/// Token endpoint reached over HTTP.
pub struct HttpTokenExchange {
    client: OAuthClient,
    http: Client,
}

impl HttpTokenExchange {
    pub fn new(client: OAuthClient, timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            client,
            http: build_client(timeout_secs)?,
        })
    }

    fn post_form(&self, form: &[(&str, &str)]) -> Result<TokenResponse> {
        let response = self
            .http
            .post(&self.client.token_uri)
            .form(form)
            .send()
            .map_err(|e| Error::CredentialError(format!("Token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::CredentialError(describe_error(status.as_u16(), &body)));
        }

        response
            .json()
            .map_err(|e| Error::CredentialError(format!("Invalid token response: {}", e)))
    }
}

impl TokenExchange for HttpTokenExchange {
    fn exchange_code(&self, code: &str) -> Result<TokenResponse> {
        self.post_form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.client.client_id.as_str()),
            ("client_secret", self.client.client_secret.as_str()),
            ("redirect_uri", self.client.redirect_uri()),
        ])
    }

    fn refresh(&self, refresh_token: &str) -> Result<TokenResponse> {
        self.post_form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.client.client_id.as_str()),
            ("client_secret", self.client.client_secret.as_str()),
        ])
    }
}

/// Asks the user to approve access and hand back the code.
pub trait AuthorizationPrompt {
    fn authorization_code(&self, url: &str) -> Result<String>;
}

/// Prints the consent URL and reads the code from standard input.
#[derive(Debug, Default)]
pub struct ConsolePrompt;

impl AuthorizationPrompt for ConsolePrompt {
    fn authorization_code(&self, url: &str) -> Result<String> {
        eprintln!(
            "Go to the following link in your browser then type the authorization code:\n{}",
            url
        );

        let mut code = String::new();
        io::stdin().lock().read_line(&mut code)?;
        let code = code.trim();
        if code.is_empty() {
            return Err(Error::CredentialError(
                "No authorization code entered".to_string(),
            ));
        }
        Ok(code.to_string())
    }
}

/// Produces a usable access token, refreshing or asking as needed.
pub struct Authenticator<'a> {
    client: &'a OAuthClient,
    store: &'a dyn CredentialStore,
    exchange: &'a dyn TokenExchange,
    prompt: &'a dyn AuthorizationPrompt,
}

impl<'a> Authenticator<'a> {
    pub fn new(
        client: &'a OAuthClient,
        store: &'a dyn CredentialStore,
        exchange: &'a dyn TokenExchange,
        prompt: &'a dyn AuthorizationPrompt,
    ) -> Self {
        Self {
            client,
            store,
            exchange,
            prompt,
        }
    }

    pub fn access_token(&self) -> Result<String> {
        self.access_token_at(Utc::now())
    }

    /// Access token valid at `now`.
    pub fn access_token_at(&self, now: DateTime<Utc>) -> Result<String> {
        let token = match self.store.load()? {
            Some(token) if !token.is_expired_at(now) => {
                log::debug!("Using cached token");
                return Ok(token.access_token);
            }
            Some(token) => match token.refresh_token.clone() {
                Some(refresh_token) => match self.exchange.refresh(&refresh_token) {
                    Ok(response) => {
                        log::debug!("Refreshed expired token");
                        Token::from_response(response, now, Some(refresh_token))
                    }
                    Err(e) => {
                        log::warn!("Token refresh failed, asking for consent again: {}", e);
                        self.consent(now)?
                    }
                },
                None => {
                    log::debug!("Cached token expired and cannot be refreshed");
                    self.consent(now)?
                }
            },
            None => self.consent(now)?,
        };

        self.store.save(&token)?;
        Ok(token.access_token)
    }

    fn consent(&self, now: DateTime<Utc>) -> Result<Token> {
        let url = self.client.authorization_url(SCOPES, "state-token")?;
        let code = self.prompt.authorization_code(&url)?;
        let response = self.exchange.exchange_code(&code)?;
        Ok(Token::from_response(response, now, None))
    }
}

/// Build an authenticated API client from the run configuration.
///
/// Reads the client secrets, uses or refreshes the cached token, and falls
/// back to the console consent flow.
pub fn authorize(config: &Config) -> Result<GoogleApi> {
    let client = OAuthClient::from_file(&config.credentials_path)?;
    let store = FileCredentialStore::new(&config.token_path);
    let exchange = HttpTokenExchange::new(client.clone(), config.timeout_secs)?;
    let prompt = ConsolePrompt;

    let access_token = Authenticator::new(&client, &store, &exchange, &prompt).access_token()?;
    GoogleApi::new(access_token, config.timeout_secs)
}
