//! Google Docs and Slides backends.
//!
//! Documents are read through the Docs REST API and decks are built through
//! the Slides REST API, both authorized with an installed-application OAuth
//! token.

pub mod auth;
pub mod docs;
pub mod http;
pub mod slides;

pub use auth::{
    authorize, Authenticator, AuthorizationPrompt, ConsolePrompt, CredentialStore,
    FileCredentialStore, HttpTokenExchange, OAuthClient, Token, TokenExchange,
};
pub use docs::DocsClient;
pub use http::GoogleApi;
pub use slides::{edit_url, SlidesClient};
