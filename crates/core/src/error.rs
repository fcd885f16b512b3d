//! Error types for document-to-slides generation.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that end a generation run.
///
/// Every variant is fatal for the run: nothing is retried and no partial
/// presentation is repaired.
#[derive(Error, Debug)]
pub enum Error {
    /// The source document could not be read.
    #[error("Could not read document: {0}")]
    FetchError(String),

    /// The text generation service was unreachable or returned an error.
    #[error("Text generation failed: {0}")]
    GenerationError(String),

    /// No slide could be recovered from the generated text.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The presentation service rejected a structural or content edit.
    #[error("Presentation service error: {0}")]
    SynthesisError(String),

    /// A required setting is missing or malformed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// OAuth client secrets or tokens could not be loaded, obtained or saved.
    #[error("Credential error: {0}")]
    CredentialError(String),

    /// Local file access failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Outline parsing failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The text contained no complete slide block.
    ///
    /// Carries the raw text so the caller can dump it for diagnosis.
    #[error("no slide could be recovered from the generated outline")]
    Empty { raw: String },
}

impl ParseError {
    /// The raw text that failed to parse.
    pub fn raw(&self) -> &str {
        match self {
            ParseError::Empty { raw } => raw,
        }
    }
}
