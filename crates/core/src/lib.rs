//! Core types, outline parsing, and deck synthesis for turning a document
//! into a slide presentation.

pub mod config;
pub mod error;
pub mod outline;
pub mod pipeline;
pub mod presentation;
pub mod prompt;
pub mod service;
pub mod synthesizer;
pub mod types;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::{Error, ParseError, Result};
pub use outline::{parse_outline, OutlineParser};
pub use pipeline::Pipeline;
pub use presentation::{EditRequest, Layout, Page, PageElement, Presentation};
pub use prompt::build_outline_prompt;
pub use service::{DocumentSource, PresentationService, TextGenerator};
pub use synthesizer::DeckSynthesizer;
pub use types::{Outline, SlideRecord, SourceDocument};
