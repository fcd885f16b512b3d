//! Traits for the external services the pipeline talks to.
//!
//! Backends live in their own crates and map transport failures into the
//! matching [`crate::Error`] variant.

use crate::error::Result;
use crate::presentation::{EditRequest, Presentation};
use crate::types::SourceDocument;

/// Source of the document to summarize.
pub trait DocumentSource {
    /// Fetch a document by its opaque identifier.
    ///
    /// Failures are reported as [`crate::Error::FetchError`].
    fn fetch(&self, document_id: &str) -> Result<SourceDocument>;
}

/// Text generation backend.
pub trait TextGenerator {
    /// Return the first completion for a prompt.
    ///
    /// Failures are reported as [`crate::Error::GenerationError`].
    fn complete(&self, prompt: &str) -> Result<String>;
}

/// Presentation editing backend.
///
/// Failures are reported as [`crate::Error::SynthesisError`].
pub trait PresentationService {
    /// Create an empty presentation. The service adds one title slide.
    fn create(&self, title: &str) -> Result<Presentation>;

    /// Apply a batch of edits atomically.
    fn batch_update(&self, presentation_id: &str, requests: &[EditRequest]) -> Result<()>;

    /// Read the current state of a presentation.
    fn get(&self, presentation_id: &str) -> Result<Presentation>;
}
