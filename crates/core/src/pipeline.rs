//! Document → outline → presentation.

use crate::error::Result;
use crate::outline::OutlineParser;
use crate::prompt::build_outline_prompt;
use crate::service::{DocumentSource, PresentationService, TextGenerator};
use crate::synthesizer::DeckSynthesizer;
use crate::types::Outline;

/// Runs the steps in order, stopping at the first failure.
pub struct Pipeline<'a> {
    documents: &'a dyn DocumentSource,
    generator: &'a dyn TextGenerator,
    presentations: &'a dyn PresentationService,
    parser: OutlineParser,
    synthesizer: DeckSynthesizer,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        documents: &'a dyn DocumentSource,
        generator: &'a dyn TextGenerator,
        presentations: &'a dyn PresentationService,
    ) -> Self {
        Self {
            documents,
            generator,
            presentations,
            parser: OutlineParser::new(),
            synthesizer: DeckSynthesizer::new(),
        }
    }

    /// Use a custom synthesizer (e.g. a different closing label).
    pub fn with_synthesizer(mut self, synthesizer: DeckSynthesizer) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    /// Fetch a document and ask the model for its outline.
    ///
    /// The outline takes the document's title.
    pub fn outline_for(&self, document_id: &str) -> Result<Outline> {
        let document = self.documents.fetch(document_id)?;
        log::info!("Obtained document \"{}\"", document.title);
        log::debug!("Document text is {} bytes", document.text.len());

        log::info!("Asking for a slides outline");
        let prompt = build_outline_prompt(&document.text);
        let raw = self.generator.complete(&prompt)?;

        log::info!("Reading slides from the generated outline");
        let outline = self.parser.parse(&raw)?;

        Ok(outline.with_title(document.title))
    }

    /// Build a presentation from an outline. Returns the presentation id.
    pub fn publish(&self, outline: &Outline) -> Result<String> {
        log::info!("Creating your slide show");
        self.synthesizer.synthesize(outline, self.presentations)
    }

    /// Full run for one document. Returns the presentation id.
    pub fn run(&self, document_id: &str) -> Result<String> {
        let outline = self.outline_for(document_id)?;
        self.publish(&outline)
    }
}
