//! Google Docs document source.

use deck_core::{DocumentSource, Error, Result, SourceDocument};
use serde::Deserialize;
use url::Url;

use crate::http::GoogleApi;

/// Documents endpoint of the Docs REST API.
pub const DOCS_API: &str = "https://docs.googleapis.com/v1/documents";

/// The parts of a Docs `Document` resource that carry text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub body: Option<Body>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub content: Vec<StructuralElement>,
}

/// A body element. Only paragraphs are read; tables, section breaks and
/// tables of contents are skipped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StructuralElement {
    #[serde(default)]
    pub paragraph: Option<Paragraph>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub elements: Vec<ParagraphElement>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphElement {
    #[serde(default)]
    pub text_run: Option<TextRun>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextRun {
    #[serde(default)]
    pub content: String,
}

impl Document {
    /// Concatenate every paragraph text run in document order.
    pub fn text(&self) -> String {
        self.body
            .iter()
            .flat_map(|body| &body.content)
            .filter_map(|element| element.paragraph.as_ref())
            .flat_map(|paragraph| &paragraph.elements)
            .filter_map(|element| element.text_run.as_ref())
            .map(|run| run.content.as_str())
            .collect()
    }
}

impl From<Document> for SourceDocument {
    fn from(document: Document) -> Self {
        let text = document.text();
        SourceDocument {
            title: document.title,
            text,
        }
    }
}

/// Reads documents through the Docs API.
#[derive(Debug, Clone)]
pub struct DocsClient {
    api: GoogleApi,
    base_url: String,
}

impl DocsClient {
    pub fn new(api: GoogleApi) -> Self {
        Self {
            api,
            base_url: DOCS_API.to_string(),
        }
    }

    /// Point the client at another endpoint (e.g. a local proxy).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The id is a single escaped path segment.
    fn document_url(&self, document_id: &str) -> Result<Url> {
        let invalid = || Error::FetchError(format!("Invalid Docs endpoint {}", self.base_url));

        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .push(document_id);
        Ok(url)
    }
}

impl DocumentSource for DocsClient {
    fn fetch(&self, document_id: &str) -> Result<SourceDocument> {
        if document_id.trim().is_empty() {
            return Err(Error::FetchError("document id is empty".to_string()));
        }

        let document: Document = self
            .api
            .get_json(self.document_url(document_id)?.as_str(), Error::FetchError)?;
        log::debug!("Read document \"{}\"", document.title);

        Ok(document.into())
    }
}
