//! Google Slides presentation service.

use deck_core::{EditRequest, Error, Presentation, PresentationService, Result};
use serde::{Deserialize, Serialize};

use crate::http::GoogleApi;

/// Presentations endpoint of the Slides REST API.
pub const SLIDES_API: &str = "https://slides.googleapis.com/v1/presentations";

/// Browser link for editing a presentation.
pub fn edit_url(presentation_id: &str) -> String {
    format!(
        "https://docs.google.com/presentation/d/{}/edit",
        presentation_id
    )
}

#[derive(Debug, Serialize)]
struct CreateBody<'a> {
    title: &'a str,
}

#[derive(Debug, Serialize)]
struct BatchUpdateBody<'a> {
    requests: &'a [EditRequest],
}

/// Only the reply count is read; the replies themselves carry nothing the
/// deck needs.
#[derive(Debug, Deserialize)]
struct BatchUpdateReply {
    #[serde(default)]
    replies: Vec<serde_json::Value>,
}

/// Edits presentations through the Slides API.
#[derive(Debug, Clone)]
pub struct SlidesClient {
    api: GoogleApi,
    base_url: String,
}

impl SlidesClient {
    pub fn new(api: GoogleApi) -> Self {
        Self {
            api,
            base_url: SLIDES_API.to_string(),
        }
    }

    /// Point the client at another endpoint (e.g. a local proxy).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn presentation_url(&self, presentation_id: &str) -> String {
        format!("{}/{}", self.base_url, presentation_id)
    }

    fn batch_update_url(&self, presentation_id: &str) -> String {
        format!("{}/{}:batchUpdate", self.base_url, presentation_id)
    }
}

impl PresentationService for SlidesClient {
    fn create(&self, title: &str) -> Result<Presentation> {
        self.api
            .post_json(&self.base_url, &CreateBody { title }, Error::SynthesisError)
    }

    fn batch_update(&self, presentation_id: &str, requests: &[EditRequest]) -> Result<()> {
        let reply: BatchUpdateReply = self.api.post_json(
            &self.batch_update_url(presentation_id),
            &BatchUpdateBody { requests },
            Error::SynthesisError,
        )?;
        log::debug!(
            "Batch update on {} returned {} replies",
            presentation_id,
            reply.replies.len()
        );
        Ok(())
    }

    fn get(&self, presentation_id: &str) -> Result<Presentation> {
        self.api
            .get_json(&self.presentation_url(presentation_id), Error::SynthesisError)
    }
}
