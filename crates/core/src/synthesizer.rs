//! Turns an outline into edits against a presentation service.
//!
//! The deck is laid out as:
//!
//! ```text
//! slide 0      default title slide      <- outline title
//! slide 1..=k  TITLE_AND_BODY           <- slide title, bullets
//! slide k+1    TITLE                    <- closing label
//! ```
//!
//! Element ids only exist once the structural batch has been committed, so
//! the content batch is built from a fresh read of the presentation.

use crate::error::{Error, Result};
use crate::presentation::{EditRequest, Layout, Page, Presentation};
use crate::service::PresentationService;
use crate::types::Outline;

/// Text placed on the closing slide.
pub const CLOSING_LABEL: &str = "The End";

/// Builds and submits the edits that realize an outline.
#[derive(Debug, Clone)]
pub struct DeckSynthesizer {
    closing_label: String,
}

impl Default for DeckSynthesizer {
    fn default() -> Self {
        Self {
            closing_label: CLOSING_LABEL.to_string(),
        }
    }
}

impl DeckSynthesizer {
    /// Create a synthesizer with the default closing label.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different label on the closing slide.
    pub fn with_closing_label(mut self, label: impl Into<String>) -> Self {
        self.closing_label = label.into();
        self
    }

    /// Create a presentation for the outline and fill it in.
    ///
    /// Returns the id of the new presentation. Each call creates a new
    /// presentation; any service failure aborts the run.
    pub fn synthesize<S>(&self, outline: &Outline, service: &S) -> Result<String>
    where
        S: PresentationService + ?Sized,
    {
        let created = service.create(&outline.title)?;
        let presentation_id = created.presentation_id;
        log::info!("Created presentation {}", presentation_id);

        let structural = self.structural_requests(outline);
        service.batch_update(&presentation_id, &structural)?;
        log::debug!("Committed {} create-slide request(s)", structural.len());

        let committed = service.get(&presentation_id)?;
        let content = self.content_requests(outline, &committed)?;
        service.batch_update(&presentation_id, &content)?;
        log::debug!("Committed {} insert-text request(s)", content.len());

        Ok(presentation_id)
    }

    /// One content slide per outline slide, then the closing slide.
    pub fn structural_requests(&self, outline: &Outline) -> Vec<EditRequest> {
        let mut requests: Vec<EditRequest> = outline
            .slides
            .iter()
            .map(|_| EditRequest::create_slide(Layout::TitleAndBody))
            .collect();
        requests.push(EditRequest::create_slide(Layout::Title));

        debug_assert_eq!(requests.len(), outline.slides.len() + 1);
        requests
    }

    /// Text for the title slide, every content slide, and the closing slide.
    ///
    /// `presentation` must be the state read back after the structural
    /// batch: the default title slide, one slide per outline slide, and the
    /// closing slide.
    pub fn content_requests(
        &self,
        outline: &Outline,
        presentation: &Presentation,
    ) -> Result<Vec<EditRequest>> {
        let expected = outline.slides.len() + 2;
        if presentation.slides.len() < expected {
            return Err(Error::SynthesisError(format!(
                "presentation {} has {} slides, expected at least {}",
                presentation.presentation_id,
                presentation.slides.len(),
                expected
            )));
        }

        let mut requests = Vec::with_capacity(2 * outline.slides.len() + 2);

        let title_slide = &presentation.slides[0];
        requests.push(EditRequest::insert_text(
            element_id(title_slide, 0)?,
            outline.title.as_str(),
        ));

        for (record, page) in outline.slides.iter().zip(&presentation.slides[1..]) {
            requests.push(EditRequest::insert_text(
                element_id(page, 0)?,
                record.title.as_str(),
            ));
            requests.push(EditRequest::insert_text(
                element_id(page, 1)?,
                record.body_text(),
            ));
        }

        // Closing slide is always last, even if the service added extras.
        let closing = &presentation.slides[presentation.slides.len() - 1];
        requests.push(EditRequest::insert_text(
            element_id(closing, 0)?,
            self.closing_label.as_str(),
        ));

        debug_assert_eq!(requests.len(), 2 * outline.slides.len() + 2);
        Ok(requests)
    }
}

fn element_id(page: &Page, index: usize) -> Result<&str> {
    page.element_id(index).ok_or_else(|| {
        Error::SynthesisError(format!(
            "slide {} has no element at position {}",
            page.object_id, index
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakePresentationService;
    use crate::types::SlideRecord;

    fn outline_with(slides: &[(&str, &[&str])]) -> Outline {
        let mut outline = Outline::new().with_title("Deck Title");
        for (title, bullets) in slides {
            let mut record = SlideRecord::new();
            record.title = title.to_string();
            for bullet in *bullets {
                record.add_bullet(*bullet);
            }
            outline.add_slide(record);
        }
        outline
    }

    fn count_structural(requests: &[EditRequest]) -> usize {
        requests.iter().filter(|r| r.is_structural()).count()
    }

    #[test]
    fn test_structural_requests_count_and_layouts() {
        let outline = outline_with(&[("A", &[]), ("B", &[]), ("C", &[])]);
        let requests = DeckSynthesizer::new().structural_requests(&outline);

        assert_eq!(requests.len(), 4);
        assert!(requests[..3]
            .iter()
            .all(|r| *r == EditRequest::create_slide(Layout::TitleAndBody)));
        assert_eq!(requests[3], EditRequest::create_slide(Layout::Title));
    }

    #[test]
    fn test_synthesize_issues_expected_operation_counts() {
        for k in 1..=5 {
            let slides: Vec<(&str, &[&str])> = (0..k).map(|_| ("Slide", &["x", "y"][..])).collect();
            let outline = outline_with(&slides);
            let service = FakePresentationService::new();

            DeckSynthesizer::new().synthesize(&outline, &service).unwrap();

            let batches = service.batches();
            assert_eq!(batches.len(), 2);
            assert_eq!(count_structural(&batches[0]), k + 1);
            assert_eq!(batches[0].len(), k + 1);
            assert_eq!(count_structural(&batches[1]), 0);
            assert_eq!(batches[1].len(), 2 * k + 2);
        }
    }

    #[test]
    fn test_synthesize_places_text_positionally() {
        let outline = outline_with(&[
            ("Intro", &["point one", "point two"]),
            ("Details", &["only point"]),
        ]);
        let service = FakePresentationService::new();

        let id = DeckSynthesizer::new().synthesize(&outline, &service).unwrap();
        assert_eq!(id, service.presentation_id());

        assert_eq!(service.created_titles(), vec!["Deck Title"]);
        assert_eq!(
            service.text_of_slide(0),
            vec!["Deck Title".to_string()]
        );
        assert_eq!(
            service.text_of_slide(1),
            vec!["Intro".to_string(), "point one\npoint two".to_string()]
        );
        assert_eq!(
            service.text_of_slide(2),
            vec!["Details".to_string(), "only point".to_string()]
        );
        assert_eq!(service.text_of_slide(3), vec!["The End".to_string()]);
    }

    #[test]
    fn test_slide_without_bullets_gets_empty_body() {
        let outline = outline_with(&[("Empty", &[])]);
        let service = FakePresentationService::new();

        DeckSynthesizer::new().synthesize(&outline, &service).unwrap();

        assert_eq!(
            service.text_of_slide(1),
            vec!["Empty".to_string(), String::new()]
        );
    }

    #[test]
    fn test_custom_closing_label() {
        let outline = outline_with(&[("Only", &["a"])]);
        let service = FakePresentationService::new();

        DeckSynthesizer::new()
            .with_closing_label("Questions?")
            .synthesize(&outline, &service)
            .unwrap();

        assert_eq!(service.text_of_slide(2), vec!["Questions?".to_string()]);
    }

    #[test]
    fn test_content_requests_reject_short_presentation() {
        let outline = outline_with(&[("A", &["a"]), ("B", &["b"])]);
        let presentation = Presentation {
            presentation_id: "p".to_string(),
            title: String::new(),
            slides: vec![Page {
                object_id: "s0".to_string(),
                page_elements: Vec::new(),
            }],
        };

        let result = DeckSynthesizer::new().content_requests(&outline, &presentation);
        assert!(matches!(result, Err(Error::SynthesisError(_))));
    }

    #[test]
    fn test_content_requests_reject_missing_body_element() {
        let outline = outline_with(&[("A", &["a"])]);
        let page = |id: &str, elements: &[&str]| Page {
            object_id: id.to_string(),
            page_elements: elements
                .iter()
                .map(|e| crate::presentation::PageElement {
                    object_id: e.to_string(),
                })
                .collect(),
        };
        let presentation = Presentation {
            presentation_id: "p".to_string(),
            title: String::new(),
            slides: vec![page("s0", &["t0"]), page("s1", &["t1"]), page("s2", &["t2"])],
        };

        let err = DeckSynthesizer::new()
            .content_requests(&outline, &presentation)
            .unwrap_err();
        assert!(err.to_string().contains("s1"));
    }

    #[test]
    fn test_structural_failure_stops_synthesis() {
        let outline = outline_with(&[("A", &["a"])]);
        let service = FakePresentationService::new().failing_batch(0);

        let result = DeckSynthesizer::new().synthesize(&outline, &service);

        assert!(matches!(result, Err(Error::SynthesisError(_))));
        assert_eq!(service.get_calls(), 0);
    }

    #[test]
    fn test_content_failure_is_fatal() {
        let outline = outline_with(&[("A", &["a"])]);
        let service = FakePresentationService::new().failing_batch(1);

        let result = DeckSynthesizer::new().synthesize(&outline, &service);
        assert!(matches!(result, Err(Error::SynthesisError(_))));
    }

    #[test]
    fn test_each_run_creates_new_presentation() {
        let outline = outline_with(&[("A", &["a"])]);
        let service = FakePresentationService::new();
        let synthesizer = DeckSynthesizer::new();

        synthesizer.synthesize(&outline, &service).unwrap();
        synthesizer.synthesize(&outline, &service).unwrap();

        assert_eq!(service.created_titles().len(), 2);
    }
}
