//! In-memory service fakes shared by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::presentation::{EditRequest, Page, PageElement, Presentation};
use crate::service::{DocumentSource, PresentationService, TextGenerator};
use crate::types::SourceDocument;

/// Document source returning a fixed document, or an error.
pub struct FakeDocumentSource {
    document: Option<SourceDocument>,
    requested: Mutex<Vec<String>>,
}

impl FakeDocumentSource {
    pub fn new(title: &str, text: &str) -> Self {
        Self {
            document: Some(SourceDocument {
                title: title.to_string(),
                text: text.to_string(),
            }),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn unreadable() -> Self {
        Self {
            document: None,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl DocumentSource for FakeDocumentSource {
    fn fetch(&self, document_id: &str) -> Result<SourceDocument> {
        self.requested.lock().unwrap().push(document_id.to_string());
        self.document
            .clone()
            .ok_or_else(|| Error::FetchError(format!("document {} not found", document_id)))
    }
}

/// Generator returning a canned completion and recording prompts.
pub struct FakeTextGenerator {
    completion: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl FakeTextGenerator {
    pub fn new(completion: &str) -> Self {
        Self {
            completion: Some(completion.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            completion: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl TextGenerator for FakeTextGenerator {
    fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.completion
            .clone()
            .ok_or_else(|| Error::GenerationError("connection refused".to_string()))
    }
}

#[derive(Default)]
struct FakeState {
    created: Vec<String>,
    batches: Vec<Vec<EditRequest>>,
    slides: Vec<Page>,
    text: HashMap<String, String>,
    next_id: usize,
    get_calls: usize,
}

impl FakeState {
    fn add_page(&mut self, elements: usize) {
        let slide_id = format!("slide_{}", self.next_id);
        self.next_id += 1;
        let page_elements = (0..elements)
            .map(|i| PageElement {
                object_id: format!("{}_e{}", slide_id, i),
            })
            .collect();
        self.slides.push(Page {
            object_id: slide_id,
            page_elements,
        });
    }
}

/// Presentation service that applies edits to an in-memory deck.
///
/// Mirrors the real service: a new presentation has one title slide, and
/// element ids are only visible through `get` after a batch commits.
pub struct FakePresentationService {
    state: Mutex<FakeState>,
    fail_batch: Option<usize>,
}

impl FakePresentationService {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState::default()),
            fail_batch: None,
        }
    }

    /// Reject the batch with the given zero-based index.
    pub fn failing_batch(mut self, index: usize) -> Self {
        self.fail_batch = Some(index);
        self
    }

    pub fn presentation_id(&self) -> String {
        presentation_id(&self.state.lock().unwrap())
    }

    pub fn created_titles(&self) -> Vec<String> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn batches(&self) -> Vec<Vec<EditRequest>> {
        self.state.lock().unwrap().batches.clone()
    }

    pub fn get_calls(&self) -> usize {
        self.state.lock().unwrap().get_calls
    }

    /// Text inserted into each element of a slide, in element order.
    pub fn text_of_slide(&self, index: usize) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.slides[index]
            .page_elements
            .iter()
            .filter_map(|e| state.text.get(&e.object_id).cloned())
            .collect()
    }
}

fn presentation_id(state: &FakeState) -> String {
    format!("pres_{}", state.created.len())
}

fn snapshot(state: &FakeState) -> Presentation {
    Presentation {
        presentation_id: presentation_id(state),
        title: state.created.last().cloned().unwrap_or_default(),
        slides: state.slides.clone(),
    }
}

impl PresentationService for FakePresentationService {
    fn create(&self, title: &str) -> Result<Presentation> {
        let mut state = self.state.lock().unwrap();
        state.created.push(title.to_string());
        state.slides.clear();
        state.text.clear();
        state.add_page(2);
        let presentation = snapshot(&state);
        // Only the id is meaningful before a read-back.
        Ok(Presentation {
            slides: Vec::new(),
            ..presentation
        })
    }

    fn batch_update(&self, presentation_id: &str, requests: &[EditRequest]) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let index = state.batches.len();
        state.batches.push(requests.to_vec());

        if self.fail_batch == Some(index) {
            return Err(Error::SynthesisError(format!(
                "batch {} rejected for {}",
                index, presentation_id
            )));
        }

        for request in requests {
            match request {
                // Both layouts carry two placeholders.
                EditRequest::CreateSlide { .. } => state.add_page(2),
                EditRequest::InsertText { object_id, text } => {
                    let known = state
                        .slides
                        .iter()
                        .flat_map(|s| &s.page_elements)
                        .any(|e| &e.object_id == object_id);
                    if !known {
                        return Err(Error::SynthesisError(format!(
                            "unknown object id {}",
                            object_id
                        )));
                    }
                    state.text.insert(object_id.clone(), text.clone());
                }
            }
        }

        Ok(())
    }

    fn get(&self, _presentation_id: &str) -> Result<Presentation> {
        let mut state = self.state.lock().unwrap();
        state.get_calls += 1;
        Ok(snapshot(&state))
    }
}
