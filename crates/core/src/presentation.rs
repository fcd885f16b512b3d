//! Presentation resources and edit requests.
//!
//! Field names follow the Slides REST API JSON so that backends can send
//! and receive these types as they are.

use serde::{Deserialize, Serialize};

/// A presentation as returned by the service after create or get.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub presentation_id: String,

    #[serde(default)]
    pub title: String,

    /// Slides in order, including the default title slide.
    #[serde(default)]
    pub slides: Vec<Page>,
}

/// One slide and its placeholder elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub object_id: String,

    /// Elements in layout order: title zone first, then body zone.
    #[serde(default)]
    pub page_elements: Vec<PageElement>,
}

impl Page {
    /// Object id of the element at `index`, if the layout has one there.
    pub fn element_id(&self, index: usize) -> Option<&str> {
        self.page_elements.get(index).map(|e| e.object_id.as_str())
    }
}

/// A shape on a slide that can receive text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElement {
    pub object_id: String,
}

/// Predefined slide layouts used by the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Layout {
    /// Title zone and body zone, used for content slides.
    TitleAndBody,
    /// Title zone only, used for the closing slide.
    Title,
}

/// Reference to a predefined layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutReference {
    #[serde(rename = "predefinedLayout")]
    pub predefined_layout: Layout,
}

/// One operation inside a batched edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditRequest {
    /// Structural edit: append a slide with the given layout.
    CreateSlide {
        #[serde(rename = "slideLayoutReference")]
        layout: LayoutReference,
    },
    /// Content edit: insert text into an existing element.
    InsertText {
        #[serde(rename = "objectId")]
        object_id: String,
        text: String,
    },
}

impl EditRequest {
    pub fn create_slide(layout: Layout) -> Self {
        EditRequest::CreateSlide {
            layout: LayoutReference {
                predefined_layout: layout,
            },
        }
    }

    pub fn insert_text(object_id: impl Into<String>, text: impl Into<String>) -> Self {
        EditRequest::InsertText {
            object_id: object_id.into(),
            text: text.into(),
        }
    }

    /// Whether this request creates a slide.
    pub fn is_structural(&self) -> bool {
        matches!(self, EditRequest::CreateSlide { .. })
    }
}
