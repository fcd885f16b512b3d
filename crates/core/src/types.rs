//! Domain types for representing a generated slide-deck outline.

use serde::{Deserialize, Serialize};

/// Title given to a slide whose block never carried a `Title:` line.
pub const PLACEHOLDER_TITLE: &str = "[UNNAMED]";

/// A deck outline: a title plus slides in presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    /// Deck title, used for the presentation resource and the title slide.
    pub title: String,

    /// Content slides in presentation order.
    pub slides: Vec<SlideRecord>,
}

impl Outline {
    /// Create an untitled outline with no slides.
    pub fn new() -> Self {
        Self {
            title: String::new(),
            slides: Vec::new(),
        }
    }

    /// Replace the deck title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Append a finished slide.
    pub fn add_slide(&mut self, slide: SlideRecord) {
        self.slides.push(slide);
    }

    /// Number of content slides (title and closing slides excluded).
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether the outline has no content slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

impl Default for Outline {
    fn default() -> Self {
        Self::new()
    }
}

/// One slide: title, bullets and an optional image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideRecord {
    pub title: String,

    /// Bullet points, in the order they should be presented.
    pub bullets: Vec<String>,

    /// Image URL suggested by the model. Carried but never fetched.
    pub image_ref: Option<String>,
}

impl SlideRecord {
    /// Create a slide with the placeholder title and no bullets.
    pub fn new() -> Self {
        Self {
            title: PLACEHOLDER_TITLE.to_string(),
            bullets: Vec::new(),
            image_ref: None,
        }
    }

    /// Add a bullet point.
    pub fn add_bullet(&mut self, text: impl Into<String>) {
        self.bullets.push(text.into());
    }

    /// Bullets joined into one newline-separated body.
    pub fn body_text(&self) -> String {
        self.bullets.join("\n")
    }
}

impl Default for SlideRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// A fetched source document, reduced to its title and plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub title: String,

    /// All text runs concatenated in document order.
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_slide_has_placeholder_title() {
        let slide = SlideRecord::new();
        assert_eq!(slide.title, PLACEHOLDER_TITLE);
        assert!(slide.bullets.is_empty());
        assert!(slide.image_ref.is_none());
    }

    #[test]
    fn test_body_text_joins_bullets_in_order() {
        let mut slide = SlideRecord::new();
        slide.add_bullet("first");
        slide.add_bullet("second");
        slide.add_bullet("third");
        assert_eq!(slide.body_text(), "first\nsecond\nthird");
    }

    #[test]
    fn test_body_text_empty_without_bullets() {
        assert_eq!(SlideRecord::new().body_text(), "");
    }

    #[test]
    fn test_outline_with_title() {
        let mut outline = Outline::new();
        outline.add_slide(SlideRecord::new());
        let outline = outline.with_title("Quarterly Review");

        assert_eq!(outline.title, "Quarterly Review");
        assert_eq!(outline.len(), 1);
        assert!(!outline.is_empty());
    }

    #[test]
    fn test_outline_serializes_to_json() {
        let mut slide = SlideRecord::new();
        slide.title = "Intro".to_string();
        slide.add_bullet("point one");
        let mut outline = Outline::new().with_title("Deck");
        outline.add_slide(slide);

        let json = serde_json::to_value(&outline).unwrap();
        assert_eq!(json["title"], "Deck");
        assert_eq!(json["slides"][0]["title"], "Intro");
        assert_eq!(json["slides"][0]["bullets"][0], "point one");
        assert!(json["slides"][0]["image_ref"].is_null());
    }
}
