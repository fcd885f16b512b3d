//! Outline extraction from generated text.
//!
//! The generation service is asked to answer in a line-oriented format:
//!
//! ```text
//! NEW SLIDE ======
//! Title: The title of the slide here
//! - example bullet point 1
//! - example bullet point 2
//! Image URL: https://example.com/picture.png
//! END SLIDE ======
//! ```
//!
//! Nothing guarantees the model follows it, so parsing is tolerant: lines
//! that match no rule are skipped, fields may come in any order or repeat,
//! and only blocks closed by an end marker make it into the outline.

use crate::error::ParseError;
use crate::types::{Outline, SlideRecord};

/// Line that opens a slide block.
pub const START_MARKER: &str = "NEW SLIDE ======";

/// Line that closes a slide block.
pub const END_MARKER: &str = "END SLIDE ======";

/// Prefix of the slide title line.
pub const TITLE_PREFIX: &str = "Title: ";

/// Prefix of a bullet line.
pub const BULLET_PREFIX: &str = "- ";

/// Prefix of the image reference line.
pub const IMAGE_PREFIX: &str = "Image URL: ";

/// Classification of a single trimmed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Start,
    End,
    Title(&'a str),
    Bullet(&'a str),
    Image(&'a str),
    Other,
}

impl<'a> Line<'a> {
    fn classify(raw: &'a str) -> Self {
        let line = raw.trim();

        if line == START_MARKER {
            Line::Start
        } else if line == END_MARKER {
            Line::End
        } else if let Some(rest) = line.strip_prefix(TITLE_PREFIX) {
            Line::Title(rest)
        } else if let Some(rest) = line.strip_prefix(BULLET_PREFIX) {
            Line::Bullet(rest)
        } else if let Some(rest) = line.strip_prefix(IMAGE_PREFIX) {
            Line::Image(rest)
        } else {
            Line::Other
        }
    }
}

/// Parser for model-generated slide outlines.
#[derive(Debug, Clone, Default)]
pub struct OutlineParser;

impl OutlineParser {
    /// Create a new outline parser.
    pub fn new() -> Self {
        Self
    }

    /// Recover the slides from generated text.
    ///
    /// - A start marker opens a fresh slide. A slide that was still open is
    ///   thrown away.
    /// - An end marker appends the open slide, however incomplete.
    /// - A slide still open when the text ends is dropped.
    /// - Field lines and end markers outside an open slide are ignored.
    ///
    /// The returned outline is untitled; fails with [`ParseError::Empty`]
    /// when no slide was closed.
    pub fn parse(&self, raw: &str) -> Result<Outline, ParseError> {
        let mut outline = Outline::new();
        let mut current: Option<SlideRecord> = None;
        let mut discarded = 0usize;

        for line in raw.lines() {
            match Line::classify(line) {
                Line::Start => {
                    if current.replace(SlideRecord::new()).is_some() {
                        discarded += 1;
                    }
                }
                Line::End => {
                    if let Some(slide) = current.take() {
                        outline.add_slide(slide);
                    }
                }
                Line::Title(title) => {
                    if let Some(slide) = current.as_mut() {
                        slide.title = title.to_string();
                    }
                }
                Line::Bullet(bullet) => {
                    if let Some(slide) = current.as_mut() {
                        slide.add_bullet(bullet);
                    }
                }
                Line::Image(url) => {
                    if let Some(slide) = current.as_mut() {
                        slide.image_ref = Some(url.to_string());
                    }
                }
                Line::Other => {}
            }
        }

        if current.is_some() {
            discarded += 1;
        }

        if discarded > 0 {
            log::debug!("Discarded {} unterminated slide block(s)", discarded);
        }

        if outline.is_empty() {
            return Err(ParseError::Empty {
                raw: raw.to_string(),
            });
        }

        log::debug!("Recovered {} slide(s) from generated outline", outline.len());

        Ok(outline)
    }
}

/// Parse generated text with the default parser.
pub fn parse_outline(raw: &str) -> Result<Outline, ParseError> {
    OutlineParser::new().parse(raw)
}
