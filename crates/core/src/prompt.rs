//! Instruction template sent to the text generation service.

use crate::outline::{BULLET_PREFIX, END_MARKER, IMAGE_PREFIX, START_MARKER, TITLE_PREFIX};

/// Fewest slides the model is asked for.
pub const MIN_SLIDES: usize = 3;

/// Most slides the model is asked for.
pub const MAX_SLIDES: usize = 25;

/// Build the outline request for a document's text.
///
/// The example block uses the same markers the parser looks for, so the
/// answer can be read back with [`crate::OutlineParser`].
pub fn build_outline_prompt(document_text: &str) -> String {
    format!(
        "Please use the following document contents in order to build the outline of
a slideshow. The slideshow must have at least {min} slides, but can have up
to {max}. Each slide should have a title, at least two content bullet points,
and a url for an image. The outline should follow this format for each slide:

{start}
{title}The title of the slide here
{bullet}example bullet point 1
{bullet}example bullet point 2
{bullet}example bullet point 3
{image}https://example.com/an-image-for-this-slide.png
{end}

The document:
{document_text}",
        min = MIN_SLIDES,
        max = MAX_SLIDES,
        start = START_MARKER,
        title = TITLE_PREFIX,
        bullet = BULLET_PREFIX,
        image = IMAGE_PREFIX,
        end = END_MARKER,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::parse_outline;

    #[test]
    fn test_prompt_embeds_document_last() {
        let prompt = build_outline_prompt("The quarterly numbers are up.");
        assert!(prompt.ends_with("The document:\nThe quarterly numbers are up."));
    }

    #[test]
    fn test_prompt_states_slide_bounds() {
        let prompt = build_outline_prompt("");
        assert!(prompt.contains("at least 3 slides"));
        assert!(prompt.contains("up\nto 25"));
    }

    #[test]
    fn test_prompt_example_is_parseable() {
        // The example block alone must read back as one slide.
        let outline = parse_outline(&build_outline_prompt("")).unwrap();

        assert_eq!(outline.slides.len(), 1);
        let slide = &outline.slides[0];
        assert_eq!(slide.title, "The title of the slide here");
        assert_eq!(slide.bullets.len(), 3);
        assert!(slide.image_ref.is_some());
    }
}
