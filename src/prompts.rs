//! Prompt assembly for the generation steps.
//!
//! Template bodies live under `prompts/` and are compiled in; `{placeholder}`
//! substrings are filled per step. Image data never appears in prompt text;
//! slots are described by their tokens and caller images only by their count.

// Prompt templates loaded at compile time
const DESIGN_ANALYSIS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/prompts/design_analysis.md"
));
const ELEMENT_EXTRACTION: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/prompts/element_extraction.md"
));
const MARKUP_GENERATION: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/prompts/markup_generation.md"
));
const STYLE_GENERATION: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/prompts/style_generation.md"
));
const REFINEMENT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/prompts/refinement.md"
));

/// Prompt for the vision pass over the template image.
pub fn analysis_prompt() -> String {
    DESIGN_ANALYSIS.to_string()
}

/// Prompt asking for the structured element JSON.
pub fn extraction_prompt(design_analysis: &str, provided_image_count: usize) -> String {
    ELEMENT_EXTRACTION
        .replace("{design_analysis}", design_analysis)
        .replace("{provided_image_count}", &provided_image_count.to_string())
}

/// Prompt for HTML structure generation with slot tokens in place of images.
pub fn markup_prompt(design_analysis: &str, layout: &str, image_slots: &str) -> String {
    MARKUP_GENERATION
        .replace("{design_analysis}", design_analysis)
        .replace("{layout}", layout)
        .replace("{image_slots}", image_slots)
}

/// Prompt for stylesheet generation against a truncated markup preview.
pub fn styles_prompt(markup_preview: &str, colors: &str, typography: &str, layout: &str) -> String {
    STYLE_GENERATION
        .replace("{markup_preview}", markup_preview)
        .replace("{colors}", colors)
        .replace("{typography}", typography)
        .replace("{layout}", layout)
}

/// Prompt for the refinement pass over the merged document.
pub fn refinement_prompt(markup: &str, design_analysis: &str, slot_count: usize) -> String {
    REFINEMENT
        .replace("{markup}", markup)
        .replace("{design_analysis}", design_analysis)
        .replace("{slot_count}", &slot_count.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_prompt_fills_placeholders() {
        let prompt = extraction_prompt("two-column landing page", 3);
        assert!(prompt.contains("two-column landing page"));
        assert!(prompt.contains("3 image(s)"));
        assert!(!prompt.contains("{design_analysis}"));
        assert!(!prompt.contains("{provided_image_count}"));
    }

    #[test]
    fn markup_prompt_carries_slot_tokens() {
        let slots = r#"[{"token": "{{USER_IMAGE_0}}"}]"#;
        let prompt = markup_prompt("analysis", "{\"type\": \"grid\"}", slots);
        assert!(prompt.contains("{{USER_IMAGE_0}}"));
        assert!(!prompt.contains("{image_slots}"));
    }

    #[test]
    fn styles_prompt_fills_all_sections() {
        let prompt = styles_prompt("<body></body>", "{}", "{}", "{}");
        assert!(prompt.contains("<body></body>"));
        assert!(!prompt.contains("{markup_preview}"));
        assert!(!prompt.contains("{colors}"));
    }

    #[test]
    fn refinement_prompt_mentions_token_count() {
        let prompt = refinement_prompt("<html></html>", "analysis", 2);
        assert!(prompt.contains("2 image placeholder token(s)"));
        assert!(!prompt.contains("{slot_count}"));
    }
}
