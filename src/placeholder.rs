//! Placeholder tokens standing in for images during generation.
//!
//! Markup is generated with stable `{{USER_IMAGE_N}}` and
//! `{{IMAGE_PLACEHOLDER_SVG}}` tokens instead of inline image data, so prompts
//! stay small and caller images never reach the reasoning service. Finalize
//! swaps the tokens for data URIs once the document text has settled.

use crate::images::ProvidedImage;

/// Token emitted for every slot when the caller supplied no images.
pub const SVG_PLACEHOLDER_TOKEN: &str = "{{IMAGE_PLACEHOLDER_SVG}}";

/// Inline SVG shown wherever a slot has no caller image to fill it.
pub const SVG_PLACEHOLDER_DATA_URI: &str = "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='800' height='600'%3E%3Crect width='800' height='600' fill='%23ddd'/%3E%3Ctext x='50%25' y='50%25' text-anchor='middle' fill='%23999' font-size='24'%3EImage Placeholder%3C/text%3E%3C/svg%3E";

/// Token for the slot at `slot_index` given how many caller images exist.
///
/// With no caller images every slot gets the SVG sentinel. Otherwise indexes
/// cycle through the caller images so a small set covers many slots.
pub fn slot_token(slot_index: usize, provided_count: usize) -> String {
    if provided_count == 0 {
        return SVG_PLACEHOLDER_TOKEN.to_string();
    }
    format!("{{{{USER_IMAGE_{}}}}}", slot_index % provided_count)
}

/// Replace every known token with embeddable image data.
///
/// The sentinel becomes the inline SVG; `{{USER_IMAGE_i}}` becomes the i-th
/// caller image's data URI. Tokens with no matching image are left as literal
/// text, never an error.
pub fn resolve_tokens(markup: &str, provided: &[ProvidedImage]) -> String {
    let mut resolved = markup.replace(SVG_PLACEHOLDER_TOKEN, SVG_PLACEHOLDER_DATA_URI);
    for (index, image) in provided.iter().enumerate() {
        let token = format!("{{{{USER_IMAGE_{index}}}}}");
        resolved = resolved.replace(&token, &image.data_uri);
    }
    resolved
}

/// Scan for token syntax still present after resolution.
pub fn unresolved_tokens(markup: &str) -> Vec<String> {
    let pattern = regex::Regex::new(r"\{\{(?:USER_IMAGE_\d+|IMAGE_PLACEHOLDER_SVG)\}\}").unwrap();
    pattern
        .find_iter(markup)
        .map(|found| found.as_str().to_string())
        .collect()
}
