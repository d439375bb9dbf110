//! Stylesheet generation for the current markup.

use super::state::GenerationState;
use crate::lm::{strip_code_fences, PromptPart, ReasoningClient};
use crate::prompts;
use crate::util::truncate_string;
use anyhow::{Context, Result};

/// Byte budget for the markup preview included in the style prompt. The full
/// document would dwarf the palette context without improving the CSS.
const MARKUP_PREVIEW_BYTES: usize = 800;

/// Generate CSS from a truncated markup preview and the element palette.
pub fn run(state: &mut GenerationState, lm: &dyn ReasoningClient) -> Result<()> {
    let preview = truncate_string(&state.markup, MARKUP_PREVIEW_BYTES);
    let colors = serde_json::to_string_pretty(&state.colors).context("serialize colors")?;
    let typography =
        serde_json::to_string_pretty(&state.typography).context("serialize typography")?;
    let layout = serde_json::to_string_pretty(&state.layout).context("serialize layout")?;
    let prompt = prompts::styles_prompt(&preview, &colors, &typography, &layout);
    let response = lm
        .invoke(&[PromptPart::Text(prompt)])
        .context("generate styles")?;
    let css = strip_code_fences(&response, "css");
    state.styles = strip_style_tags(&css);
    let entry = format!("styles generated ({} bytes)", state.styles.len());
    state.note(entry);
    Ok(())
}

/// Remove a stray `<style>` wrapper some models add around bare CSS.
fn strip_style_tags(css: &str) -> String {
    css.trim()
        .trim_start_matches("<style>")
        .trim_end_matches("</style>")
        .trim()
        .to_string()
}
