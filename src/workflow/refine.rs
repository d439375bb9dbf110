//! Refinement pass over the merged document.
//!
//! The response replaces the document only when it is recognizably a full
//! HTML document; fragments and commentary are discarded and the previous
//! markup stands. The pass counter advances either way so the loop always
//! terminates.

use super::state::GenerationState;
use crate::lm::{strip_code_fences, PromptPart, ReasoningClient};
use crate::prompts;
use anyhow::{Context, Result};

/// Run one refinement pass and advance the pass counter.
pub fn run(state: &mut GenerationState, lm: &dyn ReasoningClient) -> Result<()> {
    let prompt =
        prompts::refinement_prompt(&state.markup, &state.design_analysis, state.slots.len());
    let response = lm
        .invoke(&[PromptPart::Text(prompt)])
        .context("refine document")?;
    let refined = strip_code_fences(&response, "html");

    let pass = state.iteration_count + 1;
    if is_full_document(&refined) {
        state.markup = refined;
        state.note(format!("refinement pass {pass} applied"));
    } else {
        state.note(format!(
            "refinement pass {pass} discarded (response was not a full document)"
        ));
    }
    state.iteration_count += 1;
    Ok(())
}

/// A usable refinement is a complete document, not a fragment or commentary.
fn is_full_document(text: &str) -> bool {
    text.contains("<!DOCTYPE html>") || text.contains("<html")
}
