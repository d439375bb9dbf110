//! Design analysis: describe the template image in prose.

use super::state::GenerationState;
use crate::lm::{PromptPart, ReasoningClient};
use crate::prompts;
use anyhow::{Context, Result};

/// Send the template image for analysis and record the description.
pub fn run(state: &mut GenerationState, lm: &dyn ReasoningClient) -> Result<()> {
    let parts = [
        PromptPart::Text(prompts::analysis_prompt()),
        PromptPart::Image {
            mime: state.template.mime,
            base64_data: state.template.base64_data(),
        },
    ];
    state.design_analysis = lm.invoke(&parts).context("analyze design template")?;
    state.note("design analysis complete");
    Ok(())
}
