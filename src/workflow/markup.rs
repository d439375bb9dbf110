//! HTML structure generation from the extracted elements.

use super::state::GenerationState;
use crate::lm::{strip_code_fences, PromptPart, ReasoningClient};
use crate::prompts;
use anyhow::{Context, Result};

/// Generate the document structure, with slot tokens standing in for images.
///
/// Output is taken as-is after fence stripping. A degraded structure flows
/// onward and gets another chance in the refinement pass.
pub fn run(state: &mut GenerationState, lm: &dyn ReasoningClient) -> Result<()> {
    let layout = serde_json::to_string_pretty(&state.layout).context("serialize layout")?;
    let slots = serde_json::to_string_pretty(&state.slots).context("serialize image slots")?;
    let prompt = prompts::markup_prompt(&state.design_analysis, &layout, &slots);
    let response = lm
        .invoke(&[PromptPart::Text(prompt)])
        .context("generate markup")?;
    state.markup = strip_code_fences(&response, "html");
    let entry = format!("markup generated ({} bytes)", state.markup.len());
    state.note(entry);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::test_provided;
    use crate::lm::testing::ScriptedClient;
    use crate::workflow::state::{test_state, ImageSlot};

    fn slot_with_token(token: &str) -> ImageSlot {
        ImageSlot {
            location: "header".to_string(),
            kind: "hero".to_string(),
            purpose: "banner".to_string(),
            size: "large".to_string(),
            description: "skyline".to_string(),
            token: token.to_string(),
        }
    }

    #[test]
    fn fenced_markup_is_unwrapped() {
        let mut state = test_state(Vec::new());
        let lm = ScriptedClient::new(&["```html\n<header>hi</header>\n```"]);

        run(&mut state, &lm).unwrap();

        assert_eq!(state.markup, "<header>hi</header>");
        assert_eq!(state.log().len(), 1);
    }

    #[test]
    fn unfenced_markup_passes_through() {
        let mut state = test_state(Vec::new());
        let lm = ScriptedClient::new(&["<main>content</main>"]);

        run(&mut state, &lm).unwrap();
        assert_eq!(state.markup, "<main>content</main>");
    }

    #[test]
    fn prompt_serializes_slots_with_tokens() {
        let mut state = test_state(test_provided(1));
        state.design_analysis = "hero page".to_string();
        state.slots = vec![slot_with_token("{{USER_IMAGE_0}}")];
        let lm = ScriptedClient::new(&["<header></header>"]);

        run(&mut state, &lm).unwrap();

        let prompt = lm.prompt(0);
        assert!(prompt.contains("hero page"));
        assert!(prompt.contains("{{USER_IMAGE_0}}"));
        assert!(prompt.contains("\"type\": \"hero\""));
    }
}
