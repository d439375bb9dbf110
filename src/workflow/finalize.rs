//! Final step: swap placeholder tokens for image data and audit the result.

use super::state::GenerationState;
use crate::placeholder;
use anyhow::Result;

/// Resolve placeholder tokens against the provided images and record how the
/// run ended. Tokens the resolver does not recognize are left as literal text
/// so the mismatch is visible in the output rather than silently dropped.
pub fn run(state: &mut GenerationState) -> Result<()> {
    state.markup = placeholder::resolve_tokens(&state.markup, state.provided_images());

    let leftover = placeholder::unresolved_tokens(&state.markup);
    if leftover.is_empty() {
        state.note("generation complete");
    } else {
        tracing::warn!(
            tokens = leftover.len(),
            "placeholder tokens left unresolved in final document"
        );
        state.note(format!(
            "generation complete ({} unresolved placeholder tokens left as text)",
            leftover.len()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::test_provided;
    use crate::placeholder::SVG_PLACEHOLDER_DATA_URI;
    use crate::workflow::state::test_state;

    #[test]
    fn resolves_indexed_tokens_to_data_uris() {
        let mut state = test_state(test_provided(2));
        state.markup =
            "<img src=\"{{USER_IMAGE_0}}\"><img src=\"{{USER_IMAGE_1}}\">".to_string();

        run(&mut state).unwrap();

        assert!(state.markup.contains("data:image/png;base64,IMG0"));
        assert!(state.markup.contains("data:image/png;base64,IMG1"));
        assert!(!state.markup.contains("{{USER_IMAGE_"));
        assert_eq!(state.log(), ["generation complete"]);
    }

    #[test]
    fn resolves_sentinel_to_inline_svg() {
        let mut state = test_state(Vec::new());
        state.markup = "<img src=\"{{IMAGE_PLACEHOLDER_SVG}}\">".to_string();

        run(&mut state).unwrap();

        assert!(state.markup.contains(SVG_PLACEHOLDER_DATA_URI));
        assert_eq!(state.log(), ["generation complete"]);
    }

    #[test]
    fn unknown_tokens_survive_and_are_counted() {
        let mut state = test_state(test_provided(1));
        state.markup =
            "<img src=\"{{USER_IMAGE_0}}\"><img src=\"{{USER_IMAGE_7}}\">".to_string();

        run(&mut state).unwrap();

        assert!(state.markup.contains("{{USER_IMAGE_7}}"));
        assert_eq!(
            state.log(),
            ["generation complete (1 unresolved placeholder tokens left as text)"]
        );
    }
}
