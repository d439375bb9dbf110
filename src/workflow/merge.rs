//! Merge the stylesheet into the markup as one self-contained document.

use super::state::GenerationState;
use anyhow::Result;

/// Embed the styles in the document head, synthesizing a document shell when
/// the markup has no head to receive them. Purely local; no service call.
pub fn run(state: &mut GenerationState) -> Result<()> {
    if let Some(head_end) = state.markup.find("</head>") {
        let style_block = format!("<style>\n{}\n</style>\n", state.styles);
        state.markup.insert_str(head_end, &style_block);
    } else {
        state.markup = document_shell(&state.markup, &state.styles);
    }
    state.note("styles merged into document");
    Ok(())
}

fn document_shell(markup: &str, styles: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Generated Template</title>
    <style>
{styles}
    </style>
</head>
<body>
{markup}
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::state::test_state;

    #[test]
    fn styles_are_inserted_before_the_head_close() {
        let mut state = test_state(Vec::new());
        state.markup = "<html><head><title>t</title></head><body>x</body></html>".to_string();
        state.styles = "body { margin: 0; }".to_string();

        run(&mut state).unwrap();

        let style_at = state.markup.find("<style>").unwrap();
        let head_close_at = state.markup.find("</head>").unwrap();
        assert!(style_at < head_close_at);
        assert!(state.markup.contains("body { margin: 0; }"));
        // body content untouched
        assert!(state.markup.contains("<body>x</body>"));
    }

    #[test]
    fn headless_markup_gets_a_document_shell() {
        let mut state = test_state(Vec::new());
        state.markup = "<section>bare fragment</section>".to_string();
        state.styles = ".hero { display: flex; }".to_string();

        run(&mut state).unwrap();

        assert!(state.markup.starts_with("<!DOCTYPE html>"));
        assert!(state.markup.contains("<meta charset=\"UTF-8\">"));
        // original markup lands verbatim in the body
        assert!(state.markup.contains("<section>bare fragment</section>"));
        // styles land verbatim in the style block
        assert!(state.markup.contains(".hero { display: flex; }"));
        let body_at = state.markup.find("<body>").unwrap();
        let fragment_at = state.markup.find("<section>").unwrap();
        assert!(fragment_at > body_at);
    }

    #[test]
    fn merge_appends_one_log_entry() {
        let mut state = test_state(Vec::new());
        state.markup = "<div></div>".to_string();
        run(&mut state).unwrap();
        assert_eq!(state.log(), ["styles merged into document"]);
    }
}
