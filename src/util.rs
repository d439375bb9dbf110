use std::borrow::Cow;

/// Truncate `text` to at most `max_bytes`, never splitting a character.
pub fn truncate_string(text: &str, max_bytes: usize) -> String {
    if text.len() <= max_bytes {
        return text.to_string();
    }
    let mut truncated = String::new();
    for ch in text.chars() {
        if truncated.len() + ch.len_utf8() > max_bytes {
            break;
        }
        truncated.push(ch);
    }
    truncated
}

/// Bounded single-line snippet of service output for error messages.
pub fn error_snippet(text: &str) -> String {
    let flattened: Cow<'_, str> = if text.contains('\n') {
        Cow::Owned(text.replace('\n', " "))
    } else {
        Cow::Borrowed(text)
    };
    truncate_string(flattened.trim(), 300)
}
