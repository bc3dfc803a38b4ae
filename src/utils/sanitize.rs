//! Utilities for bounding untrusted text.

/// Truncates `text` to at most `max_len` bytes without splitting a character.
pub fn truncate_at_char_boundary(text: &str, max_len: usize) -> &str {
    if text.len() <= max_len {
        return text;
    }
    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
