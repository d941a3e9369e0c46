//! Conversation title derivation.

/// Title used when a conversation is saved without any draft text.
pub const DEFAULT_TITLE: &str = "New Conversation";

/// Maximum title length in bytes.
pub const TITLE_MAX_BYTES: usize = 50;

/// Derive a conversation title from the draft that opened the turn.
///
/// Takes the first [`TITLE_MAX_BYTES`] of the draft without splitting a
/// UTF-8 character; an empty draft (attachment-only send) yields
/// [`DEFAULT_TITLE`].
pub fn derive_title(draft: &str) -> String {
    if draft.is_empty() {
        return DEFAULT_TITLE.to_string();
    }
    truncate_str(draft, TITLE_MAX_BYTES).to_string()
}

/// Truncate to at most `max_bytes` without splitting a UTF-8 character
/// boundary. Returns a sub-slice of the original string.
fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
