//! Fenced code opener detection.
//!
//! A run of three backticks opens a fenced block only when nothing but
//! whitespace follows it up to a line break (or the end of the text), and
//! only at the start of the text, right after a line break, or right after a
//! quote marker.

use crate::marker::Marker;

const FENCE: &str = Marker::PreformattedBlock.as_str();

/// Returns true if a fenced block opens at byte offset `i` of `text`.
pub fn opens_fence(text: &str, i: usize) -> bool {
    let Some(rest) = text.get(i..) else {
        return false;
    };
    let Some(after) = rest.strip_prefix(FENCE) else {
        return false;
    };
    at_fence_boundary(text.as_bytes(), i) && trailing_whitespace_ends_line(after)
}

/// Length of the whitespace and line break that follow an opening fence.
///
/// `after` starts right after the three backticks. The padding belongs to the
/// opener, so fenced content starts on the next line. Returns 0 when no line
/// break follows.
pub fn opener_padding(after: &str) -> usize {
    for (i, b) in after.bytes().enumerate() {
        match b {
            b'\n' => return i + 1,
            b' ' | b'\t' | b'\r' | b'\x0B' | b'\x0C' => {}
            _ => return 0,
        }
    }
    0
}

fn at_fence_boundary(bytes: &[u8], i: usize) -> bool {
    i == 0 || matches!(bytes[i - 1], b'\n' | b'>')
}

/// Whitespace (line breaks included) up to either a line break or the end.
fn trailing_whitespace_ends_line(after: &str) -> bool {
    let mut chars = after.chars();
    let mut saw_break = false;
    for c in chars.by_ref() {
        if c == '\n' {
            saw_break = true;
        } else if !c.is_whitespace() {
            return saw_break;
        }
    }
    true
}
