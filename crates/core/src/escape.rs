//! Escaping for literal and verbatim runs, plus the directive pre-check.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Returns true if `text` contains any marker character at all.
///
/// A `false` result guarantees the scanner finds no directive, so callers
/// may skip straight to escaping.
pub fn contains_directives(text: &str) -> bool {
    text.bytes()
        .any(|b| matches!(b, b'*' | b'_' | b'~' | b'`' | b'>'))
}

/// Escapes a literal text run for insertion into markup.
///
/// `&`, `<`, `'` and `"` are always escaped. `>` is escaped only when the
/// character right before it is a letter, number, punctuation mark, or `<`,
/// so a quote marker at the start of a line (or run) survives unchanged.
pub fn escape_directive_text(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '\'', '"']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    let mut prev: Option<char> = None;
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            '>' if prev.is_some_and(glues_gt) => out.push_str("&gt;"),
            _ => out.push(c),
        }
        prev = Some(c);
    }
    Cow::Owned(out)
}

/// Structural escaping for code content that is never scanned for directives.
pub fn escape_verbatim(text: &str) -> Cow<'_, str> {
    html_escape::encode_text(text)
}

/// Unicode letter, number, or punctuation (`\p{L}`, `\p{N}`, `\p{P}`).
pub fn is_word_or_punct(c: char) -> bool {
    let mut buf = [0u8; 4];
    WORD_OR_PUNCT.is_match(c.encode_utf8(&mut buf))
}

static WORD_OR_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{N}\p{P}]$").expect("valid pattern"));

/// Whether a `>` right after `prev` is ordinary text rather than a quote
/// marker.
///
/// `<` counts because its escaped spelling `&lt;` ends in a punctuation mark.
pub fn glues_gt(prev: char) -> bool {
    prev == '<' || is_word_or_punct(prev)
}
