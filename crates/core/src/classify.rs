//! Marker classification: does a directive start at this offset, and which one?

use crate::code_fence::opens_fence;
use crate::escape::glues_gt;
use crate::marker::{DirectiveKind, Marker};

/// Whether the classifier looks for an opener or a closer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Opening position: span markers must have a partner later on the line.
    Opening,
    /// Closing position: no partner lookahead.
    Closing,
}

/// Classifies the marker starting at byte offset `i` of `text`.
///
/// Rules, in order:
/// 1. the remaining text is exactly a marker literal;
/// 2. a fenced code opener at a fence boundary;
/// 3. a single-character marker not followed by the same character.
///
/// In [`Mode::Opening`] a span marker is rejected unless the same marker
/// appears again before the next line break.
///
/// `i` must be a char boundary of `text`.
pub fn classify(text: &str, i: usize, mode: Mode) -> Option<Marker> {
    let rest = text.get(i..)?;
    if rest.is_empty() {
        return None;
    }

    let marker = if rest.len() <= Marker::PreformattedBlock.len() + 1
        && let Some(marker) = Marker::from_literal(rest)
    {
        marker
    } else if opens_fence(text, i) {
        Marker::PreformattedBlock
    } else {
        let bytes = rest.as_bytes();
        let marker = Marker::from_byte(bytes[0])?;
        if bytes.get(1) == Some(&bytes[0]) {
            return None;
        }
        marker
    };

    if marker == Marker::Quote && !quote_may_open(text, i) {
        return None;
    }

    if mode == Mode::Opening
        && marker.kind() == DirectiveKind::Span
        && !closable_on_line(&rest[marker.len()..], marker)
    {
        return None;
    }

    Some(marker)
}

/// A `>` glued to a word or punctuation mark is ordinary text.
fn quote_may_open(text: &str, i: usize) -> bool {
    !text[..i].chars().next_back().is_some_and(glues_gt)
}

/// Advisory lookahead: the span marker reappears before the line ends.
fn closable_on_line(after: &str, marker: Marker) -> bool {
    let line = after.split('\n').next().unwrap_or("");
    line.contains(marker.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(text: &str, i: usize) -> Option<Marker> {
        classify(text, i, Mode::Opening)
    }

    #[test]
    fn recognizes_span_markers_with_partner() {
        assert_eq!(open("*bold*", 0), Some(Marker::Strong));
        assert_eq!(open("_em_", 0), Some(Marker::Emphasis));
        assert_eq!(open("~gone~", 0), Some(Marker::Strike));
        assert_eq!(open("`code`", 0), Some(Marker::Preformatted));
    }

    #[test]
    fn span_without_partner_on_line_is_rejected() {
        assert_eq!(open("*not closed", 0), None);
        assert_eq!(open("*not closed\nhere*", 0), None);
    }

    #[test]
    fn closing_mode_skips_partner_lookahead() {
        assert_eq!(classify("* trailing", 0, Mode::Closing), Some(Marker::Strong));
        assert_eq!(classify("*", 0, Mode::Closing), Some(Marker::Strong));
    }

    #[test]
    fn doubled_markers_are_not_directive_starts() {
        assert_eq!(open("**strong**", 0), None);
        assert_eq!(open("__x__", 0), None);
        assert_eq!(open(">>quoted", 0), None);
    }

    #[test]
    fn exact_remainder_wins() {
        assert_eq!(classify("a```", 1, Mode::Closing), Some(Marker::PreformattedBlock));
        assert_eq!(classify("x*", 1, Mode::Closing), Some(Marker::Strong));
    }

    #[test]
    fn fence_needs_line_boundary() {
        assert_eq!(open("```\ncode\n```", 0), Some(Marker::PreformattedBlock));
        assert_eq!(open("a\n```\n", 2), Some(Marker::PreformattedBlock));
        assert_eq!(open(">```\n", 1), Some(Marker::PreformattedBlock));
        assert_eq!(open("a ```\nb", 2), None);
        assert_eq!(open("```ignored\n", 0), None);
    }

    #[test]
    fn quote_marker_rules() {
        assert_eq!(open("> quote", 0), Some(Marker::Quote));
        assert_eq!(open("a\n> quote", 2), Some(Marker::Quote));
        assert_eq!(open(" > nested", 1), Some(Marker::Quote));
        assert_eq!(open("a>b", 1), None);
        assert_eq!(open("-> b", 1), None);
        assert_eq!(open("<> b", 1), None);
    }

    #[test]
    fn quote_glued_to_unicode_punctuation_never_opens() {
        for c in ['\u{27E9}', '\u{2309}', '\u{FE30}', '\u{104A}', '\u{0F04}', '\u{1800}'] {
            let text = format!("{c}> x");
            assert_eq!(open(&text, c.len_utf8()), None, "{c:?}");
        }
        let text = "\u{0345}> x";
        assert_eq!(open(text, '\u{0345}'.len_utf8()), Some(Marker::Quote));
    }

    #[test]
    fn non_markers_and_bounds() {
        assert_eq!(open("hello", 0), None);
        assert_eq!(open("ab", 2), None);
        assert_eq!(open("ab", 7), None);
    }

    #[test]
    fn multibyte_text_around_markers() {
        let text = "é*ü*";
        assert_eq!(open(text, 2), Some(Marker::Strong));
        assert_eq!(classify(text, 5, Mode::Closing), Some(Marker::Strong));
    }
}
