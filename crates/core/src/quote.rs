//! Quote continuation handling.
//!
//! A quote run covers several lines that each start with `>`. Before the body
//! is rendered again, one leading marker is removed from every continuation
//! line so nested quotes line up with the top-level grammar.

use std::borrow::Cow;

/// How a stripped continuation marker was spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteSpelling {
    /// `>`
    Raw,
    /// `&gt;`
    Escaped,
}

impl QuoteSpelling {
    /// The literal text of this spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            QuoteSpelling::Raw => ">",
            QuoteSpelling::Escaped => "&gt;",
        }
    }

    /// Byte length of the spelling.
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(self) -> usize {
        self.as_str().len()
    }
}

/// One removed continuation marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removal {
    /// Position in the normalized text where the marker used to sit.
    pub at: usize,
    /// Which spelling was removed.
    pub spelling: QuoteSpelling,
}

/// A quote body with its continuation markers stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized<'a> {
    text: Cow<'a, str>,
    removals: Vec<Removal>,
}

impl<'a> Normalized<'a> {
    /// The normalized body.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Removed markers, ordered by position.
    pub fn removals(&self) -> &[Removal] {
        &self.removals
    }

    /// Consumes self, returning the normalized text and removals.
    pub fn into_parts(self) -> (Cow<'a, str>, Vec<Removal>) {
        (self.text, self.removals)
    }

    /// Maps a position in the normalized text back to the original body.
    pub fn original_offset(&self, pos: usize) -> usize {
        original_offset(&self.removals, pos)
    }
}

/// Strips one quote marker after every line break in `body`.
pub fn normalize(body: &str) -> Normalized<'_> {
    if !body.contains("\n>") && !body.contains("\n&gt;") {
        return Normalized {
            text: Cow::Borrowed(body),
            removals: Vec::new(),
        };
    }

    let mut text = String::with_capacity(body.len());
    let mut removals = Vec::new();
    let mut rest = body;
    while let Some(nl) = rest.find('\n') {
        text.push_str(&rest[..=nl]);
        rest = &rest[nl + 1..];
        let spelling = if rest.starts_with(QuoteSpelling::Raw.as_str()) {
            Some(QuoteSpelling::Raw)
        } else if rest.starts_with(QuoteSpelling::Escaped.as_str()) {
            Some(QuoteSpelling::Escaped)
        } else {
            None
        };
        if let Some(spelling) = spelling {
            removals.push(Removal {
                at: text.len(),
                spelling,
            });
            rest = &rest[spelling.len()..];
        }
    }
    text.push_str(rest);

    Normalized {
        text: Cow::Owned(text),
        removals,
    }
}

/// Maps `pos` in normalized coordinates to the un-normalized body.
pub fn original_offset(removals: &[Removal], pos: usize) -> usize {
    pos + removals
        .iter()
        .take_while(|r| r.at <= pos)
        .map(|r| r.spelling.len())
        .sum::<usize>()
}

/// Re-inserts removed markers into text laid out like the normalized body.
pub fn restore(normalized: &str, removals: &[Removal]) -> String {
    let extra: usize = removals.iter().map(|r| r.spelling.len()).sum();
    let mut out = String::with_capacity(normalized.len() + extra);
    let mut last = 0;
    for removal in removals {
        let at = removal.at.min(normalized.len());
        out.push_str(&normalized[last..at]);
        out.push_str(removal.spelling.as_str());
        last = at;
    }
    out.push_str(&normalized[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_one_marker_per_continuation_line() {
        let normalized = normalize(" This is quoted\n>This too\n> > nested");
        assert_eq!(normalized.text(), " This is quoted\nThis too\n > nested");
        assert_eq!(normalized.removals().len(), 2);
    }

    #[test]
    fn first_line_is_untouched() {
        let normalized = normalize("> already nested");
        assert_eq!(normalized.text(), "> already nested");
        assert!(normalized.removals().is_empty());
    }

    #[test]
    fn escaped_spelling_is_equivalent() {
        let normalized = normalize("one\n&gt;two\n>three");
        assert_eq!(normalized.text(), "one\ntwo\nthree");
        assert_eq!(
            normalized.removals(),
            &[
                Removal {
                    at: 4,
                    spelling: QuoteSpelling::Escaped
                },
                Removal {
                    at: 8,
                    spelling: QuoteSpelling::Raw
                },
            ]
        );
    }

    #[test]
    fn maps_positions_back_to_the_body() {
        let body = "ab\n>cd\n&gt;ef";
        let normalized = normalize(body);
        assert_eq!(normalized.text(), "ab\ncd\nef");
        // 'c'
        assert_eq!(normalized.original_offset(3), 4);
        // 'e'
        assert_eq!(normalized.original_offset(6), 11);
        assert_eq!(&body[normalized.original_offset(6)..], "ef");
        // before any removal
        assert_eq!(normalized.original_offset(1), 1);
    }

    #[test]
    fn restore_inverts_normalize() {
        for body in [
            " a\n>b\n>c",
            "x\n&gt;y",
            "trailing\n",
            "\n>\n>",
            "plain",
        ] {
            let normalized = normalize(body);
            assert_eq!(restore(normalized.text(), normalized.removals()), body);
        }
    }

    #[test]
    fn borrows_when_single_line() {
        assert!(matches!(normalize(" one line").into_parts().0, Cow::Borrowed(_)));
    }
}
