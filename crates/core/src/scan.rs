//! Extent calculation and the left-to-right scan driver.

use std::ops::Range;

use crate::classify::{Mode, classify};
use crate::code_fence::opener_padding;
use crate::error::{ScanDiagnostics, ScanWarning, SourceLocation};
use crate::marker::{DirectiveKind, Marker};
use crate::quote;

/// A directive run found in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Opening marker.
    pub marker: Marker,
    /// Byte offset of the opening marker.
    pub start: usize,
    /// Total byte length, delimiters included.
    pub len: usize,
}

impl Match {
    /// Byte offset just past the run.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// The run's full byte range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Byte range of the directive's content within `text`.
    ///
    /// Quotes have no closing marker. Fenced blocks also drop the padding
    /// after the opening fence, so their content starts on the next line.
    pub fn content_range(&self, text: &str) -> Range<usize> {
        let open_end = self.start + self.marker.len();
        match self.marker {
            Marker::Quote => open_end..self.end(),
            Marker::PreformattedBlock => {
                let close_start = self.end() - self.marker.len();
                let begin = open_end + opener_padding(&text[open_end..close_start]);
                begin..close_start
            }
            _ => open_end..self.end() - self.marker.len(),
        }
    }
}

/// Computes the total length of the directive opened by `marker` at `start`.
///
/// Returns `None` when the directive never closes: a span that hits a line
/// break or the end of the text, or a fence that reaches the end of the text.
/// The first valid closing position wins.
pub fn extent(text: &str, marker: Marker, start: usize) -> Option<usize> {
    let body_start = start + marker.len();
    if body_start > text.len() {
        return None;
    }

    if marker == Marker::Quote {
        return Some(marker.len() + quote_run_len(&text[body_start..]));
    }

    let bytes = text.as_bytes();
    let span = marker.kind() == DirectiveKind::Span;
    let mut i = body_start;
    while i < text.len() {
        if classify(text, i, Mode::Closing) == Some(marker) {
            return Some(i + marker.len() - start);
        }
        if span && bytes[i] == b'\n' {
            return None;
        }
        i += char_len_at(text, i);
    }
    None
}

/// A quote keeps absorbing lines while each line break is followed by `>`.
///
/// A trailing line break at the very end of the text is absorbed.
fn quote_run_len(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    let mut from = 0;
    while let Some(nl) = rest[from..].find('\n') {
        let nl = from + nl;
        match bytes.get(nl + 1) {
            Some(b'>') | None => from = nl + 1,
            Some(_) => return nl,
        }
    }
    rest.len()
}

fn char_len_at(text: &str, i: usize) -> usize {
    text[i..].chars().next().map_or(1, char::len_utf8)
}

/// Classifies and measures the directive starting at `i`, if any.
pub fn directive_at(text: &str, i: usize) -> Option<Match> {
    let marker = classify(text, i, Mode::Opening)?;
    let len = extent(text, marker, i)?;
    Some(Match {
        marker,
        start: i,
        len,
    })
}

/// One run produced by [`Scanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Plain text with no directive in it.
    Literal {
        /// Byte offset of the run.
        start: usize,
        /// The run's text.
        text: &'a str,
    },
    /// A complete directive run.
    Directive(Match),
}

/// Carves a text into alternating literal and directive runs.
///
/// Positions that do not start a directive advance the scan by one
/// character, so the scan always terminates.
#[derive(Debug)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    pending: Option<Match>,
    unclosed: Vec<(Marker, usize)>,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner over `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            pending: None,
            unclosed: Vec::new(),
        }
    }

    /// Openers seen so far whose directive never closed, with their offsets.
    pub fn unclosed(&self) -> &[(Marker, usize)] {
        &self.unclosed
    }

    fn probe(&mut self, i: usize) -> Option<Match> {
        let marker = classify(self.text, i, Mode::Opening)?;
        match extent(self.text, marker, i) {
            Some(len) => Some(Match {
                marker,
                start: i,
                len,
            }),
            None => {
                log::debug!("unclosed {} at byte {}, keeping it literal", marker, i);
                self.unclosed.push((marker, i));
                None
            }
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(found) = self.pending.take() {
            self.pos = found.end();
            return Some(Segment::Directive(found));
        }

        let start = self.pos;
        let mut i = start;
        while i < self.text.len() {
            if let Some(found) = self.probe(i) {
                log::trace!(
                    "{} directive at {}..{}",
                    found.marker.style(),
                    found.start,
                    found.end()
                );
                if i == start {
                    self.pos = found.end();
                    return Some(Segment::Directive(found));
                }
                self.pending = Some(found);
                self.pos = i;
                return Some(Segment::Literal {
                    start,
                    text: &self.text[start..i],
                });
            }
            i += char_len_at(self.text, i);
        }

        self.pos = self.text.len();
        (start < self.text.len()).then(|| Segment::Literal {
            start,
            text: &self.text[start..],
        })
    }
}

/// Reports every directive opener in `text` that failed to close.
///
/// Quote bodies are checked after normalization; locations always refer
/// to `text`.
pub fn diagnose(text: &str) -> ScanDiagnostics {
    let mut diagnostics = ScanDiagnostics::new();
    diagnose_into(text, text, &|pos| pos, &mut diagnostics);
    diagnostics
}

fn diagnose_into(
    full: &str,
    text: &str,
    to_full: &dyn Fn(usize) -> usize,
    diagnostics: &mut ScanDiagnostics,
) {
    let mut scanner = Scanner::new(text);
    let mut quotes = Vec::new();
    for segment in scanner.by_ref() {
        if let Segment::Directive(found) = segment
            && found.marker == Marker::Quote
        {
            quotes.push(found);
        }
    }

    for &(marker, at) in scanner.unclosed() {
        let absolute = to_full(at);
        diagnostics.add_warning(ScanWarning::UnclosedDirective {
            location: SourceLocation::from_offset(full, absolute),
            marker,
            context: context_at(full, absolute),
        });
    }

    for found in quotes {
        let body = found.content_range(text);
        let normalized = quote::normalize(&text[body.clone()]);
        let map = |pos: usize| to_full(body.start + normalized.original_offset(pos));
        diagnose_into(full, normalized.text(), &map, diagnostics);
    }
}

/// The rest of the line starting at `at`, truncated to a short preview.
fn context_at(text: &str, at: usize) -> String {
    let line = text[at..].split('\n').next().unwrap_or("");
    line.chars().take(24).collect()
}
