//! The fragment tree produced by a render.

use crate::templates::template;
use msgstyle_core::quote::{Removal, restore};
use msgstyle_core::{Style, escape_directive_text, escape_verbatim};
use std::ops::Range;

/// One piece of rendered message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Literal text, escaped when serialized.
    Text(String),
    /// A styled directive wrapping its own content.
    Styled(Styled),
    /// Markup supplied by a body-render collaborator (mention, emoji, link).
    Overlay {
        /// Markup inserted as-is (the sanitizer still filters it).
        markup: String,
        /// The source characters the overlay stands for.
        text: String,
    },
}

/// A directive node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Styled {
    /// Semantic name of the directive.
    pub style: Style,
    /// Absolute byte range of the whole run in the original body.
    pub range: Range<usize>,
    /// Source text of the opener (fences include their trailing line break).
    pub opener: String,
    /// Source text of the closer (empty for quotes).
    pub closer: String,
    /// Rendered or verbatim content.
    pub content: Content,
    /// Continuation markers stripped from a quote body.
    pub removals: Vec<Removal>,
}

/// Content of a directive node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Recursively rendered content.
    Fragments(Vec<Fragment>),
    /// Code content, never scanned for directives.
    Verbatim(String),
}

impl Fragment {
    /// Creates a literal text fragment.
    pub fn text(text: impl Into<String>) -> Self {
        Fragment::Text(text.into())
    }

    /// Creates a collaborator overlay fragment.
    pub fn overlay(markup: impl Into<String>, text: impl Into<String>) -> Self {
        Fragment::Overlay {
            markup: markup.into(),
            text: text.into(),
        }
    }

    /// The source characters this fragment covers, decoration removed.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.push_plain_text(&mut out);
        out
    }

    fn push_plain_text(&self, out: &mut String) {
        match self {
            Fragment::Text(text) | Fragment::Overlay { text, .. } => out.push_str(text),
            Fragment::Styled(styled) => styled.push_plain_text(out),
        }
    }

    /// Serializes this fragment as markup.
    pub fn write_html(&self, out: &mut String) {
        match self {
            Fragment::Text(text) => out.push_str(&escape_directive_text(text)),
            Fragment::Overlay { markup, .. } => out.push_str(markup),
            Fragment::Styled(styled) => template(styled.style).write(styled, out),
        }
    }

    /// Returns the directive node, if this is one.
    pub fn as_styled(&self) -> Option<&Styled> {
        match self {
            Fragment::Styled(styled) => Some(styled),
            _ => None,
        }
    }
}

impl Styled {
    fn push_plain_text(&self, out: &mut String) {
        out.push_str(&self.opener);
        let inner = self.content.plain_text();
        if self.removals.is_empty() {
            out.push_str(&inner);
        } else {
            out.push_str(&restore(&inner, &self.removals));
        }
        out.push_str(&self.closer);
    }

    /// Child fragments, empty for verbatim content.
    pub fn children(&self) -> &[Fragment] {
        match &self.content {
            Content::Fragments(children) => children,
            Content::Verbatim(_) => &[],
        }
    }
}

impl Content {
    /// Plain text of the content as rendered (before quote restoration).
    pub fn plain_text(&self) -> String {
        match self {
            Content::Fragments(children) => plain_text(children),
            Content::Verbatim(code) => code.clone(),
        }
    }

    /// Serializes the content.
    pub fn write_html(&self, out: &mut String) {
        match self {
            Content::Fragments(children) => {
                for child in children {
                    child.write_html(out);
                }
            }
            Content::Verbatim(code) => out.push_str(&escape_verbatim(code)),
        }
    }
}

/// Concatenated plain text of a fragment sequence.
pub fn plain_text(fragments: &[Fragment]) -> String {
    let mut out = String::new();
    for fragment in fragments {
        fragment.push_plain_text(&mut out);
    }
    out
}

/// Serializes a fragment sequence as markup.
pub fn to_html(fragments: &[Fragment]) -> String {
    let mut out = String::new();
    for fragment in fragments {
        fragment.write_html(&mut out);
    }
    out
}
