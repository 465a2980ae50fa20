//! The fixed marker set and its descriptor table.

use std::fmt;

/// Whether a directive must close on the line it opened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// Opens and closes within one line.
    Span,
    /// May cover several lines (fenced code, quotes).
    Block,
}

/// Semantic name of a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// `*strong*`
    Strong,
    /// `_emphasis_`
    Emphasis,
    /// `~strike~`
    Strike,
    /// `` `preformatted` ``
    Preformatted,
    /// Fenced code block.
    PreformattedBlock,
    /// `> quote`
    Quote,
}

impl Style {
    /// Name used by the template table.
    pub const fn as_str(self) -> &'static str {
        match self {
            Style::Strong => "strong",
            Style::Emphasis => "emphasis",
            Style::Strike => "strike",
            Style::Preformatted => "preformatted",
            Style::PreformattedBlock => "preformatted_block",
            Style::Quote => "quote",
        }
    }

    /// The marker that produces this style.
    pub fn marker(self) -> Marker {
        DESCRIPTORS
            .iter()
            .find(|d| d.style == self)
            .map_or(Marker::Quote, |d| d.marker)
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A styling directive delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// `*`
    Strong,
    /// `_`
    Emphasis,
    /// `~`
    Strike,
    /// `` ` ``
    Preformatted,
    /// ```` ``` ````
    PreformattedBlock,
    /// `>`
    Quote,
}

/// Static description of one marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    /// The marker described.
    pub marker: Marker,
    /// Semantic name used for template dispatch.
    pub style: Style,
    /// Span or block.
    pub kind: DirectiveKind,
}

/// Descriptor table, in [`Marker::ALL`] order.
pub const DESCRIPTORS: [Descriptor; 6] = [
    Descriptor {
        marker: Marker::Strong,
        style: Style::Strong,
        kind: DirectiveKind::Span,
    },
    Descriptor {
        marker: Marker::Emphasis,
        style: Style::Emphasis,
        kind: DirectiveKind::Span,
    },
    Descriptor {
        marker: Marker::Strike,
        style: Style::Strike,
        kind: DirectiveKind::Span,
    },
    Descriptor {
        marker: Marker::Preformatted,
        style: Style::Preformatted,
        kind: DirectiveKind::Span,
    },
    Descriptor {
        marker: Marker::PreformattedBlock,
        style: Style::PreformattedBlock,
        kind: DirectiveKind::Block,
    },
    Descriptor {
        marker: Marker::Quote,
        style: Style::Quote,
        kind: DirectiveKind::Block,
    },
];

impl Marker {
    /// Every marker, in canonical order.
    pub const ALL: [Marker; 6] = [
        Marker::Strong,
        Marker::Emphasis,
        Marker::Strike,
        Marker::Preformatted,
        Marker::PreformattedBlock,
        Marker::Quote,
    ];

    /// The literal delimiter text.
    pub const fn as_str(self) -> &'static str {
        match self {
            Marker::Strong => "*",
            Marker::Emphasis => "_",
            Marker::Strike => "~",
            Marker::Preformatted => "`",
            Marker::PreformattedBlock => "```",
            Marker::Quote => ">",
        }
    }

    /// Byte length of the delimiter.
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(self) -> usize {
        self.as_str().len()
    }

    /// Looks up the marker spelled exactly as `literal`.
    pub fn from_literal(literal: &str) -> Option<Marker> {
        Marker::ALL.into_iter().find(|m| m.as_str() == literal)
    }

    /// Looks up a single-byte marker.
    pub fn from_byte(byte: u8) -> Option<Marker> {
        match byte {
            b'*' => Some(Marker::Strong),
            b'_' => Some(Marker::Emphasis),
            b'~' => Some(Marker::Strike),
            b'`' => Some(Marker::Preformatted),
            b'>' => Some(Marker::Quote),
            _ => None,
        }
    }

    /// Descriptor for this marker.
    pub fn descriptor(self) -> &'static Descriptor {
        let index = match self {
            Marker::Strong => 0,
            Marker::Emphasis => 1,
            Marker::Strike => 2,
            Marker::Preformatted => 3,
            Marker::PreformattedBlock => 4,
            Marker::Quote => 5,
        };
        &DESCRIPTORS[index]
    }

    /// Shorthand for `descriptor().kind`.
    pub fn kind(self) -> DirectiveKind {
        self.descriptor().kind
    }

    /// Shorthand for `descriptor().style`.
    pub fn style(self) -> Style {
        self.descriptor().style
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_table_matches_marker_order() {
        for (marker, descriptor) in Marker::ALL.iter().zip(DESCRIPTORS.iter()) {
            assert_eq!(*marker, descriptor.marker);
            assert_eq!(marker.descriptor(), descriptor);
        }
    }

    #[test]
    fn only_fence_and_quote_are_blocks() {
        let blocks: Vec<_> = Marker::ALL
            .into_iter()
            .filter(|m| m.kind() == DirectiveKind::Block)
            .collect();
        assert_eq!(blocks, vec![Marker::PreformattedBlock, Marker::Quote]);
    }

    #[test]
    fn looks_up_literals() {
        assert_eq!(Marker::from_literal("```"), Some(Marker::PreformattedBlock));
        assert_eq!(Marker::from_literal("*"), Some(Marker::Strong));
        assert_eq!(Marker::from_literal("**"), None);
        assert_eq!(Marker::from_literal("``"), None);
        assert_eq!(Marker::from_byte(b'#'), None);
    }

    #[test]
    fn styles_map_back_to_markers() {
        for marker in Marker::ALL {
            assert_eq!(marker.style().marker(), marker);
        }
    }

    #[test]
    fn semantic_names() {
        let names: Vec<_> = Marker::ALL.iter().map(|m| m.style().as_str()).collect();
        assert_eq!(
            names,
            [
                "strong",
                "emphasis",
                "strike",
                "preformatted",
                "preformatted_block",
                "quote"
            ]
        );
    }
}
