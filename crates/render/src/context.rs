//! Render context: the message model plus absolute offsets.

use msgstyle_core::quote::{Removal, original_offset};
use std::fmt;

/// Context handed down through recursive rendering.
///
/// `model` is whatever the caller attached (a message, a chat model, `()`).
/// Positions are byte offsets into the original full message body, so overlay
/// collaborators that index mentions or emoji by absolute range stay aligned
/// even deep inside a directive.
pub struct RenderContext<'a, M: ?Sized = ()> {
    model: &'a M,
    origin: Origin<'a, M>,
}

enum Origin<'a, M: ?Sized> {
    /// The text is a contiguous slice of the original body.
    Direct { offset: usize },
    /// The text is (a slice of) a normalized quote body.
    Mapped {
        map: &'a OffsetMap<'a, M>,
        base: usize,
    },
}

impl<'a, M: ?Sized> RenderContext<'a, M> {
    /// Context for a top-level render.
    pub fn root(model: &'a M) -> Self {
        Self::at(model, 0)
    }

    /// Context for text that starts at `offset` of the original body.
    pub fn at(model: &'a M, offset: usize) -> Self {
        Self {
            model,
            origin: Origin::Direct { offset },
        }
    }

    /// The attached model.
    pub fn model(&self) -> &'a M {
        self.model
    }

    /// Absolute offset of the start of the current text.
    pub fn offset(&self) -> usize {
        self.absolute(0)
    }

    /// Absolute offset of byte `local` of the current text.
    pub fn absolute(&self, local: usize) -> usize {
        match self.origin {
            Origin::Direct { offset } => offset + local,
            Origin::Mapped { map, base } => map.absolute(base + local),
        }
    }

    /// Context for the sub-text starting at byte `local` of the current text.
    pub fn descend(&self, local: usize) -> Self {
        let origin = match self.origin {
            Origin::Direct { offset } => Origin::Direct {
                offset: offset + local,
            },
            Origin::Mapped { map, base } => Origin::Mapped {
                map,
                base: base + local,
            },
        };
        Self {
            model: self.model,
            origin,
        }
    }
}

impl<M: ?Sized> Clone for RenderContext<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ?Sized> Copy for RenderContext<'_, M> {}

impl<M: ?Sized> Clone for Origin<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ?Sized> Copy for Origin<'_, M> {}

impl<M: ?Sized> fmt::Debug for RenderContext<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("offset", &self.offset())
            .finish_non_exhaustive()
    }
}

/// Maps positions in a normalized quote body back to its parent text.
pub struct OffsetMap<'a, M: ?Sized> {
    parent: RenderContext<'a, M>,
    removals: &'a [Removal],
}

impl<'a, M: ?Sized> OffsetMap<'a, M> {
    /// `parent` is the context of the un-normalized body; `removals` are the
    /// continuation markers stripped from it.
    pub fn new(parent: RenderContext<'a, M>, removals: &'a [Removal]) -> Self {
        Self { parent, removals }
    }

    /// Context for rendering the normalized body.
    pub fn context(&'a self) -> RenderContext<'a, M> {
        RenderContext {
            model: self.parent.model,
            origin: Origin::Mapped { map: self, base: 0 },
        }
    }

    fn absolute(&self, pos: usize) -> usize {
        self.parent.absolute(original_offset(self.removals, pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use msgstyle_core::normalize;

    #[test]
    fn direct_offsets_compose() {
        let ctx = RenderContext::at(&(), 10);
        assert_eq!(ctx.offset(), 10);
        let inner = ctx.descend(5).descend(2);
        assert_eq!(inner.offset(), 17);
        assert_eq!(inner.absolute(3), 20);
    }

    #[test]
    fn mapped_offsets_skip_stripped_markers() {
        let body = "> a\n>bc\n>d";
        // Quote body starts after the opening marker.
        let parent = RenderContext::root(&()).descend(1);
        let normalized = normalize(&body[1..]);
        assert_eq!(normalized.text(), " a\nbc\nd");

        let map = OffsetMap::new(parent, normalized.removals());
        let ctx = map.context();
        let b = normalized.text().find('b').unwrap();
        assert_eq!(&body[ctx.absolute(b)..ctx.absolute(b) + 1], "b");
        let d = normalized.text().find('d').unwrap();
        assert_eq!(&body[ctx.descend(d).offset()..], "d");
    }

    #[test]
    fn nested_maps_chain_through_parents() {
        let body = "> > x\n>> y";
        let outer_parent = RenderContext::root(&()).descend(1);
        let outer = normalize(&body[1..]);
        assert_eq!(outer.text(), " > x\n> y");
        let outer_map = OffsetMap::new(outer_parent, outer.removals());
        let outer_ctx = outer_map.context();

        // The nested quote marker sits at byte 1 of the outer body.
        let inner_parent = outer_ctx.descend(2);
        let inner = normalize(&outer.text()[2..]);
        assert_eq!(inner.text(), " x\n y");
        let inner_map = OffsetMap::new(inner_parent, inner.removals());
        let inner_ctx = inner_map.context();

        let y = inner.text().find('y').unwrap();
        assert_eq!(&body[inner_ctx.absolute(y)..], "y");
        let x = inner.text().find('x').unwrap();
        assert_eq!(inner_ctx.absolute(x), 4);
    }

    #[test]
    fn carries_the_model() {
        let model = String::from("message-1");
        let ctx: RenderContext<'_, str> = RenderContext::root(model.as_str());
        assert_eq!(ctx.descend(3).model(), "message-1");
    }
}
