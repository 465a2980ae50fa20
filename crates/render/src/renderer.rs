//! The render pipeline: scan, dispatch, serialize, sanitize.

use crate::context::{OffsetMap, RenderContext};
use crate::fragment::{Content, Fragment, Styled, to_html};
use crate::options::Options;
use crate::sanitize::Sanitizer;
use crate::templates::{BodyRule, template};
use msgstyle_core::{
    Match, ScanDiagnostics, Scanner, Segment, contains_directives, diagnose, escape_directive_text,
    normalize,
};
use std::fmt;

/// Renders the inner text of span and quote directives.
///
/// The engine calls this for every directive body it recurses into, with a
/// context positioned at the body's absolute offset. Implementations that
/// overlay emoji, links, or mentions use [`RenderContext::absolute`] to
/// intersect their ranges with `text`, and call [`render_fragments`] for the
/// parts they do not handle themselves.
///
/// The plain text of the returned fragments must equal `text`.
pub trait BodyRenderer<M: ?Sized = ()> {
    /// Renders `text` into fragments.
    fn render_body(&self, text: &str, ctx: RenderContext<'_, M>) -> Vec<Fragment>;
}

/// Body renderer with no overlays: styling directives only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Styling;

impl<M: ?Sized> BodyRenderer<M> for Styling {
    fn render_body(&self, text: &str, ctx: RenderContext<'_, M>) -> Vec<Fragment> {
        render_fragments(text, ctx, self)
    }
}

/// Renders `text` into a fragment tree, recursing through `body`.
pub fn render_fragments<M, R>(text: &str, ctx: RenderContext<'_, M>, body: &R) -> Vec<Fragment>
where
    M: ?Sized,
    R: BodyRenderer<M> + ?Sized,
{
    if text.is_empty() {
        return Vec::new();
    }
    if !contains_directives(text) {
        return vec![Fragment::text(text)];
    }

    Scanner::new(text)
        .map(|segment| match segment {
            Segment::Literal { text, .. } => Fragment::text(text),
            Segment::Directive(found) => Fragment::Styled(dispatch(text, found, ctx, body)),
        })
        .collect()
}

fn dispatch<M, R>(text: &str, found: Match, ctx: RenderContext<'_, M>, body: &R) -> Styled
where
    M: ?Sized,
    R: BodyRenderer<M> + ?Sized,
{
    let inner = found.content_range(text);
    let range = ctx.absolute(found.start)..ctx.absolute(found.end());
    let opener = text[found.start..inner.start].to_owned();
    let closer = text[inner.end..found.end()].to_owned();
    let inner_text = &text[inner.clone()];

    let (content, removals) = match template(found.marker.style()).body {
        BodyRule::Verbatim => (Content::Verbatim(inner_text.to_owned()), Vec::new()),
        BodyRule::Recurse => {
            let children = body.render_body(inner_text, ctx.descend(inner.start));
            (Content::Fragments(children), Vec::new())
        }
        BodyRule::Quote => {
            let normalized = normalize(inner_text);
            let map = OffsetMap::new(ctx.descend(inner.start), normalized.removals());
            let children = body.render_body(normalized.text(), map.context());
            (Content::Fragments(children), normalized.removals().to_vec())
        }
    };

    Styled {
        style: found.marker.style(),
        range,
        opener,
        closer,
        content,
        removals,
    }
}

/// Markup that passed through the rendering pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SafeMarkup(String);

impl SafeMarkup {
    /// Borrows the markup.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the markup string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SafeMarkup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SafeMarkup {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<SafeMarkup> for String {
    fn from(markup: SafeMarkup) -> Self {
        markup.0
    }
}

/// Markup plus what was noticed while producing it.
#[derive(Debug, Clone)]
pub struct Rendered {
    /// The sanitized markup.
    pub markup: SafeMarkup,
    /// Unclosed directives and sanitizer removals.
    pub diagnostics: ScanDiagnostics,
}

/// Renders message bodies with a fixed set of options.
#[derive(Debug, Clone)]
pub struct MessageRenderer<R = Styling> {
    options: Options,
    sanitizer: Sanitizer,
    body: R,
}

impl Default for MessageRenderer {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl MessageRenderer {
    /// Creates a renderer with the built-in body renderer.
    pub fn new(options: Options) -> Self {
        Self::with_body(options, Styling)
    }
}

impl<R> MessageRenderer<R> {
    /// Creates a renderer that recurses through a custom body renderer.
    pub fn with_body(options: Options, body: R) -> Self {
        Self {
            options,
            sanitizer: Sanitizer::new(),
            body,
        }
    }

    /// Replaces the sanitizer.
    pub fn with_sanitizer(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// The options in effect.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Renders `text` into a fragment tree without serializing it.
    pub fn fragments<M>(&self, text: &str, ctx: RenderContext<'_, M>) -> Vec<Fragment>
    where
        M: ?Sized,
        R: BodyRenderer<M>,
    {
        if self.options.enable_styling {
            self.body.render_body(text, ctx)
        } else if text.is_empty() {
            Vec::new()
        } else {
            vec![Fragment::text(text)]
        }
    }

    /// Renders `text` to safe markup.
    pub fn render<M>(&self, text: &str, ctx: RenderContext<'_, M>) -> SafeMarkup
    where
        M: ?Sized,
        R: BodyRenderer<M>,
    {
        if !self.options.enable_styling || !contains_directives(text) {
            return SafeMarkup(escape_directive_text(text).into_owned());
        }
        let html = to_html(&self.fragments(text, ctx));
        if self.options.sanitize {
            SafeMarkup(self.sanitizer.sanitize(&html))
        } else {
            SafeMarkup(html)
        }
    }

    /// Renders `text`, also reporting unclosed directives and sanitizer
    /// removals.
    pub fn render_with_diagnostics<M>(&self, text: &str, ctx: RenderContext<'_, M>) -> Rendered
    where
        M: ?Sized,
        R: BodyRenderer<M>,
    {
        if !self.options.enable_styling {
            return Rendered {
                markup: SafeMarkup(escape_directive_text(text).into_owned()),
                diagnostics: ScanDiagnostics::new(),
            };
        }

        let mut diagnostics = diagnose(text);
        let html = to_html(&self.fragments(text, ctx));
        if !self.options.sanitize {
            return Rendered {
                markup: SafeMarkup(html),
                diagnostics,
            };
        }

        let markup = match self.sanitizer.try_sanitize(&html) {
            Ok((output, report)) => {
                if !report.is_clean() {
                    diagnostics.add_sanitized(format!(
                        "removed {} elements and {} attributes",
                        report.removed_elements, report.removed_attributes
                    ));
                }
                output
            }
            Err(err) => {
                log::warn!("{err}; escaping markup as text");
                diagnostics.add_sanitized(err.to_string());
                html_escape::encode_text(&html).into_owned()
            }
        };
        Rendered {
            markup: SafeMarkup(markup),
            diagnostics,
        }
    }
}

/// Renders `text` with default options and the built-in body renderer.
pub fn render<M: ?Sized>(text: &str, ctx: RenderContext<'_, M>) -> SafeMarkup {
    MessageRenderer::default().render(text, ctx)
}
