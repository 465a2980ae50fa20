//! Template dispatch: how each directive style is turned into markup.

use crate::fragment::Styled;
use msgstyle_core::Style;

/// Class carried by the decorative marker elements.
pub const MARKER_CLASS: &str = "styling-directive";

/// How a directive's content is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyRule {
    /// Rendered again through the body renderer.
    Recurse,
    /// Continuation markers stripped, then rendered again.
    Quote,
    /// Emitted verbatim; never scanned for directives.
    Verbatim,
}

/// Rendering rule for one directive style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    /// Style this template renders.
    pub style: Style,
    /// Element wrapping the content.
    pub element: &'static str,
    /// Class on the wrapping element.
    pub class: Option<&'static str>,
    /// Content rule.
    pub body: BodyRule,
    /// Element used for the visible marker glyphs, if they are shown.
    pub marker_tag: Option<&'static str>,
}

/// Template table, keyed by style.
pub const TEMPLATES: [Template; 6] = [
    Template {
        style: Style::Strong,
        element: "b",
        class: None,
        body: BodyRule::Recurse,
        marker_tag: Some("span"),
    },
    Template {
        style: Style::Emphasis,
        element: "i",
        class: None,
        body: BodyRule::Recurse,
        marker_tag: Some("span"),
    },
    Template {
        style: Style::Strike,
        element: "del",
        class: None,
        body: BodyRule::Recurse,
        marker_tag: Some("span"),
    },
    Template {
        style: Style::Preformatted,
        element: "code",
        class: None,
        body: BodyRule::Verbatim,
        marker_tag: Some("span"),
    },
    Template {
        style: Style::PreformattedBlock,
        element: "code",
        class: Some("block"),
        body: BodyRule::Verbatim,
        marker_tag: Some("div"),
    },
    Template {
        style: Style::Quote,
        element: "blockquote",
        class: None,
        body: BodyRule::Quote,
        marker_tag: None,
    },
];

/// Looks up the template for `style`.
pub fn template(style: Style) -> &'static Template {
    let index = match style {
        Style::Strong => 0,
        Style::Emphasis => 1,
        Style::Strike => 2,
        Style::Preformatted => 3,
        Style::PreformattedBlock => 4,
        Style::Quote => 5,
    };
    &TEMPLATES[index]
}

impl Template {
    /// Writes `styled` using this template.
    pub fn write(&self, styled: &Styled, out: &mut String) {
        let glyph = self.style.marker().as_str();
        if let Some(tag) = self.marker_tag {
            write_marker(out, tag, glyph);
        }

        out.push('<');
        out.push_str(self.element);
        if let Some(class) = self.class {
            out.push_str(" class=\"");
            out.push_str(class);
            out.push('"');
        }
        out.push('>');
        styled.content.write_html(out);
        out.push_str("</");
        out.push_str(self.element);
        out.push('>');

        if let Some(tag) = self.marker_tag {
            write_marker(out, tag, glyph);
        }
    }
}

fn write_marker(out: &mut String, tag: &str, glyph: &str) {
    out.push('<');
    out.push_str(tag);
    out.push_str(" class=\"");
    out.push_str(MARKER_CLASS);
    out.push_str("\">");
    out.push_str(glyph);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::{Content, Fragment};

    fn styled(style: Style, content: Content) -> Styled {
        let glyph = style.marker().as_str();
        Styled {
            style,
            range: 0..0,
            opener: glyph.into(),
            closer: glyph.into(),
            content,
            removals: Vec::new(),
        }
    }

    fn html(style: Style, content: Content) -> String {
        let mut out = String::new();
        template(style).write(&styled(style, content), &mut out);
        out
    }

    #[test]
    fn lookup_returns_matching_style() {
        for t in &TEMPLATES {
            assert_eq!(template(t.style), t);
        }
    }

    #[test]
    fn span_templates_wrap_marker_glyphs() {
        let text = || Content::Fragments(vec![Fragment::text("x")]);
        insta::assert_snapshot!(
            html(Style::Strong, text()),
            @r#"<span class="styling-directive">*</span><b>x</b><span class="styling-directive">*</span>"#
        );
        insta::assert_snapshot!(
            html(Style::Emphasis, text()),
            @r#"<span class="styling-directive">_</span><i>x</i><span class="styling-directive">_</span>"#
        );
        insta::assert_snapshot!(
            html(Style::Strike, text()),
            @r#"<span class="styling-directive">~</span><del>x</del><span class="styling-directive">~</span>"#
        );
    }

    #[test]
    fn code_templates_are_verbatim() {
        insta::assert_snapshot!(
            html(Style::Preformatted, Content::Verbatim("*a* <b>".into())),
            @r#"<span class="styling-directive">`</span><code>*a* &lt;b&gt;</code><span class="styling-directive">`</span>"#
        );
        insta::assert_snapshot!(
            html(Style::PreformattedBlock, Content::Verbatim("x".into())),
            @r#"<div class="styling-directive">```</div><code class="block">x</code><div class="styling-directive">```</div>"#
        );
    }

    #[test]
    fn quote_has_no_marker_decoration() {
        let content = Content::Fragments(vec![Fragment::text(" q")]);
        assert_eq!(html(Style::Quote, content), "<blockquote> q</blockquote>");
    }
}
