//! Allow-list sanitizer for assembled message markup.

use lol_html::{RewriteStrSettings, doc_comments, element, rewrite_str};
use msgstyle_core::StylingError;
use std::cell::Cell;

/// An element permitted in sanitized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowedTag {
    /// Lowercase tag name.
    pub name: &'static str,
    /// Lowercase attribute names kept on the element.
    pub attributes: &'static [&'static str],
}

impl AllowedTag {
    fn permits(&self, attribute: &str) -> bool {
        self.attributes.contains(&attribute)
    }
}

/// Elements the styling templates produce.
pub const DEFAULT_ALLOW_LIST: &[AllowedTag] = &[
    AllowedTag {
        name: "b",
        attributes: &[],
    },
    AllowedTag {
        name: "i",
        attributes: &[],
    },
    AllowedTag {
        name: "em",
        attributes: &[],
    },
    AllowedTag {
        name: "del",
        attributes: &[],
    },
    AllowedTag {
        name: "blockquote",
        attributes: &[],
    },
    AllowedTag {
        name: "code",
        attributes: &["class"],
    },
    AllowedTag {
        name: "span",
        attributes: &["class"],
    },
    AllowedTag {
        name: "div",
        attributes: &["class"],
    },
];

/// Disallowed elements whose content is dropped along with them.
///
/// Raw-text elements are tokenized without markup, so unwrapping them would
/// turn their text into live tags. Foreign content (`svg`, `math`) parses
/// differently from HTML and is dropped whole.
const DROP_WITH_CONTENT: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "template", "noscript", "textarea", "title",
    "xmp", "noembed", "noframes", "plaintext", "svg", "math",
];

/// What a sanitizer pass removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    /// Elements removed or unwrapped.
    pub removed_elements: usize,
    /// Attributes stripped from allowed elements.
    pub removed_attributes: usize,
}

impl SanitizeReport {
    /// Whether the pass left the markup untouched.
    pub fn is_clean(&self) -> bool {
        self.removed_elements == 0 && self.removed_attributes == 0
    }
}

/// Filters markup down to an allow-list of elements and attributes.
///
/// Disallowed elements are unwrapped (their text is kept), except script-like
/// elements which are dropped with their content. Comments are removed.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    allowed: Vec<AllowedTag>,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer {
    /// Sanitizer with [`DEFAULT_ALLOW_LIST`].
    pub fn new() -> Self {
        Self {
            allowed: DEFAULT_ALLOW_LIST.to_vec(),
        }
    }

    /// Also permits `name` with the given attributes.
    pub fn allow(mut self, name: &'static str, attributes: &'static [&'static str]) -> Self {
        self.allowed.retain(|tag| tag.name != name);
        self.allowed.push(AllowedTag { name, attributes });
        self
    }

    /// Looks up an allowed tag by lowercase name.
    pub fn lookup(&self, name: &str) -> Option<&AllowedTag> {
        self.allowed.iter().find(|tag| tag.name == name)
    }

    /// Sanitizes `html`. Never fails: if the rewriter errors, the whole input
    /// is escaped as text instead.
    pub fn sanitize(&self, html: &str) -> String {
        match self.try_sanitize(html) {
            Ok((output, report)) => {
                if !report.is_clean() {
                    log::debug!(
                        "sanitizer removed {} elements and {} attributes",
                        report.removed_elements,
                        report.removed_attributes
                    );
                }
                output
            }
            Err(err) => {
                log::warn!("{err}; escaping markup as text");
                html_escape::encode_text(html).into_owned()
            }
        }
    }

    /// Sanitizes `html`, reporting what was removed.
    pub fn try_sanitize(&self, html: &str) -> Result<(String, SanitizeReport), StylingError> {
        if !html.contains('<') {
            return Ok((html.to_owned(), SanitizeReport::default()));
        }

        let removed_elements = Cell::new(0usize);
        let removed_attributes = Cell::new(0usize);

        let output = rewrite_str(
            html,
            RewriteStrSettings {
                element_content_handlers: vec![element!("*", |el| {
                    let tag = el.tag_name().to_ascii_lowercase();
                    let Some(allowed) = self.lookup(&tag) else {
                        removed_elements.set(removed_elements.get() + 1);
                        if DROP_WITH_CONTENT.contains(&tag.as_str()) {
                            el.remove();
                        } else {
                            el.remove_and_keep_content();
                        }
                        return Ok(());
                    };

                    let rejected: Vec<String> = el
                        .attributes()
                        .iter()
                        .map(|attr| attr.name())
                        .filter(|name| !allowed.permits(&name.to_ascii_lowercase()))
                        .collect();
                    for name in &rejected {
                        el.remove_attribute(name);
                    }
                    removed_attributes.set(removed_attributes.get() + rejected.len());
                    Ok(())
                })],
                document_content_handlers: vec![doc_comments!(|comment| {
                    comment.remove();
                    removed_elements.set(removed_elements.get() + 1);
                    Ok(())
                })],
                ..RewriteStrSettings::new()
            },
        )
        .map_err(|e| StylingError::sanitize(e.to_string()))?;

        Ok((
            output,
            SanitizeReport {
                removed_elements: removed_elements.get(),
                removed_attributes: removed_attributes.get(),
            },
        ))
    }
}
