#![deny(missing_docs)]
//! msgstyle render: turns message bodies into sanitized styling markup.
//!
//! ```
//! use msgstyle_render::{RenderContext, render};
//!
//! let html = render("_emphasis_", RenderContext::root(&()));
//! assert_eq!(
//!     html.as_str(),
//!     r#"<span class="styling-directive">_</span><i>emphasis</i><span class="styling-directive">_</span>"#
//! );
//! ```

/// Parallel batch rendering.
#[cfg(feature = "parallel")]
pub mod batch;
/// Render context and offset mapping.
pub mod context;
/// The fragment tree.
pub mod fragment;
/// Rendering options.
pub mod options;
/// The render pipeline.
pub mod renderer;
/// Allow-list sanitizer.
pub mod sanitize;
/// Per-style templates.
pub mod templates;

#[cfg(feature = "parallel")]
pub use batch::{BatchInput, BatchOptions, BatchOutput, BatchStats, render_batch};
pub use context::{OffsetMap, RenderContext};
pub use fragment::{Content, Fragment, Styled, plain_text, to_html};
pub use options::Options;
pub use renderer::{
    BodyRenderer, MessageRenderer, Rendered, SafeMarkup, Styling, render, render_fragments,
};
pub use sanitize::{AllowedTag, DEFAULT_ALLOW_LIST, SanitizeReport, Sanitizer};
pub use templates::{MARKER_CLASS, Template, template};

pub use msgstyle_core::{ScanDiagnostics, ScanWarning, StylingError, contains_directives};
