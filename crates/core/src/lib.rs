#![deny(missing_docs)]
//! msgstyle core: directive classification, extents, and the scan driver.

/// Marker classification.
pub mod classify;
/// Fenced code opener detection.
pub mod code_fence;
/// Core error and diagnostic types.
pub mod error;
/// Escaping helpers and the directive pre-check.
pub mod escape;
/// The marker set and descriptor table.
pub mod marker;
/// Quote continuation normalization.
pub mod quote;
/// Extent calculation and scanning.
pub mod scan;

pub use classify::{Mode, classify};
pub use error::{ScanDiagnostics, ScanWarning, SourceLocation, StylingError};
pub use escape::{
    contains_directives, escape_directive_text, escape_verbatim, glues_gt, is_word_or_punct,
};
pub use marker::{DESCRIPTORS, Descriptor, DirectiveKind, Marker, Style};
pub use quote::{Normalized, QuoteSpelling, Removal, normalize};
pub use scan::{Match, Scanner, Segment, diagnose, directive_at, extent};
