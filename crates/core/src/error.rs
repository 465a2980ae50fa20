use thiserror::Error;

use crate::marker::Marker;

/// Source location of a position inside a message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, in characters)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Locate a byte offset within `text`.
    ///
    /// Offsets past the end of `text` are clamped to the end.
    pub fn from_offset(text: &str, offset: usize) -> Self {
        let mut offset = offset.min(text.len());
        while !text.is_char_boundary(offset) {
            offset -= 1;
        }
        let before = &text[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        Self::new(line, column)
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Errors surfaced by the styling pipeline.
///
/// Directive detection never fails; these only cover the configuration
/// and sanitizer layers.
#[derive(Debug, Error)]
pub enum StylingError {
    /// Options could not be decoded.
    #[error("Invalid styling options: {0}")]
    InvalidConfig(String),
    /// The HTML rewriter rejected the assembled markup.
    #[error("Sanitizer error: {0}")]
    Sanitize(String),
}

impl StylingError {
    /// Create a configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Create a sanitizer error
    pub fn sanitize(message: impl Into<String>) -> Self {
        Self::Sanitize(message.into())
    }
}

/// Non-fatal observations made while styling a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanWarning {
    /// A directive opened but never closed, so it rendered as literal text
    UnclosedDirective {
        /// Where the opener sits in the message body
        location: SourceLocation,
        /// The marker that failed to close
        marker: Marker,
        /// Surrounding context for the message
        context: String,
    },
    /// The sanitizer had to strip markup from the assembled output
    SanitizedMarkup {
        /// Location the warning refers to (start of the message)
        location: SourceLocation,
        /// Warning message
        message: String,
    },
}

impl ScanWarning {
    /// Get the location of this warning
    pub fn location(&self) -> &SourceLocation {
        match self {
            ScanWarning::UnclosedDirective { location, .. } => location,
            ScanWarning::SanitizedMarkup { location, .. } => location,
        }
    }
}

impl std::fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanWarning::UnclosedDirective {
                location,
                marker,
                context,
            } => {
                write!(
                    f,
                    "Unclosed directive ({}): {}, near '{}'",
                    marker, location, context
                )
            }
            ScanWarning::SanitizedMarkup { location, message } => {
                write!(f, "{}: {}", location, message)
            }
        }
    }
}

/// Collection of scan diagnostics
#[derive(Debug, Clone, Default)]
pub struct ScanDiagnostics {
    /// List of non-fatal warnings
    pub warnings: Vec<ScanWarning>,
}

impl ScanDiagnostics {
    /// Create a new empty diagnostics collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning to the diagnostics collection
    pub fn add_warning(&mut self, warning: ScanWarning) {
        self.warnings.push(warning);
    }

    /// Add a sanitizer warning anchored at the start of the message
    pub fn add_sanitized(&mut self, message: impl Into<String>) {
        self.warnings.push(ScanWarning::SanitizedMarkup {
            location: SourceLocation::new(1, 1),
            message: message.into(),
        });
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Get total count of all diagnostics
    pub fn count(&self) -> usize {
        self.warnings.len()
    }
}
