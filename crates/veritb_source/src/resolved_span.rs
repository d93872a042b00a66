//! Spans converted to 1-indexed line/column positions for display.

use std::fmt;
use std::path::PathBuf;

/// A [`Span`](crate::Span) resolved against its source text.
///
/// Lines and columns are 1-indexed. Produced by
/// [`SourceDb::resolve_span`](crate::SourceDb::resolve_span).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpan {
    /// Display path of the file the span originates from.
    pub file_path: PathBuf,
    /// First line of the span.
    pub start_line: u32,
    /// Column of the first byte.
    pub start_col: u32,
    /// Last line of the span.
    pub end_line: u32,
    /// Column of the last byte.
    pub end_col: u32,
}

impl fmt::Display for ResolvedSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.file_path.display(),
            self.start_line,
            self.start_col
        )
    }
}
