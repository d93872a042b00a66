//! Source text storage and location tracking for veritb.
//!
//! The [`SourceDb`] owns every text the tool looks at during one run: the
//! Verilog file read from disk and the normalized copy the port scanner works
//! on. [`Span`]s point into either of them and resolve to line/column
//! coordinates through [`ResolvedSpan`] when diagnostics are printed.

#![warn(missing_docs)]

pub mod resolved_span;
pub mod source_db;
pub mod source_file;
pub mod span;

pub use resolved_span::ResolvedSpan;
pub use source_db::SourceDb;
pub use source_file::SourceFile;
pub use span::{FileId, Span};
