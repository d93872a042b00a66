//! File identifiers and byte ranges inside loaded source texts.

use serde::{Deserialize, Serialize};

/// Identifies one text held by the [`SourceDb`](crate::SourceDb).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct FileId(u32);

impl FileId {
    /// Used for spans that do not belong to any loaded text, such as ports
    /// scanned from a bare string in tests.
    pub const DUMMY: FileId = FileId(u32::MAX);

    /// Creates a `FileId` from its index in the source database.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the index of this file in the source database.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

/// A half-open byte range `start..end` inside one source text.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Span {
    /// The text this span belongs to.
    pub file: FileId,
    /// Inclusive start offset.
    pub start: u32,
    /// Exclusive end offset.
    pub end: u32,
}

impl Span {
    /// A span with no source location.
    pub const DUMMY: Span = Span {
        file: FileId::DUMMY,
        start: 0,
        end: 0,
    };

    /// Creates a span over `start..end` in `file`.
    pub fn new(file: FileId, start: u32, end: u32) -> Self {
        Self { file, start, end }
    }

    /// Creates a span from `usize` offsets, as produced by byte scanners.
    pub fn from_range(file: FileId, range: std::ops::Range<usize>) -> Self {
        Self::new(file, range.start as u32, range.end as u32)
    }

    /// Returns the smallest span covering both `self` and `other`.
    ///
    /// # Panics
    ///
    /// Panics if the spans belong to different files.
    pub fn merge(self, other: Span) -> Span {
        assert_eq!(
            self.file, other.file,
            "cannot merge spans from different files"
        );
        Span {
            file: self.file,
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Returns `true` for zero-length spans.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if this span has no file behind it.
    pub fn is_dummy(&self) -> bool {
        self.file == FileId::DUMMY
    }
}
