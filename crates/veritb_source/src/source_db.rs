//! The database of every text loaded during one run.

use crate::resolved_span::ResolvedSpan;
use crate::source_file::SourceFile;
use crate::span::{FileId, Span};
use std::io;
use std::path::{Path, PathBuf};

/// Owns the loaded source texts and resolves [`Span`]s against them.
pub struct SourceDb {
    files: Vec<SourceFile>,
}

impl SourceDb {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Reads a file from disk and returns its [`FileId`].
    pub fn load_file(&mut self, path: &Path) -> Result<FileId, io::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.push(path.to_path_buf(), content, None))
    }

    /// Adds an in-memory text under the given display name.
    pub fn add_source(&mut self, name: impl Into<PathBuf>, content: String) -> FileId {
        self.push(name.into(), content, None)
    }

    /// Adds a text produced from `parent`, such as its normalized form.
    ///
    /// `origins` holds the offset in `parent` of every byte of `content`,
    /// followed by one entry for the end. Spans into the new text resolve
    /// to positions in `parent`; see [`SourceDb::origin`].
    pub fn add_derived(&mut self, parent: FileId, content: String, origins: Vec<u32>) -> FileId {
        let path = PathBuf::from(format!(
            "{} (normalized)",
            self.get_file(parent).path.display()
        ));
        let id = self.push(path, content, Some(parent));
        self.files[id.as_raw() as usize].origins = origins;
        id
    }

    fn push(&mut self, path: PathBuf, content: String, derived_from: Option<FileId>) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        self.files
            .push(SourceFile::new(id, path, content, derived_from));
        id
    }

    /// Returns the text for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this database.
    pub fn get_file(&self, id: FileId) -> &SourceFile {
        &self.files[id.as_raw() as usize]
    }

    /// Follows derived texts back to the file they were produced from and
    /// returns the matching span there. Other spans are returned unchanged.
    pub fn origin(&self, span: Span) -> Span {
        let file = self.get_file(span.file);
        let Some(parent) = file.derived_from else {
            return span;
        };
        let Some(&start) = file.origins.get(span.start as usize) else {
            return span;
        };
        let end = if span.end > span.start {
            file.origins
                .get(span.end as usize - 1)
                .map_or(start, |&last| last + 1)
        } else {
            start
        };
        self.origin(Span::new(parent, start, end))
    }

    /// Resolves a span to line/column coordinates in the file it
    /// originates from.
    pub fn resolve_span(&self, span: Span) -> ResolvedSpan {
        let span = self.origin(span);
        let file = self.get_file(span.file);
        let (start_line, start_col) = file.line_col(span.start);
        let (end_line, end_col) = file.line_col(span.end.saturating_sub(1).max(span.start));
        ResolvedSpan {
            file_path: file.path.clone(),
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Returns the text covered by `span`.
    pub fn snippet(&self, span: Span) -> &str {
        self.get_file(span.file).snippet(span.start, span.end)
    }

    /// Number of texts loaded so far.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if nothing has been loaded.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Default for SourceDb {
    fn default() -> Self {
        Self::new()
    }
}
