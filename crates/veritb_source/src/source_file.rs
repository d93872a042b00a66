//! A single source text with a line index.

use crate::span::FileId;
use std::path::PathBuf;

/// One text held by the [`SourceDb`](crate::SourceDb).
///
/// Besides files read from disk, the database holds texts derived from them
/// (the comment-stripped copy the port scanner runs on). `derived_from`
/// links such a text back to the file it was produced from.
pub struct SourceFile {
    /// Identifier of this text.
    pub id: FileId,
    /// Path shown in diagnostics.
    pub path: PathBuf,
    /// Full text content.
    pub content: String,
    /// The file this text was derived from, if any.
    pub derived_from: Option<FileId>,
    /// For derived texts, the offset in the parent of every byte plus the
    /// end. Empty otherwise.
    pub(crate) origins: Vec<u32>,
    line_starts: Vec<u32>,
}

impl SourceFile {
    /// Creates a source file and indexes its line starts.
    pub fn new(id: FileId, path: PathBuf, content: String, derived_from: Option<FileId>) -> Self {
        let line_starts = compute_line_starts(&content);
        Self {
            id,
            path,
            content,
            derived_from,
            origins: Vec::new(),
            line_starts,
        }
    }

    /// Converts a byte offset into 1-indexed `(line, column)`.
    pub fn line_col(&self, byte_offset: u32) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&byte_offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line = (line_idx as u32) + 1;
        let col = byte_offset - self.line_starts[line_idx] + 1;
        (line, col)
    }

    /// Returns the text of the 1-indexed `line`, without its newline.
    pub fn line_text(&self, line: u32) -> &str {
        let idx = (line as usize).saturating_sub(1);
        let Some(&start) = self.line_starts.get(idx) else {
            return "";
        };
        let end = self
            .line_starts
            .get(idx + 1)
            .map_or(self.content.len(), |&next| next as usize - 1);
        self.content[start as usize..end].trim_end_matches('\r')
    }

    /// Returns the text between two byte offsets.
    pub fn snippet(&self, start: u32, end: u32) -> &str {
        &self.content[start as usize..end as usize]
    }

}

fn compute_line_starts(content: &str) -> Vec<u32> {
    let mut starts = vec![0u32];
    for (i, byte) in content.bytes().enumerate() {
        if byte == b'\n' {
            starts.push((i + 1) as u32);
        }
    }
    starts
}
