//! Source cleanup run before port scanning.
//!
//! Removes comments and squeezes the whitespace that alignment tables and
//! blank lines leave behind, so that the scanner only sees declaration text.
//! Every step only drops or keeps input bytes, so each output byte can be
//! traced back to the raw text through [`Normalized::origins`].

use std::ops::Range;

/// Cleaned text and where each of its bytes came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// The cleaned text.
    pub text: String,
    /// Offset in the input of every byte of `text`, plus a final entry for
    /// the end of the input.
    pub origins: Vec<u32>,
}

impl Normalized {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            origins: Vec::with_capacity(capacity + 1),
        }
    }

    fn copy(&mut self, src: &str, range: Range<usize>) {
        self.text.push_str(&src[range.clone()]);
        self.origins.extend(range.map(|i| i as u32));
    }

    fn push_newline(&mut self, origin: usize) {
        self.text.push('\n');
        self.origins.push(origin as u32);
    }

    fn finish(mut self, input_len: usize) -> Self {
        self.origins.push(input_len as u32);
        self
    }

    /// Rebases origins that point into the output of `earlier` onto the
    /// input of `earlier`.
    fn through(mut self, earlier: &Normalized) -> Self {
        for origin in &mut self.origins {
            *origin = earlier.origins[*origin as usize];
        }
        self
    }
}

/// Runs every cleanup step in order: comments, alignment runs, blank lines.
pub fn normalize(raw: &str) -> String {
    normalize_mapped(raw).text
}

/// Like [`normalize`], keeping the offset map back into `raw`.
pub fn normalize_mapped(raw: &str) -> Normalized {
    let stripped = strip_comments(raw);
    let aligned = collapse_alignment(&stripped.text).through(&stripped);
    collapse_blank_lines(&aligned.text).through(&aligned)
}

/// Removes `// ...` up to (not including) the line break, and every
/// `/* ... */` block individually. An unterminated block comment runs to the
/// end of the text. String literals are copied untouched so `"a//b"` stays.
pub fn strip_comments(text: &str) -> Normalized {
    let bytes = text.as_bytes();
    let mut out = Normalized::with_capacity(text.len());
    let mut pos = 0;
    let mut copied = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'"' => pos = skip_string(bytes, pos),
            b'/' if bytes.get(pos + 1) == Some(&b'/') => {
                out.copy(text, copied..pos);
                while pos < bytes.len() && bytes[pos] != b'\n' && bytes[pos] != b'\r' {
                    pos += 1;
                }
                copied = pos;
            }
            b'/' if bytes.get(pos + 1) == Some(&b'*') => {
                out.copy(text, copied..pos);
                pos = match text[pos + 2..].find("*/") {
                    Some(end) => pos + 2 + end + 2,
                    None => bytes.len(),
                };
                copied = pos;
            }
            _ => pos += 1,
        }
    }
    out.copy(text, copied..bytes.len());
    out.finish(text.len())
}

/// Returns the offset just past the string literal starting at `start`.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'"' | b'\n' => return pos + 1,
            _ => pos += 1,
        }
    }
    bytes.len()
}

/// Replaces every run of four or more spaces with its first space.
pub fn collapse_alignment(text: &str) -> Normalized {
    let bytes = text.as_bytes();
    let mut out = Normalized::with_capacity(text.len());
    let mut pos = 0;
    let mut copied = 0;

    while pos < bytes.len() {
        if bytes[pos] != b' ' {
            pos += 1;
            continue;
        }
        let run_end = bytes[pos..]
            .iter()
            .position(|&b| b != b' ')
            .map_or(bytes.len(), |n| pos + n);
        if run_end - pos >= 4 {
            out.copy(text, copied..pos + 1);
            copied = run_end;
        }
        pos = run_end;
    }
    out.copy(text, copied..bytes.len());
    out.finish(text.len())
}

/// Collapses a newline, any whitespace-only lines after it, and the leading
/// whitespace up to the last of those line breaks into a single newline.
pub fn collapse_blank_lines(text: &str) -> Normalized {
    let bytes = text.as_bytes();
    let mut out = Normalized::with_capacity(text.len());
    let mut copied = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'\n' {
            pos += 1;
            continue;
        }
        let mut last_newline = pos;
        let mut scan = pos + 1;
        while scan < bytes.len() && bytes[scan].is_ascii_whitespace() {
            if bytes[scan] == b'\n' {
                last_newline = scan;
            }
            scan += 1;
        }
        if last_newline > pos {
            out.copy(text, copied..pos);
            out.push_newline(last_newline);
            copied = last_newline + 1;
        }
        pos = last_newline + 1;
    }
    out.copy(text, copied..bytes.len());
    out.finish(text.len())
}
