//! Tokens seen by the declaration scanner.
//!
//! The lexer only distinguishes what the port grammar needs: words,
//! bracketed ranges, the punctuation that separates or ends a name list,
//! and line breaks (a name list never continues past one).

use crate::ast::Direction;
use veritb_source::Span;

/// Kind of a scanned token. Text is recovered from the source via the span.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TokenKind {
    /// A run of `[A-Za-z0-9_$]`: identifiers, keywords and plain numbers.
    Word,
    /// `[` up to the first `]`, e.g. `[WIDTH-1:0]`.
    Range,
    /// A `[` with no matching `]` before the next `[` or end of input.
    LBracket,
    /// A stray `]`.
    RBracket,
    /// A double-quoted string literal, so keywords inside it are not seen.
    Str,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `\`
    Backslash,
    /// `\n`
    Newline,
    /// Any other single character.
    Punct,
    /// End of input.
    Eof,
}

/// A token with its location.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Token {
    /// Token kind.
    pub kind: TokenKind,
    /// Byte range in the scanned text.
    pub span: Span,
}

/// Net and variable type keywords that may follow a direction and are not
/// part of the port name (`input wire a`, `output reg signed [7:0] q`).
pub const TYPE_KEYWORDS: &[&str] = &["wire", "reg", "logic", "signed", "unsigned", "tri", "var"];

/// Maps `input`/`output`/`inout` to a [`Direction`].
pub fn lookup_direction(word: &str) -> Option<Direction> {
    match word {
        "input" => Some(Direction::Input),
        "output" => Some(Direction::Output),
        "inout" => Some(Direction::Inout),
        _ => None,
    }
}

/// Returns `true` for the keywords in [`TYPE_KEYWORDS`].
pub fn is_type_keyword(word: &str) -> bool {
    TYPE_KEYWORDS.contains(&word)
}

/// Returns `true` for bytes that continue a [`TokenKind::Word`].
pub fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}
