//! Byte-level lexer producing [`Token`]s for the declaration scanner.

use crate::token::{is_word_byte, Token, TokenKind};
use veritb_source::{FileId, Span};

/// Lexes `source` into tokens. Whitespace other than `\n` is skipped; the
/// result always ends with [`TokenKind::Eof`].
pub fn lex(source: &str, file: FileId) -> Vec<Token> {
    let mut lexer = Lexer {
        source,
        bytes: source.as_bytes(),
        pos: 0,
        file,
    };
    lexer.lex_all()
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    file: FileId,
}

impl Lexer<'_> {
    fn lex_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            self.skip_blanks();
            if self.pos >= self.bytes.len() {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    span: Span::from_range(self.file, self.pos..self.pos),
                });
                return tokens;
            }
            tokens.push(self.next_token());
        }
    }

    fn skip_blanks(&mut self) {
        while self.pos < self.bytes.len()
            && self.bytes[self.pos].is_ascii_whitespace()
            && self.bytes[self.pos] != b'\n'
        {
            self.pos += 1;
        }
    }

    fn next_token(&mut self) -> Token {
        let start = self.pos;
        let kind = match self.bytes[start] {
            b if is_word_byte(b) => {
                while self.pos < self.bytes.len() && is_word_byte(self.bytes[self.pos]) {
                    self.pos += 1;
                }
                TokenKind::Word
            }
            b'[' => self.lex_range(),
            b'"' => self.lex_string(),
            b']' => self.single(TokenKind::RBracket),
            b',' => self.single(TokenKind::Comma),
            b';' => self.single(TokenKind::Semicolon),
            b'(' => self.single(TokenKind::LParen),
            b')' => self.single(TokenKind::RParen),
            b'\\' => self.single(TokenKind::Backslash),
            b'\n' => self.single(TokenKind::Newline),
            _ => {
                self.pos += self.char_width();
                TokenKind::Punct
            }
        };
        Token {
            kind,
            span: Span::from_range(self.file, start..self.pos),
        }
    }

    /// UTF-8 width of the character at the current position.
    fn char_width(&self) -> usize {
        self.source[self.pos..]
            .chars()
            .next()
            .map_or(1, char::len_utf8)
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.pos += 1;
        kind
    }

    /// `"` up to the closing quote, honoring backslash escapes. A literal
    /// left open at the end of the line stops there.
    fn lex_string(&mut self) -> TokenKind {
        self.pos += 1;
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'\\' => {
                    self.pos += 1;
                    if self.pos < self.bytes.len() {
                        self.pos += self.char_width();
                    }
                }
                b'"' => {
                    self.pos += 1;
                    break;
                }
                b'\n' => break,
                _ => self.pos += 1,
            }
        }
        TokenKind::Str
    }

    /// `[` followed by anything but `[` up to the first `]`.
    fn lex_range(&mut self) -> TokenKind {
        let body = &self.bytes[self.pos + 1..];
        for (i, &b) in body.iter().enumerate() {
            match b {
                b']' => {
                    self.pos += i + 2;
                    return TokenKind::Range;
                }
                b'[' => break,
                _ => {}
            }
        }
        self.pos += 1;
        TokenKind::LBracket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source, FileId::DUMMY).iter().map(|t| t.kind).collect()
    }

    fn texts(source: &str) -> Vec<String> {
        lex(source, FileId::DUMMY)
            .iter()
            .map(|t| source[t.span.start as usize..t.span.end as usize].to_string())
            .collect()
    }

    #[test]
    fn declaration_tokens() {
        use TokenKind::*;
        assert_eq!(
            kinds("input [3:0] a, b;"),
            vec![Word, Range, Word, Comma, Word, Semicolon, Eof]
        );
        assert_eq!(texts("input [3:0] a, b;")[1], "[3:0]");
    }

    #[test]
    fn newlines_are_tokens() {
        use TokenKind::*;
        assert_eq!(
            kinds("input a,\r\n  input b"),
            vec![Word, Word, Comma, Newline, Word, Word, Eof]
        );
    }

    #[test]
    fn range_may_contain_spaces_and_expressions() {
        assert_eq!(texts("[WIDTH - 1 : 0]")[0], "[WIDTH - 1 : 0]");
    }

    #[test]
    fn nested_bracket_is_not_a_range() {
        use TokenKind::*;
        assert_eq!(
            kinds("[a[0]]"),
            vec![LBracket, Word, Range, RBracket, Eof]
        );
    }

    #[test]
    fn unterminated_bracket() {
        use TokenKind::*;
        assert_eq!(kinds("input [3:0 a"), vec![Word, LBracket, Word, Punct, Word, Word, Eof]);
    }

    #[test]
    fn punctuation_and_utf8() {
        use TokenKind::*;
        assert_eq!(kinds("q = 1'b0"), vec![Word, Punct, Word, Punct, Word, Eof]);
        assert_eq!(texts("é;"), vec!["é", ";", ""]);
    }

    #[test]
    fn keywords_inside_strings_are_hidden() {
        use TokenKind::*;
        assert_eq!(
            kinds("$display(\"output is %d\", y);"),
            vec![Word, LParen, Str, Comma, Word, RParen, Semicolon, Eof]
        );
        assert_eq!(texts("\"a\\\"b\" c")[0], "\"a\\\"b\"");
    }

    #[test]
    fn escaped_multibyte_char_in_string() {
        use TokenKind::*;
        assert_eq!(kinds("\"\\é\" ;"), vec![Str, Semicolon, Eof]);
    }

    #[test]
    fn unterminated_string_stops_at_line_break() {
        use TokenKind::*;
        assert_eq!(kinds("\"abc\ninput"), vec![Str, Newline, Word, Eof]);
    }

    #[test]
    fn eof_span_at_end() {
        let tokens = lex("ab ", FileId::DUMMY);
        assert_eq!(tokens.last().unwrap().span.start, 3);
    }
}
