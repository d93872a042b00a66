//! Finite-state scanner over port declarations.
//!
//! The scanner does not parse Verilog. It walks the token stream looking for
//! two shapes and ignores everything else:
//!
//! ```text
//! module_decl := "module" WS WORD
//! port_decl   := DIRECTION WS type_kw* RANGE? name_list RANGE?
//! type_kw     := wire | reg | logic | signed | unsigned | tri | var
//! name_list   := segment ("," segment)*
//! segment     := token*        -- token texts joined, whitespace dropped
//! ```
//!
//! A name list ends before `[`, `]`, `;`, `)`, `\`, a string literal, a line
//! break, end of input, or another direction keyword. Width and array text
//! is kept verbatim and shared by every name of the declaration.

use crate::ast::{Direction, PortDescriptor};
use crate::error::ParseError;
use crate::lexer::lex;
use crate::token::{is_type_keyword, lookup_direction, Token, TokenKind};
use log::debug;
use veritb_source::{FileId, Span};

/// One `input`/`output`/`inout` statement as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortDecl {
    /// Declared direction.
    pub direction: Direction,
    /// The direction keyword.
    pub keyword_span: Span,
    /// Range text before the names.
    pub width: Option<String>,
    /// Names in source order, with their spans.
    pub names: Vec<(String, Span)>,
    /// Range text after the names.
    pub array: Option<String>,
}

impl PortDecl {
    /// Expands the statement into one descriptor per name.
    pub fn into_descriptors(self) -> impl Iterator<Item = PortDescriptor> {
        let PortDecl {
            direction,
            width,
            names,
            array,
            ..
        } = self;
        names.into_iter().map(move |(name, span)| PortDescriptor {
            direction,
            width_spec: width.clone(),
            name,
            array_spec: array.clone(),
            span,
        })
    }
}

/// Scanner state: the token stream of one normalized text and a cursor.
pub struct PortParser<'src> {
    tokens: Vec<Token>,
    pos: usize,
    source: &'src str,
}

impl<'src> PortParser<'src> {
    /// Lexes `source`; spans will refer to `file`.
    pub fn new(source: &'src str, file: FileId) -> Self {
        Self {
            tokens: lex(source, file),
            pos: 0,
            source,
        }
    }

    // ========================================================================
    // Primitive operations
    // ========================================================================

    fn current(&self) -> TokenKind {
        self.tokens[self.pos].kind
    }

    fn current_span(&self) -> Span {
        self.tokens[self.pos].span
    }

    fn current_text(&self) -> &'src str {
        let span = self.current_span();
        &self.source[span.start as usize..span.end as usize]
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current() == kind
    }

    fn at_eof(&self) -> bool {
        self.at(TokenKind::Eof)
    }

    fn advance(&mut self) {
        if !self.at_eof() {
            self.pos += 1;
        }
    }

    fn skip_newlines(&mut self) {
        while self.at(TokenKind::Newline) {
            self.advance();
        }
    }

    /// Returns `true` if the byte right after the current token is whitespace.
    fn followed_by_whitespace(&self) -> bool {
        let end = self.current_span().end as usize;
        self.source
            .as_bytes()
            .get(end)
            .is_some_and(|b| b.is_ascii_whitespace())
    }

    /// Returns the direction if the current token starts a declaration.
    fn at_direction(&self) -> Option<Direction> {
        if !self.at(TokenKind::Word) {
            return None;
        }
        lookup_direction(self.current_text())
    }

    // ========================================================================
    // Module header
    // ========================================================================

    /// Finds the first `module` keyword and returns the name after it.
    pub fn module_name(&mut self) -> Result<(String, Span), ParseError> {
        self.pos = 0;
        while !self.at_eof() {
            if self.at(TokenKind::Word)
                && self.current_text() == "module"
                && self.followed_by_whitespace()
            {
                let keyword = self.current_span();
                self.advance();
                self.skip_newlines();
                if !self.at(TokenKind::Word) {
                    return Err(ParseError::MissingModuleName { span: keyword });
                }
                let name = self.current_text().to_string();
                debug!("found module `{name}`");
                return Ok((name, self.current_span()));
            }
            self.advance();
        }
        Err(ParseError::NoModule)
    }

    // ========================================================================
    // Port declarations
    // ========================================================================

    /// Scans the whole text for port declarations, in source order.
    pub fn port_declarations(&mut self) -> Result<Vec<PortDecl>, ParseError> {
        self.pos = 0;
        let mut decls = Vec::new();
        while !self.at_eof() {
            match self.at_direction() {
                Some(direction) if self.followed_by_whitespace() => {
                    decls.push(self.declaration(direction)?);
                }
                _ => self.advance(),
            }
        }
        Ok(decls)
    }

    /// Parses one declaration starting at its direction keyword.
    fn declaration(&mut self, direction: Direction) -> Result<PortDecl, ParseError> {
        let keyword_span = self.current_span();
        self.advance();
        self.skip_newlines();

        while self.at(TokenKind::Word) && is_type_keyword(self.current_text()) {
            self.advance();
            self.skip_newlines();
        }

        let width = self.eat_range();
        if width.is_some() {
            self.skip_newlines();
        }
        let names = self.name_list();
        let array = self.eat_range();

        if names.is_empty() {
            return Err(ParseError::EmptyPortList {
                direction,
                span: keyword_span,
            });
        }

        debug!(
            "{direction} declaration: width={width:?} names={:?} array={array:?}",
            names.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>()
        );

        Ok(PortDecl {
            direction,
            keyword_span,
            width,
            names,
            array,
        })
    }

    fn eat_range(&mut self) -> Option<String> {
        if !self.at(TokenKind::Range) {
            return None;
        }
        let text = self.current_text().to_string();
        self.advance();
        Some(text)
    }

    /// Collects comma-separated segments, dropping empty ones.
    fn name_list(&mut self) -> Vec<(String, Span)> {
        let mut names = Vec::new();
        let mut segment = String::new();
        let mut segment_span: Option<Span> = None;

        loop {
            match self.current() {
                TokenKind::Word if self.at_direction().is_some() => break,
                TokenKind::Word | TokenKind::Punct | TokenKind::LParen => {
                    let span = self.current_span();
                    segment.push_str(self.current_text());
                    segment_span = Some(segment_span.map_or(span, |s| s.merge(span)));
                    self.advance();
                }
                TokenKind::Comma => {
                    if let Some(span) = segment_span.take() {
                        names.push((std::mem::take(&mut segment), span));
                    }
                    self.advance();
                }
                TokenKind::Range
                | TokenKind::LBracket
                | TokenKind::RBracket
                | TokenKind::Semicolon
                | TokenKind::RParen
                | TokenKind::Backslash
                | TokenKind::Str
                | TokenKind::Newline
                | TokenKind::Eof => break,
            }
        }
        if let Some(span) = segment_span {
            names.push((segment, span));
        }
        names
    }
}

/// Returns the name of the first module declared in `cleaned`.
pub fn extract_module_name(cleaned: &str) -> Result<String, ParseError> {
    PortParser::new(cleaned, FileId::DUMMY)
        .module_name()
        .map(|(name, _)| name)
}

/// Returns every port declared in `cleaned`, in declaration order.
///
/// Spans in the result are not attached to any file; use
/// [`parse_interface`](crate::parse_interface) for located diagnostics.
pub fn extract_ports(cleaned: &str) -> Result<Vec<PortDescriptor>, ParseError> {
    let decls = PortParser::new(cleaned, FileId::DUMMY).port_declarations()?;
    Ok(decls.into_iter().flat_map(PortDecl::into_descriptors).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(ports: &[PortDescriptor]) -> Vec<&str> {
        ports.iter().map(|p| p.name.as_str()).collect()
    }

    // -- module name --

    #[test]
    fn module_name_before_port_list() {
        assert_eq!(extract_module_name("module foo (input a);").unwrap(), "foo");
        assert_eq!(extract_module_name("module foo(input a);").unwrap(), "foo");
        assert_eq!(extract_module_name("module foo;").unwrap(), "foo");
        assert_eq!(
            extract_module_name("module foo #(parameter N = 4)(input a);").unwrap(),
            "foo"
        );
    }

    #[test]
    fn module_name_on_next_line() {
        assert_eq!(extract_module_name("module\n  bar (\n);").unwrap(), "bar");
    }

    #[test]
    fn first_module_wins() {
        assert_eq!(
            extract_module_name("module a; endmodule\nmodule b; endmodule").unwrap(),
            "a"
        );
    }

    #[test]
    fn endmodule_is_not_a_module_keyword() {
        assert_eq!(
            extract_module_name("endmodule\n").unwrap_err(),
            ParseError::NoModule
        );
        assert_eq!(
            extract_module_name("submodule x;").unwrap_err(),
            ParseError::NoModule
        );
    }

    #[test]
    fn no_module() {
        assert_eq!(
            extract_module_name("input a;").unwrap_err(),
            ParseError::NoModule
        );
        assert_eq!(extract_module_name("").unwrap_err(), ParseError::NoModule);
    }

    #[test]
    fn module_without_name() {
        let err = extract_module_name("module (input a);").unwrap_err();
        assert!(matches!(err, ParseError::MissingModuleName { span } if span.start == 0));
    }

    // -- ports --

    #[test]
    fn comma_joined_names_share_declaration() {
        let ports = extract_ports("input a, b, c;").unwrap();
        assert_eq!(names(&ports), vec!["a", "b", "c"]);
        for p in &ports {
            assert_eq!(p.direction, Direction::Input);
            assert!(p.width_spec.is_none());
            assert!(p.array_spec.is_none());
        }
    }

    #[test]
    fn ansi_header_on_one_line() {
        let ports = extract_ports("module g(input a, input b, output y);").unwrap();
        assert_eq!(names(&ports), vec!["a", "b", "y"]);
        assert_eq!(ports[2].direction, Direction::Output);
    }

    #[test]
    fn ansi_header_one_port_per_line() {
        let src = "module m(\n input a,\n input b,\n output y\n);";
        let ports = extract_ports(src).unwrap();
        assert_eq!(names(&ports), vec!["a", "b", "y"]);
    }

    #[test]
    fn non_ansi_body_declarations() {
        let src = "module m(a, b, y);\ninput a, b;\noutput y;\nassign y = a & b;\nendmodule";
        let ports = extract_ports(src).unwrap();
        assert_eq!(names(&ports), vec!["a", "b", "y"]);
    }

    #[test]
    fn width_applies_to_every_name() {
        let ports = extract_ports("input [7:0] a, b;").unwrap();
        assert_eq!(names(&ports), vec!["a", "b"]);
        assert!(ports
            .iter()
            .all(|p| p.width_spec.as_deref() == Some("[7:0]")));
    }

    #[test]
    fn names_may_start_on_the_line_after_the_width() {
        let ports = extract_ports("module m(\n  input [7:0]\n  data,\n  output y\n);").unwrap();
        assert_eq!(names(&ports), vec!["data", "y"]);
        assert_eq!(ports[0].width_spec.as_deref(), Some("[7:0]"));
        assert!(ports[1].width_spec.is_none());
    }

    #[test]
    fn array_after_names_applies_to_every_name() {
        let ports = extract_ports("input x, y [0:3];").unwrap();
        assert_eq!(names(&ports), vec!["x", "y"]);
        assert!(ports
            .iter()
            .all(|p| p.array_spec.as_deref() == Some("[0:3]")));
    }

    #[test]
    fn width_and_array_together() {
        let ports = extract_ports("input [7:0] mem [0:15];").unwrap();
        assert_eq!(ports[0].width_spec.as_deref(), Some("[7:0]"));
        assert_eq!(ports[0].name, "mem");
        assert_eq!(ports[0].array_spec.as_deref(), Some("[0:15]"));
    }

    #[test]
    fn inout_direction() {
        let ports = extract_ports("inout sda;").unwrap();
        assert_eq!(ports[0].direction, Direction::Inout);
    }

    #[test]
    fn type_keywords_are_skipped() {
        let ports =
            extract_ports("module m(input wire clk, output reg signed [3:0] q);").unwrap();
        assert_eq!(names(&ports), vec!["clk", "q"]);
        assert!(ports[0].width_spec.is_none());
        assert_eq!(ports[1].width_spec.as_deref(), Some("[3:0]"));
    }

    #[test]
    fn trailing_comma_is_dropped() {
        let ports = extract_ports("input a, b,\n").unwrap();
        assert_eq!(names(&ports), vec!["a", "b"]);
    }

    #[test]
    fn spaces_inside_a_segment_are_removed() {
        let ports = extract_ports("output reg q = 1'b0;").unwrap();
        assert_eq!(names(&ports), vec!["q=1'b0"]);
    }

    #[test]
    fn direction_needs_whitespace_and_word_boundary() {
        assert!(extract_ports("input_a, myinput b;").unwrap().is_empty());
        assert!(extract_ports("input;").unwrap().is_empty());
    }

    #[test]
    fn direction_inside_string_is_ignored() {
        let src = "initial $display(\"output is %d\", y);";
        assert!(extract_ports(src).unwrap().is_empty());
    }

    #[test]
    fn empty_name_list_is_an_error() {
        let err = extract_ports("module m;\ninput ;\nendmodule").unwrap_err();
        match err {
            ParseError::EmptyPortList { direction, span } => {
                assert_eq!(direction, Direction::Input);
                assert_eq!(span.start, 10);
            }
            other => panic!("expected EmptyPortList, got {other:?}"),
        }
        assert!(matches!(
            extract_ports("output [3:0];").unwrap_err(),
            ParseError::EmptyPortList { .. }
        ));
    }

    #[test]
    fn order_follows_source() {
        let src = "output y;\ninput b, a;\ninout z;";
        let ports = extract_ports(src).unwrap();
        assert_eq!(names(&ports), vec!["y", "b", "a", "z"]);
    }

    #[test]
    fn name_spans_point_at_names() {
        let src = "input  alpha , beta;";
        let ports = extract_ports(src).unwrap();
        let a = ports[0].span;
        let b = ports[1].span;
        assert_eq!(&src[a.start as usize..a.end as usize], "alpha");
        assert_eq!(&src[b.start as usize..b.end as usize], "beta");
    }

    #[test]
    fn declarations_keep_keyword_span() {
        let mut parser = PortParser::new("  output y;", FileId::from_raw(2));
        let decls = parser.port_declarations().unwrap();
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].keyword_span, Span::new(FileId::from_raw(2), 2, 8));
    }
}
