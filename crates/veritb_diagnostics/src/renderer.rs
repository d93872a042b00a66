//! Rendering diagnostics for the terminal.

use crate::diagnostic::Diagnostic;
use crate::label::{Label, LabelStyle};
use veritb_source::{SourceDb, Span};

const RESET: &str = "\x1b[0m";

/// Formats a diagnostic into a printable string.
pub trait DiagnosticRenderer {
    /// Renders one diagnostic.
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String;
}

/// Renders diagnostics in a rustc-like layout:
///
/// ```text
/// error[E004]: port `a` is declared more than once
///   --> and2.v:3:7
///    |
///  3 | input a;
///    |       ^ declared again here
///   --> and2.v:2:7
///    |
///  2 | input a, b;
///    |       - first declared here
///    = help: rename or remove one of the declarations
/// ```
pub struct TerminalRenderer {
    /// Whether to color the severity header.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn header(&self, diag: &Diagnostic) -> String {
        if self.color {
            format!(
                "{}{}[{}]{RESET}: {}\n",
                diag.severity.ansi_color(),
                diag.severity,
                diag.code,
                diag.message
            )
        } else {
            format!("{}[{}]: {}\n", diag.severity, diag.code, diag.message)
        }
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let mut out = self.header(diag);

        if !diag.primary_span.is_dummy() {
            let message = diag
                .labels
                .iter()
                .find(|l| l.style == LabelStyle::Primary)
                .map(|l| l.message.as_str())
                .unwrap_or_default();
            render_snippet(&mut out, source_db, diag.primary_span, '^', message);
        }

        for label in diag
            .labels
            .iter()
            .filter(|l| l.style == LabelStyle::Secondary && !l.span.is_dummy())
        {
            render_label(&mut out, source_db, label);
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }
        out
    }
}

fn render_label(out: &mut String, source_db: &SourceDb, label: &Label) {
    render_snippet(
        out,
        source_db,
        label.span,
        label.underline_char(),
        &label.message,
    );
}

fn render_snippet(out: &mut String, source_db: &SourceDb, span: Span, mark: char, message: &str) {
    let span = source_db.origin(span);
    let resolved = source_db.resolve_span(span);
    let file = source_db.get_file(span.file);
    let line_num = resolved.start_line.to_string();
    let padding = " ".repeat(line_num.len());

    out.push_str(&format!("{padding}--> {resolved}\n"));
    out.push_str(&format!("{padding} |\n"));
    out.push_str(&format!(
        "{line_num} | {}\n",
        file.line_text(resolved.start_line)
    ));

    let width = if resolved.start_line == resolved.end_line {
        (span.len() as usize).max(1)
    } else {
        1
    };
    let underline = mark.to_string().repeat(width);
    let col_padding = " ".repeat((resolved.start_col as usize).saturating_sub(1));
    let suffix = if message.is_empty() {
        String::new()
    } else {
        format!(" {message}")
    };
    out.push_str(&format!("{padding} | {col_padding}{underline}{suffix}\n"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Category, DiagnosticCode};

    #[test]
    fn render_error_with_primary_label() {
        let mut db = SourceDb::new();
        let id = db.add_source("g.v", "module g(\ninput [3:0] a\n);".to_string());
        let span = Span::new(id, 16, 21);
        let diag = Diagnostic::warning(
            DiagnosticCode::new(Category::Warning, 101),
            "port `a` has a bus width",
            span,
        )
        .with_label(Label::primary(span, "width here"));

        let output = TerminalRenderer::new(false).render(&diag, &db);
        assert!(output.starts_with("warning[W101]: port `a` has a bus width\n"));
        assert!(output.contains("--> g.v:2:7"));
        assert!(output.contains("2 | input [3:0] a"));
        assert!(output.contains("|       ^^^^^ width here"));
    }

    #[test]
    fn render_secondary_label_location() {
        let mut db = SourceDb::new();
        let id = db.add_source("d.v", "input a;\ninput a;".to_string());
        let first = Span::new(id, 6, 7);
        let second = Span::new(id, 15, 16);
        let diag = Diagnostic::error(
            DiagnosticCode::new(Category::Error, 4),
            "port `a` is declared more than once",
            second,
        )
        .with_label(Label::secondary(first, "first declared here"));

        let output = TerminalRenderer::new(false).render(&diag, &db);
        assert!(output.contains("--> d.v:2:7"));
        assert!(output.contains("--> d.v:1:7"));
        assert!(output.contains("- first declared here"));
    }

    #[test]
    fn derived_span_shows_original_line() {
        let mut db = SourceDb::new();
        let raw = "// bus\n\ninput    [3:0] a;";
        let id = db.add_source("g.v", raw.to_string());
        let clean = "\ninput [3:0] a;";
        let mut origins = vec![7];
        origins.extend(8..14);
        origins.extend(17..26);
        let derived = db.add_derived(id, clean.to_string(), origins);
        let span = Span::new(derived, 13, 14);
        assert_eq!(db.snippet(span), "a");
        let diag = Diagnostic::warning(
            DiagnosticCode::new(Category::Warning, 101),
            "port `a` has a bus width",
            span,
        );

        let output = TerminalRenderer::new(false).render(&diag, &db);
        assert!(output.contains("--> g.v:3:16"));
        assert!(output.contains("3 | input    [3:0] a;"));
        assert!(output.contains("|                ^"));
    }

    #[test]
    fn dummy_span_has_no_location() {
        let db = SourceDb::new();
        let diag = Diagnostic::error(
            DiagnosticCode::new(Category::Error, 1),
            "no module declaration found",
            Span::DUMMY,
        )
        .with_note("the input must contain `module <name>`");

        let output = TerminalRenderer::new(false).render(&diag, &db);
        assert!(output.contains("error[E001]: no module declaration found"));
        assert!(!output.contains("-->"));
        assert!(output.contains("= note: the input must contain `module <name>`"));
    }

    #[test]
    fn color_wraps_header() {
        let db = SourceDb::new();
        let diag = Diagnostic::error(
            DiagnosticCode::new(Category::Error, 1),
            "no module declaration found",
            Span::DUMMY,
        );
        let output = TerminalRenderer::new(true).render(&diag, &db);
        assert!(output.starts_with("\x1b[1;31merror[E001]\x1b[0m: "));
    }
}
