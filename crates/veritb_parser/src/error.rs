//! Parse failures and the diagnostic codes used by this crate.

use crate::ast::{Direction, PortDescriptor, UnsupportedFeature};
use veritb_diagnostics::{Category, Diagnostic, DiagnosticCode, Label};
use veritb_source::Span;

/// No `module` keyword in the input.
pub const NO_MODULE: DiagnosticCode = DiagnosticCode::new(Category::Error, 1);
/// `module` is not followed by a name.
pub const MISSING_MODULE_NAME: DiagnosticCode = DiagnosticCode::new(Category::Error, 2);
/// A direction keyword declares no names.
pub const EMPTY_PORT_LIST: DiagnosticCode = DiagnosticCode::new(Category::Error, 3);
/// Two ports share a name.
pub const DUPLICATE_PORT: DiagnosticCode = DiagnosticCode::new(Category::Error, 4);
/// A port has a bus width.
pub const BUS_WIDTH: DiagnosticCode = DiagnosticCode::new(Category::Warning, 101);
/// A port has an array dimension.
pub const ARRAY_PORT: DiagnosticCode = DiagnosticCode::new(Category::Warning, 102);
/// A port is `inout`.
pub const INOUT_PORT: DiagnosticCode = DiagnosticCode::new(Category::Warning, 103);
/// A port name is not a plain identifier.
pub const SUSPICIOUS_NAME: DiagnosticCode = DiagnosticCode::new(Category::Warning, 104);

/// A problem that prevents building a [`ModuleInterface`](crate::ModuleInterface).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The text contains no `module` keyword followed by whitespace.
    #[error("no module declaration found")]
    NoModule,

    /// `module` is followed by something other than a name.
    #[error("`module` keyword is not followed by a module name")]
    MissingModuleName {
        /// The `module` keyword.
        span: Span,
    },

    /// A direction keyword is followed by no port names.
    #[error("`{direction}` declaration lists no port names")]
    EmptyPortList {
        /// The direction of the declaration.
        direction: Direction,
        /// The direction keyword.
        span: Span,
    },

    /// The same port name is declared twice.
    #[error("port `{name}` is declared more than once")]
    DuplicatePort {
        /// The repeated name.
        name: String,
        /// Where the name was first declared.
        first: Span,
        /// Where it was declared again.
        second: Span,
    },
}

impl ParseError {
    /// Converts this error into a diagnostic pointing at the offending text.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let message = self.to_string();
        match self {
            ParseError::NoModule => Diagnostic::error(NO_MODULE, message, Span::DUMMY)
                .with_note("the input must contain a `module <name>` declaration"),
            ParseError::MissingModuleName { span } => {
                Diagnostic::error(MISSING_MODULE_NAME, message, *span)
                    .with_label(Label::primary(*span, "expected a name after this"))
            }
            ParseError::EmptyPortList { span, .. } => {
                Diagnostic::error(EMPTY_PORT_LIST, message, *span)
                    .with_label(Label::primary(*span, "declaration starts here"))
                    .with_note("names must follow on the same line as the direction")
            }
            ParseError::DuplicatePort { first, second, .. } => {
                Diagnostic::error(DUPLICATE_PORT, message, *second)
                    .with_label(Label::primary(*second, "declared again here"))
                    .with_label(Label::secondary(*first, "first declared here"))
                    .with_help("rename or remove one of the declarations")
            }
        }
    }
}

/// Warning for a port the truth-table generator cannot model.
pub(crate) fn unsupported_port(port: &PortDescriptor, feature: UnsupportedFeature) -> Diagnostic {
    let code = match feature {
        UnsupportedFeature::BusWidth => BUS_WIDTH,
        UnsupportedFeature::Array => ARRAY_PORT,
        UnsupportedFeature::Bidirectional => INOUT_PORT,
    };
    Diagnostic::warning(
        code,
        format!("port `{}` has a {feature}", port.name),
        port.span,
    )
    .with_note("truth-table generation is disabled for this module")
}

/// Warning for a name that will not form a valid testbench declaration.
pub(crate) fn suspicious_name(port: &PortDescriptor) -> Diagnostic {
    Diagnostic::warning(
        SUSPICIOUS_NAME,
        format!("port name `{}` is not a plain identifier", port.name),
        port.span,
    )
    .with_help("initializers and escaped identifiers are copied into the testbench verbatim")
}

#[cfg(test)]
mod tests {
    use super::*;
    use veritb_diagnostics::Severity;
    use veritb_source::FileId;

    #[test]
    fn messages() {
        assert_eq!(ParseError::NoModule.to_string(), "no module declaration found");
        let err = ParseError::EmptyPortList {
            direction: Direction::Inout,
            span: Span::DUMMY,
        };
        assert_eq!(err.to_string(), "`inout` declaration lists no port names");
    }

    #[test]
    fn duplicate_diagnostic_has_both_locations() {
        let f = FileId::from_raw(0);
        let err = ParseError::DuplicatePort {
            name: "a".to_string(),
            first: Span::new(f, 6, 7),
            second: Span::new(f, 15, 16),
        };
        let diag = err.to_diagnostic();
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.code, DUPLICATE_PORT);
        assert_eq!(diag.primary_span, Span::new(f, 15, 16));
        assert_eq!(diag.labels.len(), 2);
    }

    #[test]
    fn codes_are_distinct() {
        let codes = [
            NO_MODULE,
            MISSING_MODULE_NAME,
            EMPTY_PORT_LIST,
            DUPLICATE_PORT,
            BUS_WIDTH,
            ARRAY_PORT,
            INOUT_PORT,
            SUSPICIOUS_NAME,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
