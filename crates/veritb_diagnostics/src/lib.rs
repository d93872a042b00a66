//! Structured diagnostics for problems found while reading a Verilog module.
//!
//! Parsing reports into a [`DiagnosticSink`] instead of printing; the CLI
//! decides afterwards how to show what was collected, either through the
//! [`TerminalRenderer`] or as JSON.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod label;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use label::{Label, LabelStyle};
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
