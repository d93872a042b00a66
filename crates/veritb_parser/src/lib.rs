//! Port-declaration extraction for Verilog modules.
//!
//! This crate does not parse Verilog. It reads just enough of a source file
//! to recover the module name and the ordered port list a testbench needs.
//! The main entry point is [`parse_interface`], which works on a file held
//! by a [`SourceDb`] and reports problems to a [`DiagnosticSink`].
//!
//! # Architecture
//!
//! - **Normalize** ([`normalize`]): strips comments and collapses layout.
//! - **Lexer** ([`lexer`]): words, ranges, strings and separators.
//! - **Parser** ([`parser`]): a scanner that matches `module <name>` and
//!   `input|output|inout` declarations and skips everything else.
//! - **AST** ([`ast`]): [`PortDescriptor`] and [`ModuleInterface`].

#![warn(missing_docs)]

/// Module interface types.
pub mod ast;
/// Parse errors and diagnostic codes.
pub mod error;
/// Tokenizer for normalized text.
pub mod lexer;
/// Comment stripping and whitespace collapsing.
pub mod normalize;
/// Declaration scanner.
pub mod parser;
/// Token types.
pub mod token;

pub use ast::{Direction, ModuleInterface, PortDescriptor, PortRole, UnsupportedFeature};
pub use error::ParseError;
pub use normalize::{normalize, normalize_mapped, Normalized};
pub use parser::{extract_module_name, extract_ports, PortDecl, PortParser};

use log::{debug, info};
use veritb_diagnostics::DiagnosticSink;
use veritb_source::{FileId, SourceDb};

/// Reads the module interface out of a loaded file.
///
/// The normalized text is registered in `source_db` as a file derived from
/// `file`; every span in the result and in emitted diagnostics points into
/// it, and [`SourceDb::resolve_span`] maps those spans back to positions in
/// `file`. Fatal problems are emitted as errors and returned; ports the
/// truth-table generator cannot model and odd-looking names are emitted as
/// warnings.
pub fn parse_interface(
    file: FileId,
    source_db: &mut SourceDb,
    sink: &DiagnosticSink,
) -> Result<ModuleInterface, ParseError> {
    let normalized = normalize_mapped(&source_db.get_file(file).content);
    let derived = source_db.add_derived(file, normalized.text, normalized.origins);
    let text = &source_db.get_file(derived).content;

    let result = scan(text, derived);
    match &result {
        Ok(interface) => report_warnings(interface, sink),
        Err(err) => sink.emit(err.to_diagnostic()),
    }
    result
}

fn scan(text: &str, file: FileId) -> Result<ModuleInterface, ParseError> {
    let mut parser = PortParser::new(text, file);
    let (module_name, _) = parser.module_name()?;
    let ports = parser
        .port_declarations()?
        .into_iter()
        .flat_map(PortDecl::into_descriptors)
        .collect::<Vec<_>>();
    debug!("module `{module_name}`: {} port(s)", ports.len());
    ModuleInterface::new(module_name, ports)
}

fn report_warnings(interface: &ModuleInterface, sink: &DiagnosticSink) {
    for port in &interface.ports {
        if let Some(feature) = port.unsupported_feature() {
            info!(
                "port `{}` has a {feature}; truth table is not supported",
                port.name
            );
            sink.emit(error::unsupported_port(port, feature));
        }
        if !port.has_identifier_name() {
            sink.emit(error::suspicious_name(port));
        }
    }
}
