//! `veritb ports`: show the interface the generator extracts from a file.

use std::fmt::Write as _;
use std::path::Path;

use serde_json::json;
use veritb_diagnostics::DiagnosticSink;
use veritb_parser::ModuleInterface;
use veritb_source::SourceDb;

use crate::error::GenerateError;
use crate::pipeline::{load_interface, render_diagnostics};
use crate::{GlobalArgs, PortsArgs, ReportFormat};

/// Runs the `veritb ports` command.
///
/// Returns exit code 0 if the interface was extracted, 1 if parsing failed.
pub fn run(args: &PortsArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let mut source_db = SourceDb::new();
    let sink = DiagnosticSink::new();
    let result = load_interface(Path::new(&args.input), &mut source_db, &sink);
    let interface = match result {
        Ok(iface) => Some(iface),
        Err(GenerateError::Parse(_)) => None,
        Err(e) => return Err(e.into()),
    };

    match args.format {
        ReportFormat::Text => {
            render_diagnostics(&sink, &source_db, global.color);
            if let Some(iface) = &interface {
                print!("{}", format_text(iface));
            }
        }
        ReportFormat::Json => {
            let report = json!({
                "interface": interface,
                "diagnostics": sink.take_all(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!(
            "   Result: {} error(s), {} warning(s)",
            sink.error_count(),
            sink.warning_count()
        );
    }

    Ok(if sink.has_errors() { 1 } else { 0 })
}

/// One line per port: direction, testbench storage, then the declaration.
pub fn format_text(iface: &ModuleInterface) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "module {}", iface.module_name);
    for port in &iface.ports {
        let mut line = format!("  {:<6} {:<4}", port.direction, port.role().storage_keyword());
        if let Some(width) = &port.width_spec {
            line.push(' ');
            line.push_str(width);
        }
        line.push(' ');
        line.push_str(&port.name);
        if let Some(array) = &port.array_spec {
            line.push(' ');
            line.push_str(array);
        }
        let _ = writeln!(out, "{line}");
    }
    let support = if iface.unsupported {
        "not supported"
    } else {
        "supported"
    };
    let _ = writeln!(out, "truth table: {support}");
    out
}
