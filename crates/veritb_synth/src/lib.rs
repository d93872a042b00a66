//! Testbench synthesis from a parsed module interface.
//!
//! [`render`] turns a [`ModuleInterface`] into the lines of a Verilog
//! testbench skeleton: pin declarations, the DUT instance, and optionally an
//! exhaustive truth-table stimulus and a `$monitor`. Rendering is a pure
//! function of its inputs; [`write_testbench`] streams the result into a
//! [`LineSink`].

#![warn(missing_docs)]

pub mod options;
pub mod sections;
pub mod sink;
pub mod stimulus;

pub use options::RenderOptions;
pub use sink::{LineSink, WriteSink};

use log::{debug, info};
use std::io;
use veritb_parser::ModuleInterface;

/// Renders the full testbench for `iface`.
///
/// The truth table is only emitted when requested, the interface has no
/// bus, array or bidirectional ports, and the driven-port count is within
/// [`RenderOptions::max_truth_table_inputs`].
pub fn render(iface: &ModuleInterface, options: &RenderOptions) -> Vec<String> {
    let mut out = Vec::new();
    sections::header(iface, options, &mut out);
    sections::pins(iface, &mut out);
    sections::dut(iface, &mut out);

    if options.truth_table {
        let inputs = iface.driven_ports().count();
        if iface.unsupported {
            info!("interface uses features the truth table cannot model; skipping it");
        } else if inputs > options.max_truth_table_inputs as usize {
            info!(
                "{inputs} inputs exceed the truth table limit of {}; skipping it",
                options.max_truth_table_inputs
            );
        } else {
            sections::truth_table(iface, options.delay, &mut out);
        }
    }
    if options.monitor {
        sections::monitor(iface, &mut out);
    }
    sections::footer(&mut out);

    debug!("rendered tb_{}: {} lines", iface.module_name, out.len());
    out
}

/// Renders the testbench and writes every line to `sink`.
pub fn write_testbench(
    iface: &ModuleInterface,
    options: &RenderOptions,
    sink: &mut impl LineSink,
) -> io::Result<()> {
    for line in render(iface, options) {
        sink.write_line(&line)?;
    }
    Ok(())
}
