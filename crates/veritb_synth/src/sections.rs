//! The six sections of a generated testbench, in output order.
//!
//! Each function appends complete lines to `out`, including the blank line
//! that closes its section.

use crate::options::RenderOptions;
use crate::stimulus::Combinations;
use veritb_parser::{ModuleInterface, PortDescriptor};

/// Banner, include directive and testbench module line.
pub fn header(iface: &ModuleInterface, options: &RenderOptions, out: &mut Vec<String>) {
    out.push(options.banner.clone());
    out.push(format!("`include \"{}\"", options.include_path));
    out.push(format!("module tb_{};", iface.module_name));
    out.push(String::new());
}

/// One `reg`/`wire` declaration per port.
pub fn pins(iface: &ModuleInterface, out: &mut Vec<String>) {
    out.push("// Pins".to_string());
    out.extend(iface.ports.iter().map(pin_declaration));
    out.push(String::new());
}

fn pin_declaration(port: &PortDescriptor) -> String {
    let mut parts: Vec<&str> = vec![port.role().storage_keyword()];
    if let Some(width) = &port.width_spec {
        parts.push(width.as_str());
    }
    parts.push(port.name.as_str());
    if let Some(array) = &port.array_spec {
        parts.push(array.as_str());
    }
    format!("{};", parts.join(" "))
}

/// Instantiation of the module under test with named connections.
pub fn dut(iface: &ModuleInterface, out: &mut Vec<String>) {
    let connections = iface
        .ports
        .iter()
        .map(|p| format!(".{0}({0})", p.name))
        .collect::<Vec<_>>()
        .join(", ");
    out.push(format!("{} dut({connections});", iface.module_name));
    out.push(String::new());
}

/// Exhaustive stimulus over every driven port.
///
/// Starts from the all-zero assignment, then steps through the remaining
/// combinations with the first driven port as the most significant bit.
pub fn truth_table(iface: &ModuleInterface, delay: u32, out: &mut Vec<String>) {
    let inputs: Vec<&str> = iface.driven_ports().map(|p| p.name.as_str()).collect();

    out.push("// Truth table".to_string());
    out.push("initial begin".to_string());
    out.push(assignments(&inputs, &vec![0; inputs.len()]));
    let width = u32::try_from(inputs.len()).unwrap_or(u32::MAX);
    for combo in Combinations::new(width) {
        out.push(format!("#{delay} {}", assignments(&inputs, &combo)));
    }
    out.push("end".to_string());
    out.push(String::new());
}

fn assignments(inputs: &[&str], values: &[u8]) -> String {
    inputs
        .iter()
        .zip(values)
        .map(|(name, value)| format!("{name} = {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `$monitor` over every port, in declaration order.
pub fn monitor(iface: &ModuleInterface, out: &mut Vec<String>) {
    let mut format = String::from("simtime = %g, ");
    let mut args = String::from("$time");
    for port in &iface.ports {
        format.push_str(&format!("\\t{} = %b, ", port.name));
        args.push_str(&format!(", {}", port.name));
    }
    out.push("initial begin".to_string());
    out.push(format!("$monitor(\"{format}\", {args});"));
    out.push("end".to_string());
    out.push(String::new());
}

/// Closes the testbench module.
pub fn footer(out: &mut Vec<String>) {
    out.push(String::new());
    out.push("endmodule".to_string());
}
