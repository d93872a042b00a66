//! The parsed view of a module: its name and ordered port list.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use veritb_source::Span;

/// Port direction keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// `input`
    Input,
    /// `output`
    Output,
    /// `inout` (bidirectional)
    Inout,
}

impl Direction {
    /// How the testbench stores a signal connected to a port of this
    /// direction.
    pub fn role(self) -> PortRole {
        match self {
            Direction::Input | Direction::Inout => PortRole::Driven,
            Direction::Output => PortRole::Observed,
        }
    }

    /// The Verilog keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            Direction::Input => "input",
            Direction::Output => "output",
            Direction::Inout => "inout",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.keyword())
    }
}

/// Storage used for a port's signal inside the testbench.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortRole {
    /// Driven by the testbench: declared `reg`.
    Driven,
    /// Driven by the DUT and only observed: declared `wire`.
    Observed,
}

impl PortRole {
    /// Declaration keyword in the testbench.
    pub fn storage_keyword(self) -> &'static str {
        match self {
            PortRole::Driven => "reg",
            PortRole::Observed => "wire",
        }
    }
}

/// One declared port.
///
/// Several descriptors come out of one declaration such as
/// `input [7:0] a, b;`, all sharing direction, width and array text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortDescriptor {
    /// Declared direction.
    pub direction: Direction,
    /// Raw range token before the names, e.g. `[3:0]`.
    pub width_spec: Option<String>,
    /// Port name with whitespace removed.
    pub name: String,
    /// Raw range token after the names, e.g. `[0:15]`.
    pub array_spec: Option<String>,
    /// Location of the name in the scanned text.
    pub span: Span,
}

impl PortDescriptor {
    /// Testbench storage role derived from the direction.
    pub fn role(&self) -> PortRole {
        self.direction.role()
    }

    /// Returns the feature of this port the truth-table generator cannot
    /// model, if any. Width is reported before array before direction.
    pub fn unsupported_feature(&self) -> Option<UnsupportedFeature> {
        if self.width_spec.is_some() {
            Some(UnsupportedFeature::BusWidth)
        } else if self.array_spec.is_some() {
            Some(UnsupportedFeature::Array)
        } else if self.direction == Direction::Inout {
            Some(UnsupportedFeature::Bidirectional)
        } else {
            None
        }
    }

    /// Returns `true` if the name is a plain Verilog identifier.
    pub fn has_identifier_name(&self) -> bool {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
            }
            _ => false,
        }
    }
}

/// Port features outside the single-bit model of the truth-table generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnsupportedFeature {
    /// A `[msb:lsb]` range before the name.
    BusWidth,
    /// An array dimension after the name.
    Array,
    /// An `inout` port.
    Bidirectional,
}

impl fmt::Display for UnsupportedFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedFeature::BusWidth => write!(f, "bus width"),
            UnsupportedFeature::Array => write!(f, "array dimension"),
            UnsupportedFeature::Bidirectional => write!(f, "bidirectional direction"),
        }
    }
}

/// A module name plus its ports in declaration order.
///
/// Built once by the parser and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInterface {
    /// Name of the module under test.
    pub module_name: String,
    /// Ports in declaration order.
    pub ports: Vec<PortDescriptor>,
    /// `true` if any port has a width, an array dimension, or is `inout`.
    pub unsupported: bool,
}

impl ModuleInterface {
    /// Builds an interface, rejecting ports declared under the same name.
    pub fn new(
        module_name: impl Into<String>,
        ports: Vec<PortDescriptor>,
    ) -> Result<Self, ParseError> {
        {
            let mut seen: HashMap<&str, Span> = HashMap::new();
            for port in &ports {
                if let Some(&first) = seen.get(port.name.as_str()) {
                    return Err(ParseError::DuplicatePort {
                        name: port.name.clone(),
                        first,
                        second: port.span,
                    });
                }
                seen.insert(&port.name, port.span);
            }
        }
        let unsupported = ports.iter().any(|p| p.unsupported_feature().is_some());
        Ok(Self {
            module_name: module_name.into(),
            ports,
            unsupported,
        })
    }

    /// Ports the testbench drives, in declaration order.
    pub fn driven_ports(&self) -> impl Iterator<Item = &PortDescriptor> {
        self.ports.iter().filter(|p| p.role() == PortRole::Driven)
    }

    /// Ports the testbench only observes, in declaration order.
    pub fn observed_ports(&self) -> impl Iterator<Item = &PortDescriptor> {
        self.ports.iter().filter(|p| p.role() == PortRole::Observed)
    }
}
