//! Configuration types deserialized from `veritb.toml`.

use serde::Deserialize;

/// Comment written as the first line of every generated testbench.
pub const DEFAULT_BANNER: &str = "// A part of this file was autogenerated by veritb, \
     if you find any bug please open an issue on github";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    /// What to put in generated testbenches and which prompts to ask.
    #[serde(default)]
    pub generate: GenerateConfig,
    /// External simulator used to compile and run the testbench.
    #[serde(default)]
    pub toolchain: ToolchainConfig,
}

/// How a yes/no question is answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    /// Prompt on the terminal.
    #[default]
    Ask,
    /// Answer yes without prompting.
    Yes,
    /// Answer no without prompting.
    No,
}

/// `[generate]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    /// Whether to write the exhaustive truth-table stimulus.
    pub truth_table: Choice,
    /// Whether to write a `$monitor` block.
    pub monitor: Choice,
    /// Whether to compile and run the testbench afterwards.
    pub compile: Choice,
    /// Delay between truth-table combinations, in simulation time units.
    pub delay: u32,
    /// Inputs above this count disable the truth table (2^N lines).
    pub max_truth_table_inputs: u32,
    /// First line of the generated file.
    pub banner: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            truth_table: Choice::Ask,
            monitor: Choice::Ask,
            compile: Choice::Ask,
            delay: 10,
            max_truth_table_inputs: 16,
            banner: DEFAULT_BANNER.to_string(),
        }
    }
}

/// `[toolchain]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolchainConfig {
    /// Compiler invoked as `<compiler> <testbench> -o <binary>`.
    pub compiler: String,
    /// Runner invoked as `<runner> <binary>`.
    pub runner: String,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            compiler: "iverilog".to_string(),
            runner: "vvp".to_string(),
        }
    }
}
