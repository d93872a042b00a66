//! veritb: testbench skeletons for Verilog modules.
//!
//! Provides `veritb gen` to write a testbench next to a module (optionally
//! compiling and running it with Icarus Verilog) and `veritb ports` to show
//! the interface the generator sees.

#![warn(missing_docs)]

mod error;
mod generate;
mod logging;
mod pipeline;
mod ports;
mod prompt;
mod toolchain;

use std::io::IsTerminal;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use veritb_config::Choice;

/// veritb: generate Verilog testbench skeletons.
#[derive(Parser, Debug)]
#[command(name = "veritb", version, about = "Verilog testbench generator")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `veritb.toml` to use instead of the one next to the input.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a testbench for the module in a Verilog file.
    Gen(GenArgs),
    /// Print the module name and ports found in a Verilog file.
    Ports(PortsArgs),
}

/// Arguments for the `veritb gen` subcommand.
#[derive(Parser, Debug)]
pub struct GenArgs {
    /// Verilog file containing the module under test.
    pub input: String,

    /// Testbench path (default: `<stem>_tb.<ext>` next to the input).
    pub output: Option<String>,

    /// Compiled simulation binary path (default: `<stem>.out`).
    #[arg(long)]
    pub bin: Option<String>,

    /// Answer yes to every question.
    #[arg(short, long)]
    pub yes: bool,

    /// Whether to write the truth-table stimulus.
    #[arg(long, value_enum)]
    pub truth_table: Option<Answer>,

    /// Whether to write a `$monitor` block.
    #[arg(long, value_enum)]
    pub monitor: Option<Answer>,

    /// Whether to compile and run the testbench.
    #[arg(long, value_enum)]
    pub compile: Option<Answer>,
}

/// Arguments for the `veritb ports` subcommand.
#[derive(Parser, Debug)]
pub struct PortsArgs {
    /// Verilog file containing the module.
    pub input: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Answer to one of the generator's questions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Answer {
    /// Prompt on the terminal.
    Ask,
    /// Yes, without prompting.
    Yes,
    /// No, without prompting.
    No,
}

impl From<Answer> for Choice {
    fn from(answer: Answer) -> Self {
        match answer {
            Answer::Ask => Choice::Ask,
            Answer::Yes => Choice::Yes,
            Answer::No => Choice::No,
        }
    }
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when stderr is a terminal.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Output format for `veritb ports`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };
    logging::init(&global);

    let result = match cli.command {
        Command::Gen(ref args) => generate::run(args, &global),
        Command::Ports(ref args) => ports::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
