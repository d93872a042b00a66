//! Failures of `veritb gen`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use veritb_config::ConfigError;
use veritb_parser::ParseError;

/// Errors that stop testbench generation. All of them are fatal.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The input file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    InputRead {
        /// Input path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The module interface could not be extracted.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The testbench could not be written.
    #[error("cannot write {}: {source}", path.display())]
    OutputWrite {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// `veritb.toml` is unreadable or invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Reading an answer from the terminal failed.
    #[error("cannot read answer: {0}")]
    Prompt(#[source] io::Error),
}
