//! Log output for the `veritb` binary.
//!
//! Library crates log through the `log` facade; this installs the
//! `env_logger` backend with a `[LEVEL]: message` format.

use std::io::Write;

use env_logger::{Builder, Env};
use log::LevelFilter;

use crate::GlobalArgs;

/// Picks the default level from `--quiet`/`--verbose`.
pub fn default_level(global: &GlobalArgs) -> LevelFilter {
    if global.quiet {
        LevelFilter::Error
    } else if global.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Installs the global logger. `RUST_LOG` takes precedence over the flags.
pub fn init(global: &GlobalArgs) {
    let level = default_level(global).to_string().to_lowercase();
    let _ = Builder::from_env(Env::default().default_filter_or(level))
        .format(|buf, record| writeln!(buf, "[{}]: {}", record.level(), record.args()))
        .try_init();
}
