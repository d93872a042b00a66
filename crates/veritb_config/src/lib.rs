//! Loading of the optional `veritb.toml` settings file.
//!
//! Every setting has a default, so a missing file is equivalent to an empty
//! one. Command-line flags are applied on top of the loaded [`ToolConfig`] by
//! the CLI.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{find_config, load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
