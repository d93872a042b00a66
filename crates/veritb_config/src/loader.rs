//! Locating, parsing and validating `veritb.toml`.

use crate::error::ConfigError;
use crate::types::ToolConfig;
use std::path::{Path, PathBuf};

/// Name of the settings file looked up next to the input source.
pub const CONFIG_FILE_NAME: &str = "veritb.toml";

/// Upper bound for `max_truth_table_inputs`.
const TRUTH_TABLE_INPUT_CEILING: u32 = 24;

/// Returns `<dir>/veritb.toml` if it exists.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    path.is_file().then_some(path)
}

/// Reads and validates a configuration file.
pub fn load_config(path: &Path) -> Result<ToolConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates configuration text.
pub fn load_config_from_str(content: &str) -> Result<ToolConfig, ConfigError> {
    let config: ToolConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &ToolConfig) -> Result<(), ConfigError> {
    let generate = &config.generate;
    if generate.delay == 0 {
        return Err(ConfigError::ValidationError(
            "generate.delay must be at least 1".to_string(),
        ));
    }
    if !(1..=TRUTH_TABLE_INPUT_CEILING).contains(&generate.max_truth_table_inputs) {
        return Err(ConfigError::ValidationError(format!(
            "generate.max_truth_table_inputs must be between 1 and {TRUTH_TABLE_INPUT_CEILING}"
        )));
    }
    if config.toolchain.compiler.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "toolchain.compiler must not be empty".to_string(),
        ));
    }
    if config.toolchain.runner.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "toolchain.runner must not be empty".to_string(),
        ));
    }
    Ok(())
}
