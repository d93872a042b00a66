//! Errors raised while loading `veritb.toml`.

/// Failure to read, parse or validate a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The content is not valid TOML or does not match the schema.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A value is outside its allowed range.
    #[error("validation error: {0}")]
    ValidationError(String),
}
