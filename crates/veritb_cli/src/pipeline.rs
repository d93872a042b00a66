//! Shared helpers for CLI commands: config resolution, default paths,
//! loading and parsing the input, and diagnostic rendering.

use std::path::{Path, PathBuf};

use log::debug;
use veritb_config::{find_config, load_config, ConfigError, ToolConfig};
use veritb_diagnostics::{DiagnosticRenderer, DiagnosticSink, TerminalRenderer};
use veritb_parser::{parse_interface, ModuleInterface};
use veritb_source::SourceDb;

use crate::error::GenerateError;
use crate::GlobalArgs;

/// Loads the configuration for `input`.
///
/// `--config` wins; otherwise `veritb.toml` next to the input is used if it
/// exists, and defaults apply when it does not.
pub fn resolve_config(global: &GlobalArgs, input: &Path) -> Result<ToolConfig, ConfigError> {
    let path = match &global.config {
        Some(path) => Some(PathBuf::from(path)),
        None => find_config(input_dir(input)),
    };
    match path {
        Some(path) => {
            debug!("loading configuration from {}", path.display());
            load_config(&path)
        }
        None => Ok(ToolConfig::default()),
    }
}

fn input_dir(input: &Path) -> &Path {
    match input.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// `<stem>_tb.<ext>` next to the input; `.v` when the input has no
/// extension.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let ext = input
        .extension()
        .map(|e| e.to_string_lossy())
        .unwrap_or("v".into());
    input.with_file_name(format!("{stem}_tb.{ext}"))
}

/// `<stem>.out` next to the input.
pub fn default_bin_path(input: &Path) -> PathBuf {
    input.with_extension("out")
}

/// Loads `input` into `source_db` and extracts its module interface.
///
/// Parse problems are emitted to `sink` as well as returned.
pub fn load_interface(
    input: &Path,
    source_db: &mut SourceDb,
    sink: &DiagnosticSink,
) -> Result<ModuleInterface, GenerateError> {
    let file = source_db
        .load_file(input)
        .map_err(|source| GenerateError::InputRead {
            path: input.to_path_buf(),
            source,
        })?;
    Ok(parse_interface(file, source_db, sink)?)
}

/// Renders all diagnostics from a sink to stderr using the terminal renderer.
///
/// Returns the number of diagnostics rendered.
pub fn render_diagnostics(sink: &DiagnosticSink, source_db: &SourceDb, color: bool) -> usize {
    let diagnostics = sink.diagnostics();
    let renderer = TerminalRenderer::new(color);
    for diag in &diagnostics {
        eprintln!("{}", renderer.render(diag, source_db));
    }
    diagnostics.len()
}
