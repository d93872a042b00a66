//! Compiling and running a generated testbench with an external simulator.

use std::io;
use std::path::Path;
use std::process::Command;

use log::{debug, error, info};
use veritb_config::ToolchainConfig;

/// An external simulator that can build and run a testbench.
pub trait Toolchain {
    /// Compiles `testbench` into `binary`. `Ok(false)` means the compiler
    /// ran and reported failure.
    fn compile(&self, testbench: &Path, binary: &Path) -> io::Result<bool>;
    /// Runs a compiled `binary`, inheriting stdio.
    fn run(&self, binary: &Path) -> io::Result<bool>;
}

/// Icarus Verilog: `iverilog <tb> -o <bin>` then `vvp <bin>`.
pub struct Icarus {
    compiler: String,
    runner: String,
}

impl Icarus {
    /// Uses the program names from `[toolchain]`.
    pub fn new(config: &ToolchainConfig) -> Self {
        Self {
            compiler: config.compiler.clone(),
            runner: config.runner.clone(),
        }
    }

    fn compile_command(&self, testbench: &Path, binary: &Path) -> Command {
        let mut cmd = Command::new(&self.compiler);
        cmd.arg(testbench).arg("-o").arg(binary);
        cmd
    }

    fn run_command(&self, binary: &Path) -> Command {
        let mut cmd = Command::new(&self.runner);
        cmd.arg(binary);
        cmd
    }
}

impl Toolchain for Icarus {
    fn compile(&self, testbench: &Path, binary: &Path) -> io::Result<bool> {
        status(self.compile_command(testbench, binary))
    }

    fn run(&self, binary: &Path) -> io::Result<bool> {
        status(self.run_command(binary))
    }
}

fn status(mut cmd: Command) -> io::Result<bool> {
    debug!("running {cmd:?}");
    let status = cmd.status()?;
    debug!("{:?} exited with {status}", cmd.get_program());
    Ok(status.success())
}

/// Compiles then runs the testbench, logging each step.
///
/// Returns `true` if both steps succeeded. Failures are logged, not
/// returned.
pub fn compile_and_run(toolchain: &dyn Toolchain, testbench: &Path, binary: &Path) -> bool {
    info!("Compiling to {}...", binary.display());
    match toolchain.compile(testbench, binary) {
        Ok(true) => {}
        Ok(false) => {
            error!("compilation failed");
            return false;
        }
        Err(e) => {
            error!("cannot start compiler: {e}");
            return false;
        }
    }

    info!("Running the compiled binary...");
    match toolchain.run(binary) {
        Ok(true) => true,
        Ok(false) => {
            error!("simulation failed");
            false
        }
        Err(e) => {
            error!("cannot start simulator: {e}");
            false
        }
    }
}
