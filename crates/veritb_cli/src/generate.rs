//! `veritb gen`: write a testbench skeleton for a module.
//!
//! 1. Resolve `veritb.toml` and apply command-line answers on top
//! 2. Load and parse the input
//! 3. Ask for the truth table (supported interfaces only) and the monitor
//! 4. Render and write the testbench
//! 5. Offer to compile and run it (supported interfaces only)

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use log::{debug, info};
use veritb_config::{Choice, ToolConfig};
use veritb_diagnostics::DiagnosticSink;
use veritb_parser::ModuleInterface;
use veritb_source::SourceDb;
use veritb_synth::{write_testbench, RenderOptions, WriteSink};

use crate::error::GenerateError;
use crate::pipeline::{
    default_bin_path, default_output_path, load_interface, render_diagnostics, resolve_config,
};
use crate::prompt::{decide, Confirm, StdinConfirm};
use crate::toolchain::{compile_and_run, Icarus, Toolchain};
use crate::{Answer, GenArgs, GlobalArgs};

/// What a generation run did.
#[derive(Debug)]
pub struct GenerateReport {
    /// Where the testbench was written.
    pub output: PathBuf,
    /// Whether the truth table was included.
    pub truth_table: bool,
    /// Whether the monitor was included.
    pub monitor: bool,
    /// `None` if compilation was not attempted.
    pub simulated: Option<bool>,
}

/// Runs the `veritb gen` command.
///
/// Returns exit code 0 once the testbench is written, 1 if the input could
/// not be parsed. The outcome of compiling and running does not affect the
/// exit code.
pub fn run(args: &GenArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = resolve_config(global, Path::new(&args.input)).map_err(GenerateError::from)?;
    let toolchain = Icarus::new(&config.toolchain);

    let mut source_db = SourceDb::new();
    let sink = DiagnosticSink::new();
    let result = generate(
        args,
        &config,
        &mut source_db,
        &sink,
        &mut StdinConfirm,
        &toolchain,
    );
    render_diagnostics(&sink, &source_db, global.color);

    match result {
        Ok(report) => {
            debug!(
                "truth table: {}, monitor: {}, simulated: {:?}",
                report.truth_table, report.monitor, report.simulated
            );
            if !global.quiet {
                eprintln!("   Finished {}", report.output.display());
            }
            Ok(0)
        }
        Err(GenerateError::Parse(_)) => Ok(1),
        Err(e) => Err(e.into()),
    }
}

/// Generates the testbench described by `args`.
pub fn generate(
    args: &GenArgs,
    config: &ToolConfig,
    source_db: &mut SourceDb,
    sink: &DiagnosticSink,
    confirm: &mut dyn Confirm,
    toolchain: &dyn Toolchain,
) -> Result<GenerateReport, GenerateError> {
    let input = Path::new(&args.input);
    let output = match &args.output {
        Some(path) => PathBuf::from(path),
        None => {
            let path = default_output_path(input);
            info!("Writing to {}", path.display());
            path
        }
    };
    let binary = args
        .bin
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| default_bin_path(input));

    info!("Parsing {}...", input.display());
    let iface = load_interface(input, source_db, sink)?;

    let settings = &config.generate;
    let truth_table = if truth_table_allowed(&iface, settings.max_truth_table_inputs) {
        let choice = effective(args.truth_table, args.yes, settings.truth_table);
        let answer = ask(choice, "Do you need a truth table test?", confirm)?;
        if !answer {
            info!("Skipping the truth table");
        }
        answer
    } else {
        false
    };

    let choice = effective(args.monitor, args.yes, settings.monitor);
    let monitor = ask(choice, "Do you need a monitor?", confirm)?;
    if !monitor {
        info!("Skipping the monitor");
    }

    let options = RenderOptions::new(args.input.clone(), settings.banner.clone())
        .with_truth_table(truth_table)
        .with_monitor(monitor)
        .with_delay(settings.delay)
        .with_max_truth_table_inputs(settings.max_truth_table_inputs);
    write_file(&iface, &options, &output)?;

    let simulated = if iface.unsupported {
        None
    } else {
        let choice = effective(args.compile, args.yes, settings.compile);
        let question = format!("Compile and run the testbench with {}?", config.toolchain.compiler);
        if ask(choice, &question, confirm)? {
            Some(compile_and_run(toolchain, &output, &binary))
        } else {
            info!("Skipping compilation");
            None
        }
    };

    Ok(GenerateReport {
        output,
        truth_table,
        monitor,
        simulated,
    })
}

/// Per-question flag, then `--yes`, then the config file.
fn effective(flag: Option<Answer>, yes: bool, configured: Choice) -> Choice {
    match flag {
        Some(answer) => answer.into(),
        None if yes => Choice::Yes,
        None => configured,
    }
}

fn ask(choice: Choice, question: &str, confirm: &mut dyn Confirm) -> Result<bool, GenerateError> {
    decide(choice, question, confirm).map_err(GenerateError::Prompt)
}

fn truth_table_allowed(iface: &ModuleInterface, max_inputs: u32) -> bool {
    if iface.unsupported {
        info!(
            "{} uses features the truth table generator does not support; write the stimulus by hand",
            iface.module_name
        );
        return false;
    }
    let inputs = iface.driven_ports().count();
    if inputs > max_inputs as usize {
        info!(
            "{} has {inputs} inputs, more than the truth table limit of {max_inputs}",
            iface.module_name
        );
        return false;
    }
    true
}

fn write_file(
    iface: &ModuleInterface,
    options: &RenderOptions,
    output: &Path,
) -> Result<(), GenerateError> {
    let wrap = |source| GenerateError::OutputWrite {
        path: output.to_path_buf(),
        source,
    };
    let file = File::create(output).map_err(wrap)?;
    let mut sink = WriteSink::new(BufWriter::new(file));
    write_testbench(iface, options, &mut sink).map_err(wrap)?;
    sink.into_inner().map_err(wrap)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::fs;
    use std::io;
    use tempfile::TempDir;

    const AND2: &str = "// and gate\nmodule g(input a, input b, output y);\n  assign y = a & b;\nendmodule\n";
    const ADDER: &str =
        "module adder(input [3:0] a, input [3:0] b, output [4:0] sum);\nendmodule\n";

    /// Replays canned answers and records the questions.
    struct Scripted {
        answers: VecDeque<bool>,
        asked: Vec<String>,
    }

    impl Scripted {
        fn new(answers: &[bool]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                asked: Vec::new(),
            }
        }
    }

    impl Confirm for Scripted {
        fn confirm(&mut self, question: &str) -> io::Result<bool> {
            self.asked.push(question.to_string());
            self.answers
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more answers"))
        }
    }

    #[derive(Default)]
    struct FakeToolchain {
        calls: RefCell<Vec<String>>,
        compile_ok: bool,
    }

    impl Toolchain for FakeToolchain {
        fn compile(&self, testbench: &Path, binary: &Path) -> io::Result<bool> {
            self.calls.borrow_mut().push(format!(
                "compile {} {}",
                testbench.display(),
                binary.display()
            ));
            Ok(self.compile_ok)
        }

        fn run(&self, binary: &Path) -> io::Result<bool> {
            self.calls
                .borrow_mut()
                .push(format!("run {}", binary.display()));
            Ok(true)
        }
    }

    fn args(input: &Path) -> GenArgs {
        GenArgs {
            input: input.display().to_string(),
            output: None,
            bin: None,
            yes: false,
            truth_table: None,
            monitor: None,
            compile: None,
        }
    }

    fn write_input(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn run_gen(
        args: &GenArgs,
        config: &ToolConfig,
        confirm: &mut Scripted,
        toolchain: &FakeToolchain,
    ) -> Result<GenerateReport, GenerateError> {
        let mut db = SourceDb::new();
        let sink = DiagnosticSink::new();
        generate(args, config, &mut db, &sink, confirm, toolchain)
    }

    #[test]
    fn prompts_in_order_and_writes_default_path() {
        let tmp = TempDir::new().unwrap();
        let input = write_input(&tmp, "g.v", AND2);
        let mut confirm = Scripted::new(&[true, true, false]);
        let toolchain = FakeToolchain::default();

        let report = run_gen(&args(&input), &ToolConfig::default(), &mut confirm, &toolchain).unwrap();

        assert_eq!(
            confirm.asked,
            vec![
                "Do you need a truth table test?",
                "Do you need a monitor?",
                "Compile and run the testbench with iverilog?",
            ]
        );
        assert_eq!(report.output, tmp.path().join("g_tb.v"));
        assert!(report.truth_table);
        assert!(report.monitor);
        assert_eq!(report.simulated, None);
        assert!(toolchain.calls.borrow().is_empty());

        let text = fs::read_to_string(&report.output).unwrap();
        assert!(text.contains(&format!("`include \"{}\"\n", input.display())));
        assert!(text.contains("module tb_g;\n"));
        assert!(text.contains("#10 a = 1; b = 1;\n"));
        assert!(text.contains("$monitor(\"simtime = %g, \\ta = %b, \\tb = %b, \\ty = %b, \", $time, a, b, y);\n"));
        assert!(text.ends_with("\nendmodule\n"));
    }

    #[test]
    fn unsupported_interface_skips_truth_table_and_compile_prompts() {
        let tmp = TempDir::new().unwrap();
        let input = write_input(&tmp, "adder.v", ADDER);
        let mut confirm = Scripted::new(&[false]);
        let toolchain = FakeToolchain::default();

        let report = run_gen(&args(&input), &ToolConfig::default(), &mut confirm, &toolchain).unwrap();

        assert_eq!(confirm.asked, vec!["Do you need a monitor?"]);
        assert!(!report.truth_table);
        let text = fs::read_to_string(&report.output).unwrap();
        assert!(text.contains("reg [3:0] a;\n"));
        assert!(!text.contains("// Truth table"));
    }

    #[test]
    fn yes_flag_answers_everything_and_compiles() {
        let tmp = TempDir::new().unwrap();
        let input = write_input(&tmp, "g.v", AND2);
        let mut gen_args = args(&input);
        gen_args.yes = true;
        gen_args.bin = Some(tmp.path().join("build.out").display().to_string());
        let mut confirm = Scripted::new(&[]);
        let toolchain = FakeToolchain {
            compile_ok: true,
            ..Default::default()
        };

        let report = run_gen(&gen_args, &ToolConfig::default(), &mut confirm, &toolchain).unwrap();

        assert!(confirm.asked.is_empty());
        assert_eq!(report.simulated, Some(true));
        let calls = toolchain.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].starts_with("compile "));
        assert!(calls[0].ends_with("build.out"));
        assert!(calls[1].starts_with("run "));
    }

    #[test]
    fn failed_compile_does_not_run_or_fail() {
        let tmp = TempDir::new().unwrap();
        let input = write_input(&tmp, "g.v", AND2);
        let mut gen_args = args(&input);
        gen_args.yes = true;
        let mut confirm = Scripted::new(&[]);
        let toolchain = FakeToolchain::default();

        let report = run_gen(&gen_args, &ToolConfig::default(), &mut confirm, &toolchain).unwrap();

        assert_eq!(report.simulated, Some(false));
        assert_eq!(toolchain.calls.borrow().len(), 1);
        assert!(report.output.exists());
    }

    #[test]
    fn per_question_flag_beats_yes() {
        let tmp = TempDir::new().unwrap();
        let input = write_input(&tmp, "g.v", AND2);
        let mut gen_args = args(&input);
        gen_args.yes = true;
        gen_args.monitor = Some(Answer::No);
        gen_args.compile = Some(Answer::No);
        let mut confirm = Scripted::new(&[]);
        let toolchain = FakeToolchain::default();

        let report = run_gen(&gen_args, &ToolConfig::default(), &mut confirm, &toolchain).unwrap();

        assert!(report.truth_table);
        assert!(!report.monitor);
        assert_eq!(report.simulated, None);
    }

    #[test]
    fn config_answers_and_delay_apply() {
        let tmp = TempDir::new().unwrap();
        let input = write_input(&tmp, "g.v", AND2);
        let mut config = ToolConfig::default();
        config.generate.truth_table = Choice::Yes;
        config.generate.monitor = Choice::No;
        config.generate.compile = Choice::No;
        config.generate.delay = 5;
        config.generate.banner = "// custom".to_string();
        let mut confirm = Scripted::new(&[]);
        let toolchain = FakeToolchain::default();

        let report = run_gen(&args(&input), &config, &mut confirm, &toolchain).unwrap();

        let text = fs::read_to_string(&report.output).unwrap();
        assert!(text.starts_with("// custom\n"));
        assert!(text.contains("#5 a = 0; b = 1;\n"));
        assert!(!text.contains("$monitor"));
    }

    #[test]
    fn input_cap_disables_truth_table() {
        let tmp = TempDir::new().unwrap();
        let input = write_input(&tmp, "g.v", AND2);
        let mut config = ToolConfig::default();
        config.generate.max_truth_table_inputs = 1;
        let mut confirm = Scripted::new(&[false, false]);
        let toolchain = FakeToolchain::default();

        let report = run_gen(&args(&input), &config, &mut confirm, &toolchain).unwrap();

        assert!(!report.truth_table);
        assert_eq!(confirm.asked[0], "Do you need a monitor?");
    }

    #[test]
    fn explicit_output_path() {
        let tmp = TempDir::new().unwrap();
        let input = write_input(&tmp, "g.v", AND2);
        let mut gen_args = args(&input);
        let out = tmp.path().join("custom_tb.v");
        gen_args.output = Some(out.display().to_string());
        gen_args.yes = true;
        gen_args.compile = Some(Answer::No);
        let mut confirm = Scripted::new(&[]);
        let toolchain = FakeToolchain::default();

        let report = run_gen(&gen_args, &ToolConfig::default(), &mut confirm, &toolchain).unwrap();

        assert_eq!(report.output, out);
        assert!(out.exists());
        assert!(!tmp.path().join("g_tb.v").exists());
    }

    #[test]
    fn missing_input_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let mut confirm = Scripted::new(&[]);
        let toolchain = FakeToolchain::default();
        let err = run_gen(
            &args(&tmp.path().join("missing.v")),
            &ToolConfig::default(),
            &mut confirm,
            &toolchain,
        )
        .unwrap_err();
        assert!(matches!(err, GenerateError::InputRead { .. }));
    }

    #[test]
    fn parse_error_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let input = write_input(&tmp, "bad.v", "module m;\ninput ;\nendmodule\n");
        let mut confirm = Scripted::new(&[]);
        let toolchain = FakeToolchain::default();
        let err = run_gen(&args(&input), &ToolConfig::default(), &mut confirm, &toolchain)
            .unwrap_err();
        assert!(matches!(err, GenerateError::Parse(_)));
        assert!(!tmp.path().join("bad_tb.v").exists());
        assert!(confirm.asked.is_empty());
    }

    #[test]
    fn unwritable_output_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let input = write_input(&tmp, "g.v", AND2);
        let mut gen_args = args(&input);
        gen_args.output = Some(tmp.path().join("no/such/dir/g_tb.v").display().to_string());
        gen_args.yes = true;
        let mut confirm = Scripted::new(&[]);
        let toolchain = FakeToolchain::default();
        let err = run_gen(&gen_args, &ToolConfig::default(), &mut confirm, &toolchain)
            .unwrap_err();
        assert!(matches!(err, GenerateError::OutputWrite { .. }));
    }

    #[test]
    fn failed_prompt_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let input = write_input(&tmp, "g.v", AND2);
        let mut confirm = Scripted::new(&[]);
        let toolchain = FakeToolchain::default();
        let err = run_gen(&args(&input), &ToolConfig::default(), &mut confirm, &toolchain)
            .unwrap_err();
        assert!(matches!(err, GenerateError::Prompt(_)));
    }

    #[test]
    fn effective_precedence() {
        assert_eq!(effective(Some(Answer::No), true, Choice::Yes), Choice::No);
        assert_eq!(effective(None, true, Choice::No), Choice::Yes);
        assert_eq!(effective(None, false, Choice::No), Choice::No);
        assert_eq!(effective(Some(Answer::Ask), false, Choice::Yes), Choice::Ask);
    }
}
