//! Sapling REPL and script runner
//!
//! ```text
//! sapling [--trace] [FILE [ARGS...]]
//! ```
//!
//! With a file, binds `*ARGV*` to the remaining arguments and loads it.
//! Without one, reads lines at a `user> ` prompt until Ctrl-C or Ctrl-D.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use sapling::{EvalContext, EvalError, Interpreter, Value};
use tracing_subscriber::EnvFilter;

/// Command-line options.
#[derive(Debug, Parser)]
#[command(name = "sapling", version, about = "A small Lisp interpreter")]
struct Cli {
    /// Log every evaluation step (overrides RUST_LOG for sapling)
    #[arg(long)]
    trace: bool,

    /// Script to load instead of starting the prompt
    file: Option<PathBuf>,

    /// Arguments bound to *ARGV* for the script
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.trace);

    let mut interp = Interpreter::with_context(EvalContext::new().with_trace(cli.trace));

    let outcome = match &cli.file {
        Some(file) => run_file(&mut interp, file, &cli.args),
        None => run_repl(&mut interp),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(trace: bool) {
    let filter = if trace {
        EnvFilter::new("sapling=trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Bind `*ARGV*` and evaluate `(load-file FILE)`.
fn run_file(interp: &mut Interpreter, file: &Path, args: &[String]) -> Result<()> {
    let argv = Value::list(args.iter().map(Value::string).collect());
    interp.define("*ARGV*", argv).map_err(describe)?;

    let path = file.to_string_lossy();
    let call = Value::list(vec![Value::symbol("load-file"), Value::string(path)]);
    let root = interp.root();
    interp
        .eval(call, root)
        .map_err(describe)
        .with_context(|| format!("while loading {}", file.display()))?;
    Ok(())
}

fn run_repl(interp: &mut Interpreter) -> Result<()> {
    interp
        .define("*ARGV*", Value::empty_list())
        .map_err(describe)?;
    let mut editor = DefaultEditor::new().context("could not initialise line editor")?;

    loop {
        match editor.readline("user> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());

                match interp.rep(&line) {
                    Ok(output) => println!("{}", output),
                    Err(err) => println!("Error: {}", describe(err)),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err).context("reading input"),
        }
    }

    Ok(())
}

/// Carry an evaluation error into `anyhow` by its message (thrown values
/// render readably).
fn describe(err: EvalError) -> anyhow::Error {
    anyhow::anyhow!("{}", err)
}
