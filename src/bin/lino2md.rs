//! Converts a Links Notation step report written by `visual-sorting --report`
//! into Markdown tables (steps and time per algorithm and size).
//!
//! Without an output path the Markdown goes to stdout. A one-line summary of
//! what was parsed is printed to stderr so it never mixes with the table.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{debug, error, LevelFilter};
use visual_sorting::lino_report::{parse_lino_report, StepReport};

#[derive(Parser, Debug)]
#[command(name = "lino2md", about = "Convert a step report to Markdown")]
struct Args {
    /// Links Notation report produced by `visual-sorting --benchmark --report`
    input: PathBuf,

    /// Write Markdown here instead of stdout
    output: Option<PathBuf>,

    /// Do not print the parse summary
    #[arg(long, short)]
    quiet: bool,
}

fn load(path: &Path) -> Result<StepReport, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    parse_lino_report(&content)
        .ok_or_else(|| format!("no results: section found in {}", path.display()))
}

fn run(args: &Args) -> Result<(), String> {
    let report = load(&args.input)?;
    debug!("{}: {}", args.input.display(), report.summary());

    if !args.quiet {
        eprintln!("Parsed {}", report.summary());
    }

    match &args.output {
        Some(path) => {
            report
                .save_markdown(path)
                .map_err(|e| format!("cannot write {}: {}", path.display(), e))?;
            if !args.quiet {
                eprintln!("Markdown written to {}", path.display());
            }
        }
        None => print!("{}", report.to_markdown_table()),
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    match run(&Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{}", message);
            ExitCode::FAILURE
        }
    }
}
