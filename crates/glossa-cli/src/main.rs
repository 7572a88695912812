//! `glossa`: inspect and exercise JSON localization resources from the shell.
//!
//! Resources are the JSON form of parsed message/term entries. `eval` formats
//! one message against them, `check` loads a set into one bundle and reports
//! what would fail at format time, and `coverage` lists message ids a
//! translation is missing relative to a source resource.

mod commands;
mod output;

use std::io;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{run_check, run_coverage, run_eval, CheckArgs, CoverageArgs, EvalArgs};
use miette::MietteHandlerOpts;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "glossa", version, about = "Format and lint glossa resource files")]
struct Cli {
    /// Colorize output: auto, always or never
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    color: ColorWhen,

    /// Log bundle activity at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorWhen {
    Auto,
    Always,
    Never,
}

impl ColorWhen {
    /// Forced color setting, or `None` to let owo-colors detect the terminal.
    fn forced(self) -> Option<bool> {
        match self {
            ColorWhen::Auto => None,
            ColorWhen::Always => Some(true),
            ColorWhen::Never => Some(false),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Report entry collisions and references that cannot resolve
    Check(CheckArgs),
    /// Compare message ids of translations against a source resource
    Coverage(CoverageArgs),
    /// Format one message (or `message.attribute`) with arguments
    Eval(EvalArgs),
}

impl Command {
    fn run(self) -> miette::Result<i32> {
        match self {
            Command::Check(args) => run_check(args),
            Command::Coverage(args) => run_coverage(args),
            Command::Eval(args) => run_eval(args),
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    if let Some(forced) = cli.color.forced() {
        owo_colors::set_override(forced);
    }
    init_tracing(cli.verbose);
    miette::set_hook(Box::new(|_| {
        Box::new(MietteHandlerOpts::new().unicode(true).context_lines(2).build())
    }))?;

    let code = cli.command.run().unwrap_or_else(|report| {
        eprintln!("{report:?}");
        exitcode::SOFTWARE
    });
    exit(code)
}
