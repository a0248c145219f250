use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use console::style;
use log::LevelFilter;

use matrix_builder::{MatrixBuilder, OsOrder, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "build-matrix")]
#[command(about = "Print the CI build matrix derived from the compatibility tables")]
#[command(version)]
struct Args {
    /// Output document format
    #[arg(long, value_enum, default_value_t = FormatArg::Yaml)]
    format: FormatArg,

    /// Order of OS groups in the output
    #[arg(long, value_enum, default_value_t = OsOrderArg::Lexicographic)]
    os_order: OsOrderArg,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long)]
    quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum FormatArg {
    Yaml,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Yaml => OutputFormat::Yaml,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OsOrderArg {
    Lexicographic,
    FirstSeen,
}

impl From<OsOrderArg> for OsOrder {
    fn from(arg: OsOrderArg) -> Self {
        match arg {
            OsOrderArg::Lexicographic => OsOrder::Lexicographic,
            OsOrderArg::FirstSeen => OsOrder::FirstSeen,
        }
    }
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn init_logging(level: LevelFilter) {
    // RUST_LOG, when set, overrides the flag-derived level
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run() -> Result<i32> {
    let args = Args::parse();
    init_logging(args.log_level());

    let matrix = MatrixBuilder::embedded()
        .context("Failed to load the embedded rule tables")?
        .with_os_order(args.os_order.into())
        .build()
        .context("Failed to build the matrix")?;

    let mut document = matrix
        .render(args.format.into())
        .context("Failed to serialize the matrix")?;
    if !document.ends_with('\n') {
        document.push('\n');
    }

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(document.as_bytes())
        .and_then(|_| stdout.flush())
        .context("Failed to write the matrix to stdout")?;

    Ok(0)
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            ExitCode::FAILURE
        }
    }
}
