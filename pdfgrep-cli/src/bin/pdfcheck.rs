use clap::Parser;
use colored::Colorize;
use pdfgrep::check::check;
use pdfgrep::{logging, CliOverrides, SearchConfig, SearchResult};
use pdfgrep_cli::{app_name, exit_code, interrupt_flag, terminal_columns};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Check that files are PDFs with extractable text
#[derive(Parser)]
#[command(name = "pdfcheck", author, version, about, long_about = None)]
struct Cli {
    /// Read files under each directory, recursively
    #[arg(short, long)]
    recursive: bool,

    /// Additional YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error) [default: warn]
    #[arg(long)]
    log_level: Option<String>,

    /// Files or directories to check (default: entries of the current directory)
    paths: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let app = app_name("pdfcheck");
    exit_code(run(), &app)
}

fn run() -> SearchResult<()> {
    let cli = Cli::parse();
    let config = SearchConfig::load_from(cli.config.as_deref())?.merge_with_cli(CliOverrides {
        recursive: cli.recursive,
        log_level: cli.log_level,
        ..Default::default()
    });
    logging::init(&config.log_level);

    let interrupt = interrupt_flag()?;
    let columns = terminal_columns();
    let mut out = io::stdout().lock();

    check(cli.paths, config.recursive, interrupt, |status| {
        let label = if status.success {
            "  OK  ".green()
        } else {
            "FAILED".red()
        };
        writeln!(
            out,
            "{}{}{}{}{}",
            status.message,
            " ".repeat(status.padding(columns)),
            "[ ".bold(),
            label.bold(),
            " ]".bold()
        )?;
        Ok(())
    })?;

    out.flush()?;
    Ok(())
}
