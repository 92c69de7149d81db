use clap::Parser;
use pdfgrep::{logging, search, CliOverrides, SearchConfig, SearchEvent, SearchResult};
use pdfgrep_cli::{app_name, exit_code, interrupt_flag};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Search for a regular expression in the text of PDF files
#[derive(Parser)]
#[command(name = "pdfgrep", author, version, about, long_about = None)]
struct Cli {
    /// Ignore case
    #[arg(short, long)]
    ignore_case: bool,

    /// Read files under each directory, recursively
    #[arg(short, long)]
    recursive: bool,

    /// List files matching pattern
    #[arg(short, long)]
    list_files: bool,

    /// Color the matched string
    #[arg(short = 'c', long = "color", visible_alias = "colour")]
    color: bool,

    /// Display page and line numbers
    #[arg(short = 'n', long = "num")]
    num: bool,

    /// Suppress error messages about unreadable or non-PDF files
    #[arg(short, long)]
    quiet: bool,

    /// Additional YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error) [default: warn]
    #[arg(long)]
    log_level: Option<String>,

    /// Regular expression to search for
    pattern: String,

    /// Files or directories to search (default: entries of the current directory)
    paths: Vec<PathBuf>,
}

impl Cli {
    fn flags(&self) -> CliOverrides {
        CliOverrides {
            ignore_case: self.ignore_case,
            recursive: self.recursive,
            list_files: self.list_files,
            line_numbers: self.num,
            color: self.color,
            quiet: self.quiet,
            log_level: self.log_level.clone(),
        }
    }
}

fn main() -> ExitCode {
    let app = app_name("pdfgrep");
    exit_code(run(&app), &app)
}

fn run(app: &str) -> SearchResult<()> {
    let cli = Cli::parse();
    let config = SearchConfig::load_from(cli.config.as_deref())?.merge_with_cli(cli.flags());
    logging::init(&config.log_level);

    let interrupt = interrupt_flag()?;
    let request = config.request(cli.pattern);
    let mut out = io::stdout().lock();

    search(&request, cli.paths, interrupt, |event| {
        match event {
            SearchEvent::Report(report) => writeln!(out, "{}", report)?,
            SearchEvent::Error(e) => {
                if !request.suppress_errors {
                    eprintln!("{}: {}", app, e);
                }
            }
        }
        Ok(())
    })?;

    out.flush()?;
    Ok(())
}
