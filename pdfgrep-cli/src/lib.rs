//! Pieces shared by the `pdfgrep` and `pdfcheck` binaries.

use pdfgrep::{SearchError, SearchResult};
use std::io;
use std::path::Path;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Exit status after Ctrl-C, as a shell reports SIGINT
pub const EXIT_INTERRUPTED: u8 = 130;
/// Exit status for errors that stop the run before or outside file scanning
pub const EXIT_FATAL: u8 = 2;

/// Name the program was invoked as, for prefixing error lines
pub fn app_name(default: &str) -> String {
    std::env::args_os()
        .next()
        .and_then(|arg0| {
            Path::new(&arg0)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| default.to_string())
}

/// Installs the Ctrl-C handler and returns the flag it sets.
///
/// The first Ctrl-C asks the run to stop at the next file or page boundary; a
/// second one exits on the spot.
pub fn interrupt_flag() -> SearchResult<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = flag.clone();
    ctrlc::set_handler(move || {
        if handler_flag.swap(true, Ordering::SeqCst) {
            std::process::exit(EXIT_INTERRUPTED.into());
        }
    })
    .map_err(|e| SearchError::config_error(format!("cannot install Ctrl-C handler: {}", e)))?;
    Ok(flag)
}

/// Exit status for the outcome of a run.
///
/// Per-file problems never get here; they were already printed and the run went on.
pub fn exit_status(result: &SearchResult<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(SearchError::Interrupted) => EXIT_INTERRUPTED,
        // Reader went away (e.g. `| head`)
        Err(SearchError::IoError(e)) if e.kind() == io::ErrorKind::BrokenPipe => 0,
        Err(_) => EXIT_FATAL,
    }
}

/// Maps the outcome of a run to the process exit status, printing fatal errors
pub fn exit_code(result: SearchResult<()>, app: &str) -> ExitCode {
    let status = exit_status(&result);
    match result {
        Err(SearchError::Interrupted) => tracing::debug!("Run interrupted"),
        Err(e) if status == EXIT_FATAL => eprintln!("{}: {}", app, e),
        _ => {}
    }
    ExitCode::from(status)
}

/// Terminal width in columns, or 80 when there is no terminal
pub fn terminal_columns() -> usize {
    crossterm::terminal::size()
        .map(|(columns, _)| usize::from(columns))
        .ok()
        .filter(|&columns| columns > 0)
        .unwrap_or(80)
}
