//! `pdfcheck`: tells which files are PDFs with text that can be searched.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

use crate::errors::{SearchError, SearchResult};
use crate::pdf::{ContentSniffer, LopdfExtractor, MagicSniffer, TextExtractor};
use crate::resolver::resolve;
use crate::search::load_pages;

/// Visible width of the `[  OK  ]` / `[FAILED]` block printed after each message
pub const STATUS_BLOCK_WIDTH: usize = 10;

/// Result of checking one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckStatus {
    pub path: PathBuf,
    pub message: String,
    pub success: bool,
}

impl CheckStatus {
    fn new(path: &Path, what: &str, success: bool) -> Self {
        Self {
            path: path.to_path_buf(),
            message: format!("{}: {}", path.display(), what),
            success,
        }
    }

    /// Spaces needed to push the status block to the right edge of `columns`
    pub fn padding(&self, columns: usize) -> usize {
        columns.saturating_sub(self.message.chars().count() + STATUS_BLOCK_WIDTH)
    }
}

/// Checks a single file
pub fn check_file<S, X>(path: &Path, sniffer: &S, extractor: &X) -> SearchResult<CheckStatus>
where
    S: ContentSniffer + ?Sized,
    X: TextExtractor + ?Sized,
{
    let status = match load_pages(path, sniffer, extractor) {
        Ok(pages) if pages.iter().any(|p| !p.text.trim().is_empty()) => {
            CheckStatus::new(path, "valid OCR PDF", true)
        }
        Ok(_) => CheckStatus::new(path, "No readable text content", false),
        Err(SearchError::NotFound(_)) => CheckStatus::new(path, "No such file or directory", false),
        Err(SearchError::NotAPdf(_)) => CheckStatus::new(path, "Not a pdf file", false),
        Err(SearchError::UnreadablePdf { .. }) => {
            CheckStatus::new(path, "Unable to read file", false)
        }
        Err(e) => return Err(e),
    };
    debug!("Checked {}: {}", path.display(), status.success);
    Ok(status)
}

/// Checks every file `paths` resolves to, in order, handing each status to `sink`
pub fn check<I, P, F>(
    paths: I,
    recursive: bool,
    interrupt: Arc<AtomicBool>,
    mut sink: F,
) -> SearchResult<usize>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
    F: FnMut(CheckStatus) -> SearchResult<()>,
{
    let mut checked = 0;
    for candidate in resolve(paths, recursive) {
        if interrupt.load(Ordering::SeqCst) {
            return Err(SearchError::Interrupted);
        }
        sink(check_file(&candidate.path, &MagicSniffer, &LopdfExtractor)?)?;
        checked += 1;
    }
    info!("Checked {} files", checked);
    Ok(checked)
}
