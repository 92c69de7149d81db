/// File-by-file search over PDFs.
///
/// The pipeline is strictly sequential:
///
/// 1. [`crate::resolver`] turns the input paths into candidates, lazily and depth first
/// 2. [`MatchEngine::scan`] validates one candidate and extracts its pages
/// 3. the returned [`FileMatches`] walks pages and lines in order, producing reports
///
/// [`search`] drives all three and hands every report or per-file error to a sink
/// callback as soon as it exists, so nothing is buffered beyond the file being scanned.
pub mod engine;
pub mod matcher;

pub use engine::{load_pages, FileMatches, MatchEngine};
pub use matcher::PatternMatcher;

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::SearchRequest;
use crate::errors::{SearchError, SearchResult};
use crate::pdf::{ContentSniffer, TextExtractor};
use crate::resolver::{resolve, FileCandidate};
use crate::results::{MatchReport, SearchSummary};

/// Something the presentation layer has to show
#[derive(Debug)]
pub enum SearchEvent {
    Report(MatchReport),
    /// A file was skipped. Always delivered; hiding it is the caller's choice.
    Error(SearchError),
}

/// Searches `paths` for `request.pattern`.
///
/// Per-file errors are passed to `sink` and the run continues. The run stops with
/// `Err` when the pattern does not compile, when `sink` fails, or when `interrupt`
/// is set (`SearchError::Interrupted`, checked before each file and at page
/// boundaries).
pub fn search<I, P, F>(
    request: &SearchRequest,
    paths: I,
    interrupt: Arc<AtomicBool>,
    sink: F,
) -> SearchResult<SearchSummary>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
    F: FnMut(SearchEvent) -> SearchResult<()>,
{
    info!("Starting search with pattern: {}", request.pattern);
    let engine = MatchEngine::new(request.clone())?.with_interrupt(interrupt);
    run(&engine, resolve(paths, request.recursive), sink)
}

/// Feeds `candidates` through `engine` one at a time
pub fn run<S, X, I, F>(
    engine: &MatchEngine<S, X>,
    candidates: I,
    mut sink: F,
) -> SearchResult<SearchSummary>
where
    S: ContentSniffer,
    X: TextExtractor,
    I: IntoIterator<Item = FileCandidate>,
    F: FnMut(SearchEvent) -> SearchResult<()>,
{
    let mut summary = SearchSummary::new();

    for candidate in candidates {
        if engine.is_interrupted() {
            return Err(SearchError::Interrupted);
        }

        match engine.scan(&candidate) {
            Ok(reports) => {
                let mut count = 0;
                for report in reports {
                    count += 1;
                    sink(SearchEvent::Report(report))?;
                }
                if engine.is_interrupted() {
                    return Err(SearchError::Interrupted);
                }
                debug!("{} reports from {}", count, candidate.path.display());
                summary.record_file(count);
            }
            Err(e) if e.is_per_file() => {
                summary.record_failure();
                sink(SearchEvent::Error(e))?;
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        "Search complete. {} reports from {} of {} files ({} skipped)",
        summary.total_reports,
        summary.files_with_matches,
        summary.files_searched,
        summary.files_failed
    );
    Ok(summary)
}
