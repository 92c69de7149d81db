use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

use super::matcher::PatternMatcher;
use crate::config::SearchRequest;
use crate::errors::{SearchError, SearchResult};
use crate::pdf::{ContentSniffer, LopdfExtractor, MagicSniffer, TextExtractor, MIME_PDF};
use crate::resolver::FileCandidate;
use crate::results::{Location, MatchReport, PageText};

/// Validates `path` and extracts its pages.
///
/// The checks run in a fixed order and the first failure wins:
/// 1. the path must be an existing regular file (`NotFound`)
/// 2. the sniffer must classify it as a PDF (`NotAPdf`)
/// 3. the file must be readable (`NotFound`)
/// 4. the extractor must decode it (`UnreadablePdf`)
pub fn load_pages<S, X>(path: &Path, sniffer: &S, extractor: &X) -> SearchResult<Vec<PageText>>
where
    S: ContentSniffer + ?Sized,
    X: TextExtractor + ?Sized,
{
    if !fs::metadata(path).map(|m| m.is_file()).unwrap_or(false) {
        debug!("Not a regular file: {}", path.display());
        return Err(SearchError::not_found(path));
    }

    let mime = sniffer.classify(path).map_err(|e| {
        debug!("Cannot sniff {}: {}", path.display(), e);
        SearchError::not_found(path)
    })?;
    if mime != MIME_PDF {
        debug!("Skipping {} ({})", path.display(), mime);
        return Err(SearchError::not_a_pdf(path));
    }

    let bytes = fs::read(path).map_err(|e| {
        debug!("Cannot read {}: {}", path.display(), e);
        SearchError::not_found(path)
    })?;

    extractor.extract_pages(&bytes).map_err(|e| {
        debug!("Extraction failed for {}: {}", path.display(), e);
        SearchError::unreadable_pdf(path, e.to_string())
    })
}

/// Validates, extracts and searches one file at a time.
///
/// The engine owns the compiled pattern and the collaborators; every call to
/// [`MatchEngine::scan`] works on one candidate and shares nothing with other calls
/// except the read-only request.
#[derive(Debug)]
pub struct MatchEngine<S = MagicSniffer, X = LopdfExtractor> {
    request: SearchRequest,
    matcher: PatternMatcher,
    sniffer: S,
    extractor: X,
    interrupt: Arc<AtomicBool>,
}

impl MatchEngine {
    /// Creates an engine backed by the real sniffer and `lopdf`
    pub fn new(request: SearchRequest) -> SearchResult<Self> {
        Self::with_collaborators(request, MagicSniffer, LopdfExtractor)
    }
}

impl<S: ContentSniffer, X: TextExtractor> MatchEngine<S, X> {
    pub fn with_collaborators(request: SearchRequest, sniffer: S, extractor: X) -> SearchResult<Self> {
        let matcher = PatternMatcher::new(&request.pattern, request.ignore_case)?;
        Ok(Self {
            request,
            matcher,
            sniffer,
            extractor,
            interrupt: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Shares a cancellation flag with the engine. Scans stop at the next page
    /// boundary once it is set.
    pub fn with_interrupt(mut self, interrupt: Arc<AtomicBool>) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupt.load(Ordering::SeqCst)
    }

    /// Validates and extracts `candidate`, returning a lazy sequence of its reports.
    ///
    /// All validation happens here, so an `Err` means the file produced nothing. The
    /// returned iterator is one-shot; in list mode it yields at most one
    /// [`MatchReport::FileNameOnly`] and then stops without looking further.
    pub fn scan(&self, candidate: &FileCandidate) -> SearchResult<FileMatches<'_, S, X>> {
        trace!("Scanning {}", candidate.path.display());
        let pages = load_pages(&candidate.path, &self.sniffer, &self.extractor)?;
        debug!(
            "Extracted {} pages from {}",
            pages.len(),
            candidate.path.display()
        );

        Ok(FileMatches {
            engine: self,
            path: candidate.path.clone(),
            pages: pages.into_iter(),
            current: None,
            done: false,
        })
    }

    fn report(&self, path: &Path, page: usize, line_number: usize, line: &str) -> MatchReport {
        if self.request.list_files {
            return MatchReport::FileNameOnly {
                path: path.to_path_buf(),
            };
        }

        let location = self.request.show_line_numbers.then_some(Location {
            page,
            line: line_number,
        });
        let line = if self.request.colorize {
            self.matcher.highlight(line)
        } else {
            line.to_string()
        };

        MatchReport::FileMatch {
            path: path.to_path_buf(),
            location,
            line: line.trim().to_string(),
        }
    }
}

/// Lines of the page being scanned, numbered from 1
type PageLines = std::iter::Enumerate<std::vec::IntoIter<String>>;

/// Reports for one file, produced on demand
#[derive(Debug)]
pub struct FileMatches<'a, S = MagicSniffer, X = LopdfExtractor> {
    engine: &'a MatchEngine<S, X>,
    path: PathBuf,
    pages: std::vec::IntoIter<PageText>,
    current: Option<(usize, PageLines)>,
    done: bool,
}

impl<'a, S: ContentSniffer, X: TextExtractor> FileMatches<'a, S, X> {
    /// Moves to the next page, or finishes the file
    fn advance_page(&mut self) -> bool {
        if self.engine.is_interrupted() {
            debug!("Interrupted while scanning {}", self.path.display());
            self.done = true;
            return false;
        }
        match self.pages.next() {
            Some(page) => {
                let lines: Vec<String> = page.lines().map(str::to_string).collect();
                self.current = Some((page.number, lines.into_iter().enumerate()));
                true
            }
            None => {
                self.done = true;
                false
            }
        }
    }
}

impl<'a, S: ContentSniffer, X: TextExtractor> Iterator for FileMatches<'a, S, X> {
    type Item = MatchReport;

    fn next(&mut self) -> Option<Self::Item> {
        let engine = self.engine;
        loop {
            if self.done {
                return None;
            }
            if self.current.is_none() && !self.advance_page() {
                return None;
            }
            let Some((page, lines)) = self.current.as_mut() else {
                continue;
            };

            let Some((index, line)) = lines.next() else {
                self.current = None;
                continue;
            };

            if engine.matcher.is_match(&line) {
                trace!(
                    "Match in {} at page {}, line {}",
                    self.path.display(),
                    page,
                    index + 1
                );
                let report = engine.report(&self.path, *page, index + 1, &line);
                if engine.request.list_files {
                    self.done = true;
                }
                return Some(report);
            }
        }
    }
}
