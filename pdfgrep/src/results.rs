/// Value types that flow between the resolver, the match engine and the printer.
///
/// All of them are per-run and owned: a [`PageText`] belongs to the scan of one file
/// and is dropped with it, and a [`MatchReport`] carries its own copy of the path and
/// line so it can outlive the page it came from.
use std::fmt;
use std::path::{Path, PathBuf};

/// Text of a single page, as produced by the extractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// 1-based page number within the document
    pub number: usize,
    pub text: String,
}

impl PageText {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    /// Lines of the page, split on `\n` only
    pub fn lines(&self) -> std::str::Split<'_, char> {
        self.text.split('\n')
    }
}

/// Page and in-page line of a match. Line numbers restart at 1 on every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub page: usize,
    pub line: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page:{}, line:{}", self.page, self.line)
    }
}

/// One line of output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchReport {
    /// A matching line. `location` is only set when line numbering was requested;
    /// `line` is trimmed and already carries any highlighting.
    FileMatch {
        path: PathBuf,
        location: Option<Location>,
        line: String,
    },
    /// List mode: the file contains at least one match
    FileNameOnly { path: PathBuf },
}

impl MatchReport {
    pub fn path(&self) -> &Path {
        match self {
            Self::FileMatch { path, .. } | Self::FileNameOnly { path } => path,
        }
    }
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // "path: <annotation> <line>", annotation empty without numbering
            Self::FileMatch {
                path,
                location,
                line,
            } => {
                write!(f, "{}: ", path.display())?;
                if let Some(location) = location {
                    write!(f, "{}", location)?;
                }
                write!(f, " {}", line)
            }
            Self::FileNameOnly { path } => write!(f, "{}", path.display()),
        }
    }
}

/// Counters for one run of [`crate::search::search`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchSummary {
    /// Candidates handed to the match engine
    pub files_searched: usize,
    /// Candidates that were skipped with a per-file error
    pub files_failed: usize,
    /// Files that produced at least one report
    pub files_with_matches: usize,
    /// Total reports emitted
    pub total_reports: usize,
}

impl SearchSummary {
    pub fn new() -> Self {
        Default::default()
    }

    /// Records the outcome of one scanned file
    pub fn record_file(&mut self, reports: usize) {
        self.files_searched += 1;
        if reports > 0 {
            self.files_with_matches += 1;
            self.total_reports += reports;
        }
    }

    pub fn record_failure(&mut self) {
        self.files_searched += 1;
        self.files_failed += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_lines_split_on_newline_only() {
        let page = PageText::new(2, "Hello\r\nWorld\n\nlast");
        let lines: Vec<_> = page.lines().collect();
        assert_eq!(lines, vec!["Hello\r", "World", "", "last"]);
        assert_eq!(page.number, 2);
    }

    #[test]
    fn test_file_match_rendering() {
        let plain = MatchReport::FileMatch {
            path: PathBuf::from("a.pdf"),
            location: None,
            line: "Hello World".to_string(),
        };
        assert_eq!(plain.to_string(), "a.pdf:  Hello World");

        let numbered = MatchReport::FileMatch {
            path: PathBuf::from("docs/a.pdf"),
            location: Some(Location { page: 3, line: 7 }),
            line: "Hello".to_string(),
        };
        assert_eq!(numbered.to_string(), "docs/a.pdf: page:3, line:7 Hello");
    }

    #[test]
    fn test_file_name_only_rendering() {
        let report = MatchReport::FileNameOnly {
            path: PathBuf::from("a.pdf"),
        };
        assert_eq!(report.to_string(), "a.pdf");
        assert_eq!(report.path(), Path::new("a.pdf"));
    }

    #[test]
    fn test_summary_counters() {
        let mut summary = SearchSummary::new();
        summary.record_file(3);
        summary.record_file(0);
        summary.record_failure();

        assert_eq!(summary.files_searched, 3);
        assert_eq!(summary.files_failed, 1);
        assert_eq!(summary.files_with_matches, 1);
        assert_eq!(summary.total_reports, 3);
    }
}
