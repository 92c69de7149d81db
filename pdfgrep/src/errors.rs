/// Error types for pdfgrep.
///
/// Errors fall into two groups:
///
/// 1. **Per-file errors** (`NotFound`, `NotAPdf`, `UnreadablePdf`) describe a single
///    candidate that could not be searched. The run reports them and moves on to the
///    next file; none of them is retried.
/// 2. **Fatal errors** (`Interrupted`, `InvalidPattern`, `ConfigError`, `IoError`) stop
///    the whole run.
///
/// The `Display` text of the per-file kinds is the fixed message printed on stderr,
/// so the front end only has to prepend the program name:
/// ```rust,ignore
/// match engine.scan(&candidate) {
///     Ok(reports) => reports.for_each(|r| println!("{}", r)),
///     Err(e) if e.is_per_file() => eprintln!("pdfgrep: {}", e),
///     Err(e) => return Err(e),
/// }
/// ```
use std::path::PathBuf;
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur while resolving, validating or searching files
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("{}: No such file or directory", .0.display())]
    NotFound(PathBuf),
    #[error("Not a pdf file: {}", .0.display())]
    NotAPdf(PathBuf),
    #[error("Unable to read file: {}", .path.display())]
    UnreadablePdf { path: PathBuf, reason: String },
    #[error("Interrupted")]
    Interrupted,
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SearchError {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound(path.into())
    }

    pub fn not_a_pdf(path: impl Into<PathBuf>) -> Self {
        Self::NotAPdf(path.into())
    }

    pub fn unreadable_pdf(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::UnreadablePdf {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_pattern(msg: impl Into<String>) -> Self {
        Self::InvalidPattern(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// True for errors that only affect one file and leave the run going
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::NotAPdf(_) | Self::UnreadablePdf { .. }
        )
    }
}

impl From<config::ConfigError> for SearchError {
    fn from(e: config::ConfigError) -> Self {
        Self::ConfigError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_error_creation() {
        let path = Path::new("report.pdf");
        let err = SearchError::not_found(path);
        assert!(matches!(err, SearchError::NotFound(_)));

        let err = SearchError::not_a_pdf(path);
        assert!(matches!(err, SearchError::NotAPdf(_)));

        let err = SearchError::unreadable_pdf(path, "bad xref");
        assert!(matches!(err, SearchError::UnreadablePdf { .. }));

        let err = SearchError::invalid_pattern("unclosed group");
        assert!(matches!(err, SearchError::InvalidPattern(_)));
    }

    #[test]
    fn test_error_messages() {
        let err = SearchError::not_found("missing.pdf");
        assert_eq!(err.to_string(), "missing.pdf: No such file or directory");

        let err = SearchError::not_a_pdf("notes.txt");
        assert_eq!(err.to_string(), "Not a pdf file: notes.txt");

        let err = SearchError::unreadable_pdf("broken.pdf", "invalid file trailer");
        assert_eq!(err.to_string(), "Unable to read file: broken.pdf");

        assert_eq!(SearchError::Interrupted.to_string(), "Interrupted");
    }

    #[test]
    fn test_per_file_classification() {
        assert!(SearchError::not_found("a.pdf").is_per_file());
        assert!(SearchError::not_a_pdf("a.txt").is_per_file());
        assert!(SearchError::unreadable_pdf("a.pdf", "eof").is_per_file());
        assert!(!SearchError::Interrupted.is_per_file());
        assert!(!SearchError::invalid_pattern("(").is_per_file());
        assert!(!SearchError::config_error("bad").is_per_file());
    }
}
