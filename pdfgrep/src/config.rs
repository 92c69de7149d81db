use config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{SearchError, SearchResult};

/// Persistent defaults for pdfgrep, read from YAML files.
///
/// # Configuration Locations
///
/// Files are layered in order of precedence (later wins):
/// 1. Global `$HOME/.config/pdfgrep/config.yaml`
/// 2. Local `.pdfgrep.yaml` in the current directory
/// 3. Custom file given with `--config`
///
/// # Configuration Format
///
/// ```yaml
/// # Match regardless of case
/// ignore_case: true
///
/// # Descend into directories
/// recursive: false
///
/// # Print only the names of matching files
/// list_files: false
///
/// # Prefix matches with "page:P, line:L"
/// line_numbers: true
///
/// # Highlight the pattern in red
/// color: false
///
/// # Hide per-file error messages
/// quiet: false
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "warn"
/// ```
///
/// Command-line flags can only switch options on; a flag that is absent leaves the
/// file value in place. See [`SearchConfig::merge_with_cli`] and [`CliOverrides`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub ignore_case: bool,
    pub recursive: bool,
    pub list_files: bool,
    pub line_numbers: bool,
    pub color: bool,
    pub quiet: bool,
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            ignore_case: false,
            recursive: false,
            list_files: false,
            line_numbers: false,
            color: false,
            quiet: false,
            log_level: default_log_level(),
        }
    }
}

impl SearchConfig {
    /// Loads configuration from the default locations
    pub fn load() -> SearchResult<Self> {
        Self::load_from(None)
    }

    /// Loads configuration from the default locations plus an optional custom file.
    ///
    /// A custom file that does not exist is an error; missing default files are not.
    pub fn load_from(config_path: Option<&Path>) -> SearchResult<Self> {
        if let Some(path) = config_path {
            if !path.is_file() {
                return Err(SearchError::config_error(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
        }

        let config_files = [
            dirs::config_dir().map(|p| p.join("pdfgrep/config.yaml")),
            Some(PathBuf::from(".pdfgrep.yaml")),
            config_path.map(PathBuf::from),
        ];

        let mut builder = ConfigBuilder::builder();
        for path in config_files.iter().flatten() {
            if path.is_file() {
                tracing::debug!("Loading config file: {}", path.display());
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Merges CLI arguments with configuration file values
    pub fn merge_with_cli(mut self, cli: CliOverrides) -> Self {
        self.ignore_case |= cli.ignore_case;
        self.recursive |= cli.recursive;
        self.list_files |= cli.list_files;
        self.line_numbers |= cli.line_numbers;
        self.color |= cli.color;
        self.quiet |= cli.quiet;
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        self
    }

    /// Freezes these options together with a pattern into a [`SearchRequest`]
    pub fn request(&self, pattern: impl Into<String>) -> SearchRequest {
        SearchRequest::new(pattern)
            .with_ignore_case(self.ignore_case)
            .with_recursive(self.recursive)
            .with_list_files(self.list_files)
            .with_line_numbers(self.line_numbers)
            .with_color(self.color)
            .with_suppress_errors(self.quiet)
    }
}

/// What was given on the command line. Flags are presence-only; `log_level` is
/// `None` unless `--log-level` was passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub ignore_case: bool,
    pub recursive: bool,
    pub list_files: bool,
    pub line_numbers: bool,
    pub color: bool,
    pub quiet: bool,
    pub log_level: Option<String>,
}

/// Everything one search run needs to know. Read-only once the run starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    /// The pattern to search for (regex)
    pub pattern: String,
    pub ignore_case: bool,
    /// Descend into directories instead of skipping them
    pub recursive: bool,
    /// Report each matching file once, by name
    pub list_files: bool,
    /// Prefix each match with its page and in-page line number
    pub show_line_numbers: bool,
    /// Wrap occurrences of the pattern in ANSI red
    pub colorize: bool,
    /// Keep per-file errors off stderr. Never changes which files are skipped.
    pub suppress_errors: bool,
}

impl SearchRequest {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Default::default()
        }
    }

    pub fn with_ignore_case(mut self, yes: bool) -> Self {
        self.ignore_case = yes;
        self
    }

    pub fn with_recursive(mut self, yes: bool) -> Self {
        self.recursive = yes;
        self
    }

    pub fn with_list_files(mut self, yes: bool) -> Self {
        self.list_files = yes;
        self
    }

    pub fn with_line_numbers(mut self, yes: bool) -> Self {
        self.show_line_numbers = yes;
        self
    }

    pub fn with_color(mut self, yes: bool) -> Self {
        self.colorize = yes;
        self
    }

    pub fn with_suppress_errors(mut self, yes: bool) -> Self {
        self.suppress_errors = yes;
        self
    }
}
