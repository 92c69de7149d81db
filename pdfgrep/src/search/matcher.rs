use regex::{NoExpand, Regex, RegexBuilder};
use tracing::debug;

use crate::errors::{SearchError, SearchResult};

pub const RED: &str = "\x1b[31m";
pub const RESET: &str = "\x1b[0m";

/// Compiled form of the user's pattern.
///
/// Case sensitivity is fixed when the matcher is built, so two matchers with
/// different settings can be used side by side.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: String,
    regex: Regex,
    literal: Regex,
}

impl PatternMatcher {
    /// Compiles `pattern` as a regular expression
    pub fn new(pattern: &str, ignore_case: bool) -> SearchResult<Self> {
        debug!(
            "Compiling pattern '{}' (ignore case: {})",
            pattern, ignore_case
        );
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(ignore_case)
            .build()
            .map_err(|e| SearchError::invalid_pattern(e.to_string()))?;

        // Highlighting looks for the pattern text itself, in any case
        let literal = RegexBuilder::new(&regex::escape(pattern))
            .case_insensitive(true)
            .build()
            .map_err(|e| SearchError::invalid_pattern(e.to_string()))?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            literal,
        })
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// Wraps every occurrence of the literal pattern text in red.
    ///
    /// The inserted text is the pattern as typed, so a case-insensitive hit on
    /// "HELLO" for pattern "hello" is shown as a red "hello". Regex metacharacters
    /// are matched literally here, not as a regex.
    pub fn highlight(&self, line: &str) -> String {
        let marked = format!("{}{}{}", RED, self.pattern, RESET);
        self.literal
            .replace_all(line, NoExpand(&marked))
            .into_owned()
    }
}
