use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// What a path looked like when the resolver saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    File,
    Directory,
    Missing,
    /// Exists but is neither a regular file nor a directory (socket, fifo, ...)
    Other,
}

impl CandidateKind {
    /// Classifies a path, following symlinks
    pub fn of(path: &Path) -> Self {
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => Self::File,
            Ok(meta) if meta.is_dir() => Self::Directory,
            Ok(_) => Self::Other,
            Err(_) => Self::Missing,
        }
    }
}

/// A path handed to the match engine, which re-checks it before reading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub path: PathBuf,
    pub kind: CandidateKind,
}

impl FileCandidate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let kind = CandidateKind::of(&path);
        Self { path, kind }
    }
}

/// Glob options matching shell `*`: dotfiles are not matched
fn glob_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    }
}

/// Expands a glob pattern into its matches, sorted
fn list_matching(pattern: &str) -> Vec<PathBuf> {
    match glob::glob_with(pattern, glob_options()) {
        Ok(paths) => paths
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .collect(),
        Err(e) => {
            debug!("Invalid listing pattern '{}': {}", pattern, e);
            Vec::new()
        }
    }
}

/// Non-hidden entries of the current directory, sorted. Used when no paths are given.
pub fn default_paths() -> Vec<PathBuf> {
    list_matching("*")
}

/// Immediate non-hidden children of `dir`, sorted
pub fn list_dir(dir: &Path) -> Vec<PathBuf> {
    if let Some(dir_str) = dir.to_str() {
        let pattern = Path::new(&Pattern::escape(dir_str)).join("*");
        if let Some(pattern) = pattern.to_str() {
            return list_matching(pattern);
        }
    }

    // Not representable as a glob pattern; list it directly
    let mut children: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
            .map(|entry| entry.path())
            .collect(),
        Err(e) => {
            debug!("Cannot list {}: {}", dir.display(), e);
            Vec::new()
        }
    };
    children.sort();
    children
}

/// Lazy, depth-first expansion of the input paths into file candidates.
///
/// Each level is a queue of sibling paths; visiting a directory in recursive mode
/// pushes its children as a new level, so they are emitted before the directory's
/// own later siblings. The directory check runs again at every level.
#[derive(Debug)]
pub struct FileResolver {
    levels: Vec<std::vec::IntoIter<PathBuf>>,
    recursive: bool,
}

impl FileResolver {
    pub fn new(paths: Vec<PathBuf>, recursive: bool) -> Self {
        Self {
            levels: vec![paths.into_iter()],
            recursive,
        }
    }

    /// Decides what to do with one path: emit it, expand it, or skip it
    fn visit(&mut self, path: PathBuf) -> Option<FileCandidate> {
        let kind = CandidateKind::of(&path);
        if kind != CandidateKind::Directory {
            trace!("Resolved candidate: {}", path.display());
            return Some(FileCandidate { path, kind });
        }

        if self.recursive {
            let children = list_dir(&path);
            debug!(
                "Descending into {} ({} entries)",
                path.display(),
                children.len()
            );
            self.levels.push(children.into_iter());
        } else {
            debug!("Skipping directory (not recursive): {}", path.display());
        }
        None
    }
}

impl Iterator for FileResolver {
    type Item = FileCandidate;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.levels.last_mut()?;
            match level.next() {
                Some(path) => {
                    if let Some(candidate) = self.visit(path) {
                        return Some(candidate);
                    }
                }
                None => {
                    self.levels.pop();
                }
            }
        }
    }
}

/// Resolves the paths given on the command line.
///
/// With no paths at all, the sorted top-level entries of the current directory are
/// used instead; that substitution is one level deep whatever `recursive` says, and
/// recursion then applies to the substituted entries like to any other input.
pub fn resolve<I, P>(paths: I, recursive: bool) -> FileResolver
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let mut paths: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();
    if paths.is_empty() {
        paths = default_paths();
        debug!("No paths given, using {} entries of the current directory", paths.len());
    }
    FileResolver::new(paths, recursive)
}
