//! Line sources that feed the task parser.
//!
//! The engine itself never touches the filesystem; it consumes
//! [`SourceLine`]s from a [`LineSource`]. [`VaultScanner`] reads Markdown
//! files below a collection root and [`MemorySource`] serves lines held in
//! memory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

/// File extension of the documents scanned for tasks.
pub const MARKDOWN_EXTENSION: &str = "md";

/// Errors that stop a scan before it starts.
///
/// Problems with individual files are not errors: unreadable files are
/// skipped and contribute no lines.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The collection root does not exist.
    #[error("vault path does not exist: {}", path.display())]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// The collection root exists but is not a directory.
    #[error("vault path is not a directory: {}", path.display())]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// The collection root could not be listed.
    #[error("failed to read vault directory '{}': {source}", path.display())]
    ReadRoot {
        /// The root that failed to list.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// One raw line together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// The line without its terminator.
    pub text: String,
    /// Path relative to the collection root, `/`-separated.
    pub file_path: String,
    /// 1-based line number.
    pub line_number: usize,
}

/// Anything that can produce the raw lines of a collection.
pub trait LineSource {
    /// Returns every line in discovery order.
    fn read_lines(&self) -> Result<Vec<SourceLine>, SourceError>;
}

/// Lines held in memory, grouped by file.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: Vec<(String, String)>,
}

impl MemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document with the given relative path and contents.
    pub fn with_file(mut self, file_path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.files.push((file_path.into(), contents.into()));
        self
    }
}

impl LineSource for MemorySource {
    fn read_lines(&self) -> Result<Vec<SourceLine>, SourceError> {
        Ok(self
            .files
            .iter()
            .flat_map(|(path, contents)| number_lines(path, contents))
            .collect())
    }
}

/// Scans a directory tree for Markdown files.
///
/// Directories are walked depth-first with entries sorted by name, so the
/// discovery order is stable across runs.
#[derive(Debug, Clone)]
pub struct VaultScanner {
    root: PathBuf,
}

impl VaultScanner {
    /// Creates a scanner rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The collection root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists Markdown files below the root in discovery order.
    pub fn markdown_files(&self) -> Result<Vec<PathBuf>, SourceError> {
        if !self.root.exists() {
            return Err(SourceError::NotFound {
                path: self.root.clone(),
            });
        }
        if !self.root.is_dir() {
            return Err(SourceError::NotADirectory {
                path: self.root.clone(),
            });
        }

        let entries = sorted_entries(&self.root).map_err(|source| SourceError::ReadRoot {
            path: self.root.clone(),
            source,
        })?;

        let mut files = Vec::new();
        for path in entries {
            self.collect(path, &mut files);
        }
        Ok(files)
    }

    /// Adds `path` (or the Markdown files beneath it) to `files`.
    fn collect(&self, path: PathBuf, files: &mut Vec<PathBuf>) {
        let Ok(file_type) = fs::symlink_metadata(&path).map(|m| m.file_type()) else {
            return;
        };

        if file_type.is_dir() {
            match sorted_entries(&path) {
                Ok(children) => {
                    for child in children {
                        self.collect(child, files);
                    }
                }
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable directory"),
            }
        } else if is_markdown(&path) && path.is_file() {
            files.push(path);
        }
    }

    /// Path of `file` relative to the root, with `/` separators.
    fn relative_path(&self, file: &Path) -> String {
        let relative = file.strip_prefix(&self.root).unwrap_or(file);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl LineSource for VaultScanner {
    fn read_lines(&self) -> Result<Vec<SourceLine>, SourceError> {
        let files = self.markdown_files()?;
        let mut lines = Vec::new();

        for file in &files {
            match fs::read_to_string(file) {
                Ok(contents) => lines.extend(number_lines(&self.relative_path(file), &contents)),
                Err(e) => warn!(path = %file.display(), error = %e, "skipping unreadable file"),
            }
        }

        debug!(
            root = %self.root.display(),
            files = files.len(),
            lines = lines.len(),
            "scanned vault"
        );
        Ok(lines)
    }
}

fn sorted_entries(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect::<Vec<_>>();
    entries.sort();
    Ok(entries)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(MARKDOWN_EXTENSION))
}

fn number_lines(file_path: &str, contents: &str) -> Vec<SourceLine> {
    contents
        .lines()
        .enumerate()
        .map(|(i, text)| SourceLine {
            text: text.to_string(),
            file_path: file_path.to_string(),
            line_number: i + 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_source_numbers_lines_from_one() {
        let source = MemorySource::new()
            .with_file("a.md", "first\nsecond\r\nthird")
            .with_file("b.md", "only");
        let lines = source.read_lines().unwrap();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1].text, "second");
        assert_eq!(lines[1].line_number, 2);
        assert_eq!(lines[3].file_path, "b.md");
        assert_eq!(lines[3].line_number, 1);
    }

    #[test]
    fn test_scanner_walks_sorted_and_relative() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("projects/work")).unwrap();
        fs::write(dir.path().join("b.md"), "- [ ] b").unwrap();
        fs::write(dir.path().join("a.md"), "- [ ] a").unwrap();
        fs::write(dir.path().join("projects/work/plan.md"), "- [ ] plan").unwrap();
        fs::write(dir.path().join("projects/notes.txt"), "- [ ] ignored").unwrap();

        let scanner = VaultScanner::with_root(dir.path());
        assert_eq!(scanner.root(), dir.path());
        let lines = scanner.read_lines().unwrap();
        let paths: Vec<&str> = lines.iter().map(|l| l.file_path.as_str()).collect();

        assert_eq!(paths, vec!["a.md", "b.md", "projects/work/plan.md"]);
    }

    #[test]
    fn test_scanner_skips_unreadable_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("good.md"), "- [ ] good").unwrap();
        fs::write(dir.path().join("bad.md"), b"\xff\xfe- [ ] bad").unwrap();

        let lines = VaultScanner::with_root(dir.path()).read_lines().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].file_path, "good.md");
    }

    #[test]
    fn test_scanner_rejects_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = VaultScanner::with_root(&missing).read_lines().unwrap_err();
        assert!(matches!(err, SourceError::NotFound { .. }));
    }

    #[test]
    fn test_scanner_rejects_file_root() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file.md");
        fs::write(&file, "").unwrap();
        let err = VaultScanner::with_root(&file).read_lines().unwrap_err();
        assert!(matches!(err, SourceError::NotADirectory { .. }));
    }

    #[test]
    fn test_empty_vault_has_no_lines() {
        let dir = TempDir::new().unwrap();
        assert!(VaultScanner::with_root(dir.path()).read_lines().unwrap().is_empty());
    }
}
