//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::TaxonomyRow;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;
}

/// Failure to turn a directory of spreadsheets into rows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}: {message}", path.display())]
pub struct SourceReadError {
    /// Directory or file that could not be read
    pub path: PathBuf,
    pub message: String,
}

impl SourceReadError {
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Tabular taxonomy source.
pub trait RowSource: Send + Sync {
    /// Load every matching file of `dir` and concatenate their rows.
    ///
    /// Per-file row order and file order are preserved; nothing is
    /// deduplicated.
    fn load_rows(&self, dir: &Path) -> Result<Vec<TaxonomyRow>, SourceReadError>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// Row source serving a fixed row list, regardless of directory.
#[derive(Debug, Clone, Default)]
pub struct StaticRowSource {
    rows: Vec<TaxonomyRow>,
}

impl StaticRowSource {
    pub fn new(rows: Vec<TaxonomyRow>) -> Self {
        Self { rows }
    }
}

impl RowSource for StaticRowSource {
    fn load_rows(&self, _dir: &Path) -> Result<Vec<TaxonomyRow>, SourceReadError> {
        Ok(self.rows.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Level;
    use tempfile::TempDir;

    #[test]
    fn given_real_fs_when_writing_then_reads_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.json");
        let fs = RealFileSystem;

        fs.write(&path, "{}").unwrap();

        assert!(!fs.is_dir(&path));
        assert!(fs.is_dir(temp.path()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn given_static_source_when_loading_then_returns_rows_for_any_dir() {
        let source = StaticRowSource::new(vec![TaxonomyRow::new(Level::Area, "A")]);

        let rows = source.load_rows(Path::new("/does/not/matter")).unwrap();

        assert_eq!(rows, vec![TaxonomyRow::new(Level::Area, "A")]);
    }

    #[test]
    fn given_source_error_when_displayed_then_includes_path() {
        let err = SourceReadError::new("/data/x.xlsx", "not a workbook");
        assert_eq!(err.to_string(), "/data/x.xlsx: not a workbook");
    }

    #[test]
    fn given_source_error_when_boxed_then_is_std_error() {
        let err: Box<dyn std::error::Error + Send + Sync> =
            Box::new(SourceReadError::new("/data", "directory does not exist"));
        assert_eq!(err.to_string(), "/data: directory does not exist");
    }
}
