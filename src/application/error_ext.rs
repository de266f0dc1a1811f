//! Error conversion helpers for common I/O operations
//!
//! Provides extension traits for cleaner error handling with path context.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// let cwd = std::env::current_dir()
    ///     .with_path_context("current directory", Path::new("."))?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;

    /// Map a failed write of the JSON output to `ApplicationError::Serialization`.
    fn or_serialization_error(self, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }

    fn or_serialization_error(self, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::Serialization {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
    }
}
