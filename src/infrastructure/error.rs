//! Infrastructure-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;

/// Failures of the export pipeline plus environment problems of the process
/// running it.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Relative `--data-dir`/`--output-dir` cannot be resolved.
    #[error("cannot resolve working directory")]
    WorkingDirectory(#[source] std::io::Error),
}
