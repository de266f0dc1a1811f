//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use crate::exitcode;

        match self {
            CliError::Infra(InfraError::WorkingDirectory(_)) => exitcode::IOERR,
            CliError::Infra(InfraError::Application(e)) => match e {
                ApplicationError::Domain(_) => exitcode::DATAERR,
                ApplicationError::SourceRead { .. } => exitcode::NOINPUT,
                ApplicationError::Serialization { .. } => exitcode::CANTCREAT,
                ApplicationError::Config { .. } => exitcode::CONFIG,
                ApplicationError::OperationFailed { .. } => exitcode::SOFTWARE,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, Level};
    use std::path::PathBuf;

    #[test]
    fn given_orphan_row_when_exit_code_then_dataerr() {
        let err: CliError = ApplicationError::Domain(DomainError::OrphanRow {
            index: 0,
            level: Level::Broad,
            name: "B".into(),
            missing: Level::Area,
        })
        .into();
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
    }

    #[test]
    fn given_source_read_when_exit_code_then_noinput() {
        let err: CliError = ApplicationError::SourceRead {
            path: PathBuf::from("/missing"),
            message: "directory does not exist".into(),
        }
        .into();
        assert_eq!(err.exit_code(), crate::exitcode::NOINPUT);
    }

    #[test]
    fn given_serialization_when_exit_code_then_cantcreat() {
        let err: CliError = ApplicationError::Serialization {
            path: PathBuf::from("/ro/taxonomy_hierarchy.json"),
            source: Box::new(std::io::Error::from(std::io::ErrorKind::PermissionDenied)),
        }
        .into();
        assert_eq!(err.exit_code(), crate::exitcode::CANTCREAT);
    }

    #[test]
    fn given_missing_working_dir_when_exit_code_then_ioerr() {
        let err: CliError =
            InfraError::WorkingDirectory(std::io::Error::from(std::io::ErrorKind::NotFound)).into();
        assert_eq!(err.exit_code(), crate::exitcode::IOERR);
        assert_eq!(err.to_string(), "cannot resolve working directory");
    }
}
