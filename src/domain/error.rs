//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::Level;

/// Domain errors represent violations of the taxonomy nesting rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("orphan {level} row {index} ('{name}'): no current {missing} category")]
    OrphanRow {
        /// 0-based position in the concatenated row sequence
        index: usize,
        level: Level,
        name: String,
        /// Ancestor level that was expected to be open
        missing: Level,
    },
}
