//! Domain layer: taxonomy entities and the hierarchy builder
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod entities;
pub mod error;

pub use builder::{BuildResult, HierarchyBuilder, ParentScope};
pub use entities::*;
pub use error::DomainError;
