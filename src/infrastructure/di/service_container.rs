//! Service container for dependency injection
//!
//! Wires the taxonomy service to its row source and filesystem.

use std::sync::Arc;

use crate::application::services::TaxonomyService;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem, RowSource};
use crate::infrastructure::workbook::WorkbookSource;

/// Container holding all application services.
pub struct ServiceContainer {
    /// Effective settings, directories already resolved
    pub settings: Arc<Settings>,

    /// Taxonomy export pipeline
    pub taxonomy: TaxonomyService,
}

impl ServiceContainer {
    /// Create a new service container reading workbooks from disk.
    pub fn new(settings: Settings) -> Self {
        let source = Arc::new(WorkbookSource::from_settings(&settings));
        Self::with_deps(settings, Arc::new(RealFileSystem), source)
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        source: Arc<dyn RowSource>,
    ) -> Self {
        let taxonomy = TaxonomyService::new(source, fs, settings.parent_scope());

        Self {
            settings: Arc::new(settings),
            taxonomy,
        }
    }
}
