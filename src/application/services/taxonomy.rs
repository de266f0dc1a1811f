//! Taxonomy export service
//!
//! Loads spreadsheet rows, rebuilds the category hierarchy and writes it as JSON.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::render::{to_pretty_json, OUTPUT_FILE_NAME};
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{CategoryHierarchy, HierarchyBuilder, LevelCounts, ParentScope, TaxonomyRow};
use crate::infrastructure::traits::{FileSystem, RowSource};

/// Outcome of a full export run.
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Written JSON file
    pub output_path: PathBuf,
    /// Rendered JSON text, identical to the file contents
    pub json: String,
    /// Rows read from the source, including skipped ones
    pub rows: usize,
    pub counts: LevelCounts,
}

/// Service for turning a directory of spreadsheets into the taxonomy JSON.
pub struct TaxonomyService {
    source: Arc<dyn RowSource>,
    fs: Arc<dyn FileSystem>,
    builder: HierarchyBuilder,
}

impl TaxonomyService {
    /// Create a new taxonomy service.
    pub fn new(source: Arc<dyn RowSource>, fs: Arc<dyn FileSystem>, scope: ParentScope) -> Self {
        Self {
            source,
            fs,
            builder: HierarchyBuilder::with_scope(scope),
        }
    }

    /// Concatenated rows of every spreadsheet in `data_dir`.
    pub fn load_rows(&self, data_dir: &Path) -> ApplicationResult<Vec<TaxonomyRow>> {
        self.source
            .load_rows(data_dir)
            .map_err(|e| ApplicationError::SourceRead {
                path: e.path,
                message: e.message,
            })
    }

    /// Build the hierarchy from the spreadsheets in `data_dir`.
    pub fn build(&self, data_dir: &Path) -> ApplicationResult<CategoryHierarchy> {
        let rows = self.load_rows(data_dir)?;
        Ok(self.builder.build(&rows)?)
    }

    /// Render the hierarchy of `data_dir` as JSON text.
    pub fn render(&self, data_dir: &Path) -> ApplicationResult<String> {
        let hierarchy = self.build(data_dir)?;
        to_pretty_json(&hierarchy.to_nested_mapping())
    }

    /// Write `json` to `<output_dir>/taxonomy_hierarchy.json`.
    ///
    /// The output directory must already exist.
    pub fn write(&self, output_dir: &Path, json: &str) -> ApplicationResult<PathBuf> {
        let output_path = output_dir.join(OUTPUT_FILE_NAME);
        if !self.fs.is_dir(output_dir) {
            return Err(ApplicationError::Serialization {
                path: output_path,
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("output directory does not exist: {}", output_dir.display()),
                )),
            });
        }
        self.fs
            .write(&output_path, json)
            .or_serialization_error(&output_path)?;
        debug!("wrote {} bytes to {}", json.len(), output_path.display());
        Ok(output_path)
    }

    /// Run the whole pipeline: load, build, render, write.
    #[instrument(level = "debug", skip(self))]
    pub fn export(&self, data_dir: &Path, output_dir: &Path) -> ApplicationResult<ExportReport> {
        let rows = self.load_rows(data_dir)?;
        let hierarchy = self.builder.build(&rows)?;
        let counts = hierarchy.counts();
        info!("{} rows -> {}", rows.len(), counts);

        let json = to_pretty_json(&hierarchy.to_nested_mapping())?;
        let output_path = self.write(output_dir, &json)?;

        Ok(ExportReport {
            output_path,
            json,
            rows: rows.len(),
            counts,
        })
    }
}
