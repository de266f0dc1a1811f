//! Spreadsheet row source backed by calamine.
//!
//! Reads the first worksheet of every workbook in a directory. The first row
//! of a sheet is its header; an empty header cell in column `i` is named
//! `Unnamed: i`, and a repeated header `X` becomes `X.1`, `X.2`, ...

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Reader, Xlsx, XlsxError};
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use crate::config::Settings;
use crate::domain::TaxonomyRow;
use crate::infrastructure::traits::{RowSource, SourceReadError};

/// Reads taxonomy rows from `.xlsx` workbooks.
#[derive(Debug, Clone)]
pub struct WorkbookSource {
    extension: String,
    level_column: String,
    name_column: String,
}

impl WorkbookSource {
    pub fn new(
        extension: impl Into<String>,
        level_column: impl Into<String>,
        name_column: impl Into<String>,
    ) -> Self {
        Self {
            extension: extension.into(),
            level_column: level_column.into(),
            name_column: name_column.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.extension.clone(),
            settings.level_column.clone(),
            settings.name_column.clone(),
        )
    }

    /// Regular files directly inside `dir` with the configured extension,
    /// sorted by file name.
    pub fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>, SourceReadError> {
        if !dir.exists() {
            return Err(SourceReadError::new(dir, "directory does not exist"));
        }
        if !dir.is_dir() {
            return Err(SourceReadError::new(dir, "not a directory"));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| SourceReadError::new(dir, e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let matches = entry
                .path()
                .extension()
                .is_some_and(|ext| ext == self.extension.as_str());
            if matches {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    /// Rows of the first worksheet of one workbook, header excluded.
    #[instrument(level = "debug", skip(self))]
    pub fn read_file(&self, path: &Path) -> Result<Vec<TaxonomyRow>, SourceReadError> {
        let mut workbook = open_workbook::<Xlsx<_>, _>(path)
            .map_err(|e: XlsxError| SourceReadError::new(path, e.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| SourceReadError::new(path, "workbook has no worksheets"))?
            .map_err(|e| SourceReadError::new(path, e.to_string()))?;

        let first_col = range.start().map(|(_, col)| col as usize).unwrap_or(0);
        let mut sheet_rows = range.rows();
        let Some(header) = sheet_rows.next() else {
            warn!("{}: first worksheet is empty", path.display());
            return Ok(Vec::new());
        };

        let columns = header_names(header, first_col);
        let level_idx = self.column_index(&columns, &self.level_column, path)?;
        let name_idx = self.column_index(&columns, &self.name_column, path)?;
        debug!(
            "columns: level={} name={} of {:?}",
            level_idx, name_idx, columns
        );

        let rows: Vec<TaxonomyRow> = sheet_rows
            .map(|cells| {
                let label = cells.get(level_idx).map(cell_text).unwrap_or_default();
                let name = cells.get(name_idx).map(cell_text).unwrap_or_default();
                TaxonomyRow::from_cells(&label, name)
            })
            .collect();
        Ok(rows)
    }

    fn column_index(
        &self,
        columns: &[String],
        wanted: &str,
        path: &Path,
    ) -> Result<usize, SourceReadError> {
        columns.iter().position(|c| c == wanted).ok_or_else(|| {
            SourceReadError::new(
                path,
                format!("missing column '{}' (found: {})", wanted, columns.join(", ")),
            )
        })
    }
}

impl RowSource for WorkbookSource {
    #[instrument(level = "debug", skip(self))]
    fn load_rows(&self, dir: &Path) -> Result<Vec<TaxonomyRow>, SourceReadError> {
        let files = self.list_files(dir)?;
        if files.is_empty() {
            warn!("no *.{} files in {}", self.extension, dir.display());
        }

        let mut rows = Vec::new();
        for file in &files {
            let file_rows = self.read_file(file)?;
            info!("{}: {} rows", file.display(), file_rows.len());
            rows.extend(file_rows);
        }
        Ok(rows)
    }
}

/// Column names for a header row whose first cell sits in column `first_col`.
pub fn header_names(header: &[Data], first_col: usize) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    header
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let text = cell_text(cell);
            let base = if text.is_empty() {
                format!("Unnamed: {}", first_col + i)
            } else {
                text
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{}.{}", base, count)
            };
            *count += 1;
            name
        })
        .collect()
}

/// Text of a cell. Whole floats lose their fractional part (`3.0` → `3`).
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}
