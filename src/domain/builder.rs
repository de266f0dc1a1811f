//! Hierarchy builder: rebuilds the four-level taxonomy tree from labeled rows.

use tracing::{debug, instrument, trace};

use crate::domain::entities::{
    AreaCategory, BroadCategory, CategoryHierarchy, DetailedCategory, Level, MajorCategory,
    TaxonomyRow,
};
use crate::domain::error::DomainError;

/// Result type for hierarchy operations.
pub type BuildResult<T> = Result<T, DomainError>;

/// What happens to the deeper parent pointers when a shallower level starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParentScope {
    /// A new Area closes the current Broad and Major; a new Broad closes the
    /// current Major. Rows that skip a level fail as orphans.
    #[default]
    Reset,
    /// Pointers stay set until overwritten, so a row can attach to a node
    /// under an earlier ancestor. Matches the legacy script output.
    Carry,
}

/// Single-pass builder with rolling parent pointers.
#[derive(Debug, Clone, Default)]
pub struct HierarchyBuilder {
    scope: ParentScope,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scope(scope: ParentScope) -> Self {
        Self { scope }
    }

    pub fn scope(&self) -> ParentScope {
        self.scope
    }

    /// Build the tree from rows in order.
    ///
    /// Every child is appended at the tail of its parent, so sibling order
    /// always equals row order. Rows with an unrecognised label are skipped.
    ///
    /// # Errors
    /// `DomainError::OrphanRow` when a Broad, Major or Detailed row appears
    /// while no category of the level above it is open.
    #[instrument(level = "debug", skip_all, fields(scope = ?self.scope))]
    pub fn build<'a, I>(&self, rows: I) -> BuildResult<CategoryHierarchy>
    where
        I: IntoIterator<Item = &'a TaxonomyRow>,
    {
        let mut hierarchy = CategoryHierarchy::new();

        // Positions of the currently open nodes, as index paths from the root.
        let mut area: Option<usize> = None;
        let mut broad: Option<(usize, usize)> = None;
        let mut major: Option<(usize, usize, usize)> = None;

        for (index, row) in rows.into_iter().enumerate() {
            match &row.level {
                Level::Area => {
                    hierarchy.children.push(AreaCategory::new(row.name.as_str()));
                    area = Some(hierarchy.children.len() - 1);
                    if self.scope == ParentScope::Reset {
                        broad = None;
                        major = None;
                    }
                }
                Level::Broad => {
                    let a = area.ok_or_else(|| orphan(index, row, Level::Area))?;
                    let broads = &mut hierarchy.children[a].children;
                    broads.push(BroadCategory::new(row.name.as_str()));
                    broad = Some((a, broads.len() - 1));
                    if self.scope == ParentScope::Reset {
                        major = None;
                    }
                }
                Level::Major => {
                    let (a, b) = broad.ok_or_else(|| orphan(index, row, Level::Broad))?;
                    let majors = &mut hierarchy.children[a].children[b].children;
                    majors.push(MajorCategory::new(row.name.as_str()));
                    major = Some((a, b, majors.len() - 1));
                }
                Level::Detailed => {
                    let (a, b, m) = major.ok_or_else(|| orphan(index, row, Level::Major))?;
                    hierarchy.children[a].children[b].children[m]
                        .children
                        .push(DetailedCategory::new(row.name.as_str()));
                }
                Level::Other(label) => {
                    trace!("row {}: skipping label {:?}", index, label);
                }
            }
        }

        debug!("built hierarchy: {}", hierarchy.counts());
        Ok(hierarchy)
    }
}

fn orphan(index: usize, row: &TaxonomyRow, missing: Level) -> DomainError {
    DomainError::OrphanRow {
        index,
        level: row.level.clone(),
        name: row.name.clone(),
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(cells: &[(&str, &str)]) -> Vec<TaxonomyRow> {
        cells
            .iter()
            .map(|(label, name)| TaxonomyRow::from_cells(label, *name))
            .collect()
    }

    #[test]
    fn given_well_formed_rows_when_building_then_nests_in_row_order() {
        let input = rows(&[
            ("Area", "A"),
            ("Broad", "B1"),
            ("Major", "M1"),
            ("Detailed", "D1"),
            ("Detailed", "D2"),
        ]);

        let hierarchy = HierarchyBuilder::new().build(&input).unwrap();

        assert_eq!(
            serde_json::Value::Object(hierarchy.to_nested_mapping()),
            json!({"A": {"B1": {"M1": ["D1", "D2"]}}})
        );
    }

    #[test]
    fn given_unknown_labels_when_building_then_rows_are_skipped() {
        let input = rows(&[
            ("", "Title row"),
            ("Area", "A"),
            ("Code", "ignored"),
            ("Broad", "B"),
        ]);

        let hierarchy = HierarchyBuilder::new().build(&input).unwrap();

        assert_eq!(hierarchy.counts().areas, 1);
        assert_eq!(hierarchy.counts().broads, 1);
    }

    #[test]
    fn given_detailed_first_when_building_then_orphan_error_with_position() {
        let input = rows(&[("", "header"), ("Detailed", "D")]);

        let err = HierarchyBuilder::new().build(&input).unwrap_err();

        assert_eq!(
            err,
            DomainError::OrphanRow {
                index: 1,
                level: Level::Detailed,
                name: "D".into(),
                missing: Level::Major,
            }
        );
    }

    #[test]
    fn given_reset_scope_when_major_follows_new_area_then_orphan() {
        let input = rows(&[
            ("Area", "A1"),
            ("Broad", "B1"),
            ("Area", "A2"),
            ("Major", "M"),
        ]);

        let err = HierarchyBuilder::with_scope(ParentScope::Reset)
            .build(&input)
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::OrphanRow {
                index: 3,
                missing: Level::Broad,
                ..
            }
        ));
    }

    #[test]
    fn given_carry_scope_when_major_follows_new_area_then_attaches_to_stale_broad() {
        let input = rows(&[
            ("Area", "A1"),
            ("Broad", "B1"),
            ("Area", "A2"),
            ("Major", "M"),
        ]);

        let hierarchy = HierarchyBuilder::with_scope(ParentScope::Carry)
            .build(&input)
            .unwrap();

        assert_eq!(
            serde_json::Value::Object(hierarchy.to_nested_mapping()),
            json!({"A1": {"B1": {"M": []}}, "A2": {}})
        );
    }
}
