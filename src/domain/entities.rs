//! Domain entities: taxonomy rows and the four-level category tree

use std::fmt;

use serde_json::{Map, Value};

/// Level label of a taxonomy row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Level {
    Area,
    Broad,
    Major,
    Detailed,
    /// Blank or unrecognised label; such rows are skipped by the builder.
    Other(String),
}

impl Level {
    /// Parse a raw label cell. Matching is exact (case and whitespace sensitive).
    pub fn parse(label: &str) -> Self {
        match label {
            "Area" => Level::Area,
            "Broad" => Level::Broad,
            "Major" => Level::Major,
            "Detailed" => Level::Detailed,
            other => Level::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Level::Area => "Area",
            Level::Broad => "Broad",
            Level::Major => "Major",
            Level::Detailed => "Detailed",
            Level::Other(label) => label,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the concatenated spreadsheet input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyRow {
    pub level: Level,
    pub name: String,
}

impl TaxonomyRow {
    pub fn new(level: Level, name: impl Into<String>) -> Self {
        Self {
            level,
            name: name.into(),
        }
    }

    /// Build a row from the raw label and name cells.
    pub fn from_cells(label: &str, name: impl Into<String>) -> Self {
        Self::new(Level::parse(label), name)
    }
}

/// Leaf of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailedCategory {
    pub name: String,
}

impl DetailedCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// A detailed category serializes to its bare name.
    pub fn to_value(&self) -> Value {
        Value::String(self.name.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MajorCategory {
    pub name: String,
    pub children: Vec<DetailedCategory>,
}

impl MajorCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Sequence of detailed names, in row order.
    pub fn to_value(&self) -> Value {
        Value::Array(self.children.iter().map(DetailedCategory::to_value).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadCategory {
    pub name: String,
    pub children: Vec<MajorCategory>,
}

impl BroadCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn to_value(&self) -> Value {
        Value::Object(keyed(self.children.iter().map(|m| (&m.name, m.to_value()))))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaCategory {
    pub name: String,
    pub children: Vec<BroadCategory>,
}

impl AreaCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn to_value(&self) -> Value {
        Value::Object(keyed(self.children.iter().map(|b| (&b.name, b.to_value()))))
    }
}

/// Root of the taxonomy tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryHierarchy {
    pub children: Vec<AreaCategory>,
}

/// Node totals per level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelCounts {
    pub areas: usize,
    pub broads: usize,
    pub majors: usize,
    pub detailed: usize,
}

impl fmt::Display for LevelCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} areas, {} broad, {} major, {} detailed",
            self.areas, self.broads, self.majors, self.detailed
        )
    }
}

impl CategoryHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn area_count(&self) -> usize {
        self.children.len()
    }

    pub fn counts(&self) -> LevelCounts {
        let mut counts = LevelCounts {
            areas: self.children.len(),
            ..LevelCounts::default()
        };
        for broad in self.children.iter().flat_map(|a| &a.children) {
            counts.broads += 1;
            for major in &broad.children {
                counts.majors += 1;
                counts.detailed += major.children.len();
            }
        }
        counts
    }

    /// Convert the tree into nested JSON mappings keyed by category name.
    ///
    /// The outermost mapping is keyed directly by area name. Keys keep
    /// insertion order; when sibling names repeat, the key stays at its first
    /// position and holds the value of the last sibling with that name.
    pub fn to_nested_mapping(&self) -> Map<String, Value> {
        keyed(self.children.iter().map(|a| (&a.name, a.to_value())))
    }
}

fn keyed<'a>(entries: impl Iterator<Item = (&'a String, Value)>) -> Map<String, Value> {
    let mut map = Map::new();
    for (name, value) in entries {
        map.insert(name.clone(), value);
    }
    map
}
