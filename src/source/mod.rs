//! Raw source tables handed over by the collection layer.
//!
//! Ownership model:
//! - Collectors (outside this crate) fetch one resolved `RawTable` per source.
//! - `ColumnMapping` names which columns carry text, creator, popularity, and likes.
//! - `crate::normalize` turns a table plus its mapping into `SourceRecord`s.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::SourceId;
use crate::types::ColumnName;

/// Column-mapping types and per-source defaults.
pub mod mapping;

pub use mapping::{ColumnMapping, PopularityField};

/// One row of a source table: ordered column name → JSON cell.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    cells: IndexMap<ColumnName, Value>,
}

impl RawRow {
    /// A row with no cells.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from `(column, value)` pairs, keeping their order.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<ColumnName>,
    {
        Self {
            cells: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Set a cell, replacing any previous value for the column.
    pub fn with(mut self, column: impl Into<ColumnName>, value: Value) -> Self {
        self.cells.insert(column.into(), value);
        self
    }

    /// Cell under `column`.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells.get(column)
    }

    /// Whether the row has a `column` cell.
    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    /// First column from `candidates` present in this row, with its value.
    pub fn first_of<'a>(&'a self, candidates: &'a [ColumnName]) -> Option<(&'a str, &'a Value)> {
        candidates
            .iter()
            .find_map(|name| self.cells.get(name).map(|value| (name.as_str(), value)))
    }

    /// Cells in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&ColumnName, &Value)> {
        self.cells.iter()
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A resolved table from one source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    /// Source the rows came from.
    pub source: SourceId,
    /// Rows as collected.
    #[serde(default)]
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Table of `rows` from `source`.
    pub fn new(source: SourceId, rows: Vec<RawRow>) -> Self {
        Self { source, rows }
    }

    /// A table with no rows.
    pub fn empty(source: SourceId) -> Self {
        Self::new(source, Vec::new())
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
