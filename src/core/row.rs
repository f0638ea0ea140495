//! Export rows
//!
//! A row maps header column names to cells. Composite cells stay structured
//! until the engine encodes the row, so customizers can still inspect and
//! replace them.

use crate::core::codec::{CompositeFormat, MultiValueEncoder, OptionGroup};
use crate::domain::Result;
use std::collections::BTreeMap;

/// Column carrying the scope of a row
pub const STORE_VIEW_CODE: &str = "store_view_code";

/// One cell of a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Scalar value, written as is
    Text(String),
    /// Structured value, flattened by the multi-value encoder
    Composite {
        format: CompositeFormat,
        groups: Vec<OptionGroup>,
    },
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn composite(format: CompositeFormat, groups: Vec<OptionGroup>) -> Self {
        Self::Composite { format, groups }
    }

    /// Encodes the cell; an empty composite becomes an empty string
    pub fn encode(&self, encoder: &MultiValueEncoder) -> Result<String> {
        match self {
            Self::Text(value) => Ok(value.clone()),
            Self::Composite { format, groups } => encoder.encode_as(*format, groups),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// One row per (entity, scope) pair
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportRow {
    cells: BTreeMap<String, Cell>,
}

impl ExportRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, column: impl Into<String>, cell: impl Into<Cell>) {
        self.cells.insert(column.into(), cell.into());
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells.get(column)
    }

    /// Text of a scalar cell
    pub fn text(&self, column: &str) -> Option<&str> {
        match self.cells.get(column) {
            Some(Cell::Text(value)) => Some(value),
            _ => None,
        }
    }

    /// Scope code of the row; empty for the default (admin) row
    pub fn store_view_code(&self) -> &str {
        self.text(STORE_VIEW_CODE).unwrap_or("")
    }

    pub fn is_default_scope(&self) -> bool {
        self.store_view_code().is_empty()
    }

    /// Encodes the row in header order; undeclared cells are dropped and
    /// missing columns become empty strings
    pub fn encode(&self, columns: &[String], encoder: &MultiValueEncoder) -> Result<Vec<String>> {
        columns
            .iter()
            .map(|column| match self.cells.get(column) {
                Some(cell) => cell.encode(encoder),
                None => Ok(String::new()),
            })
            .collect()
    }
}
