//! Core data types flowing out of the search pipeline.
//!
//! Rows are built from a table's declared column order rather than from
//! whatever the store happens to return, so the identifier column can never
//! leak into a response.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Integer(i64),
    Real(f64),
    Null,
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Real(x) => write!(f, "{}", x),
            Value::Null => f.write_str("-"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

/// One result row: column name to value, in declared column order.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell. A repeated column name replaces the earlier value.
    pub fn push(&mut self, column: impl Into<String>, value: Value) {
        let column = column.into();
        match self.cells.iter_mut().find(|(c, _)| *c == column) {
            Some((_, v)) => *v = value,
            None => self.cells.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(c, _)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.cells.iter().map(|(c, v)| (c.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// `"col: value, col: value"` as used in reply summaries.
    pub fn describe(&self) -> String {
        self.cells
            .iter()
            .map(|(c, v)| format!("{}: {}", c, v))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<C: Into<String>> FromIterator<(C, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (C, Value)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (c, v) in iter {
            row.push(c, v);
        }
        row
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (c, v) in &self.cells {
            map.serialize_entry(c, v)?;
        }
        map.end()
    }
}

/// Matching rows for one table. Only built when `rows` is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub table: String,
    pub rows: Vec<Row>,
}

/// Grouped hits in registry order plus the human-readable reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub groups: Vec<MatchResult>,
    pub summary: String,
}

impl SearchResponse {
    pub fn empty() -> Self {
        Self {
            groups: Vec::new(),
            summary: crate::search::NO_RESULTS_MESSAGE.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group(&self, table: &str) -> Option<&MatchResult> {
        self.groups.iter().find(|g| g.table == table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_serializes_in_declared_order() {
        let row: Row = vec![
            ("topic", Value::from("Fee Payment")),
            ("contact", Value::Null),
            ("credits", Value::Integer(3)),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(
            json,
            r#"{"topic":"Fee Payment","contact":null,"credits":3}"#
        );
    }

    #[test]
    fn test_row_push_replaces_duplicate_column() {
        let mut row = Row::new();
        row.push("menu", Value::from("Rice"));
        row.push("menu", Value::from("Dal"));
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("menu"), Some(&Value::from("Dal")));
    }

    #[test]
    fn test_describe() {
        let row: Row = vec![
            ("location", Value::from("North Canteen")),
            ("notes", Value::Null),
        ]
        .into_iter()
        .collect();
        assert_eq!(row.describe(), "location: North Canteen, notes: -");
    }

    #[test]
    fn test_empty_response() {
        let resp = SearchResponse::empty();
        assert!(resp.is_empty());
        assert_eq!(resp.summary, crate::search::NO_RESULTS_MESSAGE);
        assert!(resp.group("dining").is_none());
    }
}
