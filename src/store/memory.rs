//! In-memory [`Store`] implementation for tests.
//!
//! Rows are kept per table in insertion order, which stands in for storage
//! order. Predicates are evaluated with [`Predicate::matches`]. A table can
//! be marked as failing to exercise the storage error path.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::models::Row;
use crate::query::Predicate;
use crate::schema::TableDescriptor;

use super::Store;

pub struct InMemoryStore {
    tables: RwLock<HashMap<String, Vec<Row>>>,
    failing: RwLock<HashSet<String>>,
    scans: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            failing: RwLock::new(HashSet::new()),
            scans: AtomicUsize::new(0),
        }
    }

    /// Append a row to `table`. Cells not declared on the table are kept
    /// but never returned.
    pub fn insert(&self, table: &str, row: Row) {
        let mut tables = self.tables.write().unwrap();
        tables.entry(table.to_string()).or_default().push(row);
    }

    /// Make every scan of `table` fail from now on.
    pub fn fail_on(&self, table: &str) {
        self.failing.write().unwrap().insert(table.to_string());
    }

    /// Number of table scans served so far, failed ones included.
    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn fetch_matching(
        &self,
        table: &TableDescriptor,
        predicate: &Predicate,
    ) -> Result<Vec<Row>> {
        if predicate.matches_nothing() {
            return Ok(Vec::new());
        }
        self.scans.fetch_add(1, Ordering::SeqCst);

        if self.failing.read().unwrap().contains(table.name) {
            bail!("table '{}' is unavailable", table.name);
        }

        let tables = self.tables.read().unwrap();
        let rows = match tables.get(table.name) {
            Some(rows) => rows,
            None => return Ok(Vec::new()),
        };

        Ok(rows
            .iter()
            .filter(|r| predicate.matches(r))
            .map(|r| {
                table
                    .columns
                    .iter()
                    .filter_map(|c| r.get(c).map(|v| (*c, v.clone())))
                    .collect::<Row>()
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Value;
    use crate::query::build;
    use crate::schema;
    use crate::tokenize::extract;

    #[tokio::test]
    async fn test_projects_declared_columns_only() {
        let store = InMemoryStore::new();
        let mut row = Row::new();
        row.push("id", Value::Integer(7));
        row.push("topic", Value::from("Fee Payment"));
        row.push("description", Value::from("Pay semester fees online"));
        store.insert("admin", row);

        let table = schema::find("admin").unwrap();
        let rows = store
            .fetch_matching(table, &build(table, &extract("fees")))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].get("id").is_none());
        assert_eq!(rows[0].columns().collect::<Vec<_>>(), ["topic", "description"]);
    }

    #[tokio::test]
    async fn test_failing_table() {
        let store = InMemoryStore::new();
        store.fail_on("library");
        let table = schema::find("library").unwrap();
        assert!(store
            .fetch_matching(table, &build(table, &extract("books")))
            .await
            .is_err());
        assert_eq!(store.scan_count(), 1);
    }

    #[tokio::test]
    async fn test_nothing_is_not_a_scan() {
        let store = InMemoryStore::new();
        let table = schema::find("library").unwrap();
        let rows = store
            .fetch_matching(table, &Predicate::Nothing)
            .await
            .unwrap();
        assert!(rows.is_empty());
        assert_eq!(store.scan_count(), 0);
    }
}
