//! Storage abstraction for the search pipeline.
//!
//! The [`Store`] trait is the only thing the aggregator knows about
//! storage, so the same pipeline runs over SQLite in production and over
//! [`InMemoryStore`] in tests.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;
pub mod sqlite;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::Row;
use crate::query::Predicate;
use crate::schema::TableDescriptor;

pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;

/// Read-only access to the searchable tables.
#[async_trait]
pub trait Store: Send + Sync {
    /// Return every row of `table` satisfying `predicate`, in storage order,
    /// built from the table's declared output columns.
    ///
    /// Callers never pass [`Predicate::Nothing`]; implementations may return
    /// an empty list for it without touching storage.
    async fn fetch_matching(
        &self,
        table: &TableDescriptor,
        predicate: &Predicate,
    ) -> Result<Vec<Row>>;
}
