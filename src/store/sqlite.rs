//! SQLite-backed [`Store`] implementation.
//!
//! Each scan draws a connection from the pool for one parameterized SELECT
//! and hands it back when the query future completes or is dropped. The
//! SELECT narrows the table to candidate rows; [`Predicate::matches`] then
//! applies the same case folding as every other store.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row as _, SqlitePool, TypeInfo, ValueRef};

use crate::models::{Row, Value};
use crate::query::Predicate;
use crate::schema::TableDescriptor;

use super::Store;

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn fetch_matching(
        &self,
        table: &TableDescriptor,
        predicate: &Predicate,
    ) -> Result<Vec<Row>> {
        let stmt = match predicate.to_sql(table) {
            Some(stmt) => stmt,
            None => return Ok(Vec::new()),
        };

        let candidates = sqlx::query(&stmt.sql)
            .bind(stmt.patterns_json())
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("failed to scan table '{}'", table.name))?;

        let mut rows = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            let row = decode_row(table, candidate)?;
            if predicate.matches(&row) {
                rows.push(row);
            }
        }
        Ok(rows)
    }
}

/// Build a [`Row`] from the table's declared output columns, positionally.
fn decode_row(table: &TableDescriptor, row: &SqliteRow) -> Result<Row> {
    let mut out = Row::new();
    for (idx, col) in table.columns.iter().enumerate() {
        out.push(*col, decode_value(row, idx)?);
    }
    Ok(out)
}

fn decode_value(row: &SqliteRow, idx: usize) -> Result<Value> {
    let raw = row.try_get_raw(idx)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let type_name = raw.type_info().name().to_string();
    let value = match type_name.as_str() {
        "INTEGER" => Value::Integer(row.try_get(idx)?),
        "REAL" => Value::Real(row.try_get(idx)?),
        "BLOB" => {
            let bytes: Vec<u8> = row.try_get(idx)?;
            Value::Text(String::from_utf8_lossy(&bytes).into_owned())
        }
        _ => Value::Text(row.try_get(idx)?),
    };
    Ok(value)
}
