//! Free-text search across the registered tables.
//!
//! The pipeline is: extract tokens, build one predicate per registered
//! table, scan each table in registry order, keep the tables that matched,
//! and render a reply summary. It is stateless and re-run in full for every
//! request.
//!
//! A storage failure on any table fails the whole search; groups gathered
//! from earlier tables are dropped with it.

use anyhow::Result;
use serde::Serialize;

use crate::config::Config;
use crate::db;
use crate::error::SearchError;
use crate::models::{MatchResult, SearchResponse};
use crate::query;
use crate::schema::{self, TableDescriptor};
use crate::store::{SqliteStore, Store};
use crate::tokenize;

/// Reply used when no table produced a row.
pub const NO_RESULTS_MESSAGE: &str =
    "Sorry, I couldn't find anything in the database for your query.";

const SUMMARY_HEADER: &str = "Here is what I found:\n";

/// Trim request text and reject it when nothing is left.
pub fn validate_query(text: Option<&str>) -> Result<&str, SearchError> {
    match text.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t),
        _ => Err(SearchError::InvalidInput),
    }
}

/// Search every registered table for `text`.
pub async fn search(store: &dyn Store, text: &str) -> Result<SearchResponse, SearchError> {
    search_tables(store, schema::tables(), text).await
}

/// Search an explicit list of tables, in the order given.
pub async fn search_tables(
    store: &dyn Store,
    tables: &[TableDescriptor],
    text: &str,
) -> Result<SearchResponse, SearchError> {
    let tokens = tokenize::extract(text);
    if tokens.is_empty() {
        tracing::debug!("no tokens in query, skipping storage");
        return Ok(SearchResponse::empty());
    }
    tracing::debug!(tokens = tokens.len(), "extracted query tokens");

    let mut groups = Vec::new();
    for table in tables {
        let predicate = query::build(table, &tokens);
        if predicate.matches_nothing() {
            tracing::debug!(table = table.name, "no searchable columns, skipping");
            continue;
        }

        let rows = store
            .fetch_matching(table, &predicate)
            .await
            .map_err(|e| {
                tracing::error!(table = table.name, error = %e, "table scan failed");
                SearchError::Storage(e)
            })?;

        tracing::debug!(table = table.name, rows = rows.len(), "table scanned");
        if !rows.is_empty() {
            groups.push(MatchResult {
                table: table.name.to_string(),
                rows,
            });
        }
    }

    let summary = render_summary(&groups);
    tracing::info!(
        tokens = tokens.len(),
        tables = groups.len(),
        rows = groups.iter().map(|g| g.rows.len()).sum::<usize>(),
        "search complete"
    );

    Ok(SearchResponse { groups, summary })
}

/// Human-readable reply: a header, then one block per table with one
/// `"  - col: value, ..."` line per row.
pub fn render_summary(groups: &[MatchResult]) -> String {
    if groups.is_empty() {
        return NO_RESULTS_MESSAGE.to_string();
    }

    let mut reply = String::from(SUMMARY_HEADER);
    for group in groups {
        reply.push_str(&format!("\n🔹 {}:\n", display_name(&group.table)));
        for row in &group.rows {
            reply.push_str("  - ");
            reply.push_str(&row.describe());
            reply.push('\n');
        }
    }
    reply
}

fn display_name(table: &str) -> String {
    if let Some(t) = schema::find(table) {
        return t.display_name.to_string();
    }
    let mut chars = table.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// JSON shape printed by `campus search --json`.
#[derive(Serialize)]
struct CliOutput<'a> {
    reply: &'a str,
    hits: &'a [MatchResult],
}

/// CLI entry point: search the configured database and print the reply.
pub async fn run_search(config: &Config, text: &str, json: bool) -> Result<()> {
    let text = validate_query(Some(text))?;

    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool);
    let result = search(&store, text).await;
    store.pool().close().await;
    let response = result?;

    if json {
        let out = CliOutput {
            reply: &response.summary,
            hits: &response.groups,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", response.summary);
        if response.is_empty() {
            println!();
        }
    }

    Ok(())
}
