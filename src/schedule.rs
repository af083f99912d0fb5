//! Day schedule lookup.
//!
//! Lists the schedule entries for one day, e.g. `campus schedule Tue`.
//! Matching on the day is exact, unlike free-text search.

use anyhow::{bail, Result};
use serde::Serialize;
use sqlx::{Row, SqlitePool};

use crate::config::Config;
use crate::db;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    pub building: String,
    pub room: String,
    pub event: String,
    pub start_time: String,
    pub end_time: String,
}

pub async fn schedule_for_day(pool: &SqlitePool, day: &str) -> Result<Vec<ScheduleEntry>> {
    let rows = sqlx::query(
        r#"
        SELECT COALESCE(building, '') AS building,
               COALESCE(room, '') AS room,
               COALESCE(event, '') AS event,
               COALESCE(start_time, '') AS start_time,
               COALESCE(end_time, '') AS end_time
        FROM schedules
        WHERE day = ?
        ORDER BY start_time ASC, id ASC
        "#,
    )
    .bind(day)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| ScheduleEntry {
            building: row.get("building"),
            room: row.get("room"),
            event: row.get("event"),
            start_time: row.get("start_time"),
            end_time: row.get("end_time"),
        })
        .collect())
}

/// Abbreviated weekday for today in local time, as stored in `day`.
pub fn today() -> String {
    chrono::Local::now().format("%a").to_string()
}

/// CLI entry point. Defaults to today's weekday when `day` is `None`.
pub async fn run_schedule(config: &Config, day: Option<String>) -> Result<()> {
    let day = day.unwrap_or_else(today);
    let day = day.trim();
    if day.is_empty() {
        bail!("day must not be empty");
    }

    let pool = db::connect(config).await?;
    let entries = schedule_for_day(&pool, day).await;
    pool.close().await;
    let entries = entries?;

    println!("Schedule for {}:", day);
    if entries.is_empty() {
        println!("  No events scheduled.");
        return Ok(());
    }
    for e in &entries {
        println!(
            "  Building: {}, Room: {}, Event: {}, {}-{}",
            e.building, e.room, e.event, e.start_time, e.end_time
        );
    }

    Ok(())
}
