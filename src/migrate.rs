//! Database bootstrap: table creation and sample data.
//!
//! Table DDL is derived from the schema registry, so the store always has
//! exactly the columns the search pipeline reads. Every table gets an
//! integer identifier plus its declared output columns as TEXT.

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db;
use crate::schema::{self, TableDescriptor};

/// Sample rows per table, values in the table's declared column order.
const SEED_ROWS: &[(&str, &[&[&str]])] = &[
    (
        "schedules",
        &[
            &["Main Hall", "101", "Linear Algebra Lecture", "Mon", "09:00", "10:30"],
            &["Science Block", "210", "Organic Chemistry Lab", "Tue", "11:00", "13:00"],
            &["Engineering Block", "305", "Programming Basics", "Wed", "10:00", "11:30"],
            &["Auditorium", "001", "Guest Lecture on AI", "Thu", "14:00", "16:00"],
        ],
    ),
    (
        "dining",
        &[
            &[
                "North Canteen",
                "07:30-20:00",
                "Breakfast: Idli/Vada; Lunch: Rice, Dal; Dinner: Chapati & Veg Curry",
                "Veg options available",
            ],
            &[
                "South Canteen",
                "10:00-22:00",
                "Snacks, Coffee, Burgers, Sandwiches",
                "Accepts student card",
            ],
            &[
                "East Canteen",
                "08:00-21:00",
                "South Indian, North Indian, Salads",
                "Offers student discounts",
            ],
        ],
    ),
    (
        "library",
        &[
            &["Borrowing", "08:00-22:00", "library@campus.edu", "Return books within 2 weeks"],
            &["Study Rooms", "08:00-20:00", "rooms@campus.edu", "Book via portal"],
            &[
                "Research Section",
                "09:00-18:00",
                "research@campus.edu",
                "Access restricted to research students",
            ],
        ],
    ),
    (
        "admin",
        &[
            &[
                "Transcript Request",
                "Fill online form; 5 working days",
                "registry@campus.edu",
                "https://campus.edu/transcripts",
            ],
            &[
                "Fee Payment",
                "Pay semester fees online or at admin office",
                "finance@campus.edu",
                "https://campus.edu/fees",
            ],
        ],
    ),
];

/// `campus init`: create tables, optionally dropping them first, then seed
/// any table that is still empty. Returns the number of rows inserted.
pub async fn run_init(config: &Config, reset: bool) -> Result<u64> {
    let pool = db::connect(config).await?;

    if reset {
        drop_tables(&pool).await?;
    }
    create_tables(&pool).await?;
    let seeded = seed_sample_data(&pool).await?;

    pool.close().await;
    Ok(seeded)
}

pub async fn create_tables(pool: &SqlitePool) -> Result<()> {
    for table in schema::tables() {
        sqlx::query(&create_table_sql(table))
            .execute(pool)
            .await
            .with_context(|| format!("failed to create table '{}'", table.name))?;
    }
    Ok(())
}

pub async fn drop_tables(pool: &SqlitePool) -> Result<()> {
    for table in schema::tables() {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table.name))
            .execute(pool)
            .await?;
    }
    tracing::info!("dropped searchable tables");
    Ok(())
}

/// Insert the sample rows into every empty table. Tables that already hold
/// data are left alone, so running this twice does not duplicate rows.
pub async fn seed_sample_data(pool: &SqlitePool) -> Result<u64> {
    let mut inserted = 0;
    let mut tx = pool.begin().await?;

    for (name, rows) in SEED_ROWS {
        let table = schema::find(name)
            .with_context(|| format!("seed data for unregistered table '{}'", name))?;

        let existing: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table.name))
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            tracing::debug!(table = table.name, existing, "table already populated");
            continue;
        }

        let sql = insert_sql(table);
        for values in rows.iter() {
            let mut query = sqlx::query(&sql);
            for value in values.iter() {
                query = query.bind(*value);
            }
            inserted += query.execute(&mut *tx).await?.rows_affected();
        }
        tracing::info!(table = table.name, rows = rows.len(), "seeded table");
    }

    tx.commit().await?;
    Ok(inserted)
}

fn create_table_sql(table: &TableDescriptor) -> String {
    let columns: Vec<String> = table
        .columns
        .iter()
        .map(|c| format!("{} TEXT", c))
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({} INTEGER PRIMARY KEY, {})",
        table.name,
        table.id_column,
        columns.join(", ")
    )
}

fn insert_sql(table: &TableDescriptor) -> String {
    let placeholders = vec!["?"; table.columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table.name,
        table.columns.join(", "),
        placeholders
    )
}
