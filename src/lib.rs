//! # Campus Query
//!
//! Free-text search over a small set of campus information tables
//! (schedules, dining, library, administration).
//!
//! A query like `"Can I get rice today?"` is split into tokens, every
//! registered table is scanned for rows where any searchable column
//! contains any token, and the matching rows come back grouped by table in
//! registry order together with a readable reply.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐   ┌──────────┐   ┌──────────┐   ┌───────────┐
//! │ tokenize  │──▶│  query   │──▶│  store   │──▶│  search   │
//! │ text→set  │   │ predicate│   │ SQLite   │   │ group+reply│
//! └───────────┘   └────▲─────┘   └──────────┘   └─────┬─────┘
//!                      │                              │
//!                 ┌────┴─────┐                 ┌──────┴──────┐
//!                 │  schema  │                 │ CLI / HTTP  │
//!                 │ registry │                 │  (campus)   │
//!                 └──────────┘                 └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! campus init                      # create and seed the database
//! campus search "where is the chemistry lab"
//! campus schedule Tue
//! campus serve                     # POST /api/query
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`tokenize`] | Search token extraction |
//! | [`schema`] | Searchable table registry |
//! | [`query`] | Per-table match predicates |
//! | [`store`] | Storage trait, SQLite and in-memory stores |
//! | [`search`] | Result aggregation and reply rendering |
//! | [`models`] | Rows, values, grouped responses |
//! | [`error`] | Search error taxonomy |
//! | [`schedule`] | Day schedule lookup |
//! | [`server`] | HTTP server |
//! | [`config`] | TOML configuration parsing |
//! | [`db`] | Database connection |
//! | [`migrate`] | Table creation and sample data |
//! | [`logging`] | `tracing` subscriber setup |

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod migrate;
pub mod models;
pub mod query;
pub mod schedule;
pub mod schema;
pub mod search;
pub mod server;
pub mod store;
pub mod tokenize;
