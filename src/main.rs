//! # Campus Query CLI (`campus`)
//!
//! ## Usage
//!
//! ```bash
//! campus --config ./config/campus.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `campus init` | Create the SQLite tables and seed sample data |
//! | `campus search "<text>"` | Search all tables and print the reply |
//! | `campus schedule [day]` | List schedule entries for a day |
//! | `campus serve` | Start the HTTP server |

use campus_query::{config, logging, migrate, schedule, search, server};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Campus Query — free-text search over campus information tables.
#[derive(Parser)]
#[command(
    name = "campus",
    about = "Campus Query — free-text search over campus information tables",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/campus.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the searchable tables and seed sample data.
    ///
    /// Idempotent: tables that already hold rows are not re-seeded.
    Init {
        /// Drop the tables first so the sample data is recreated from scratch.
        #[arg(long)]
        reset: bool,
    },

    /// Search all tables for the given text.
    ///
    /// Words shorter than three characters are ignored.
    Search {
        /// Free-text query.
        text: String,

        /// Print the grouped hits as JSON instead of the reply text.
        #[arg(long)]
        json: bool,
    },

    /// List schedule entries for a day (e.g. `Mon`). Defaults to today.
    Schedule {
        day: Option<String>,
    },

    /// Start the HTTP server.
    ///
    /// Binds to `[server].bind` and serves `POST /api/query`, `GET /health`
    /// and the static front end.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = config::load_config(&cli.config)?;
    logging::init(&cfg.logging);

    match cli.command {
        Commands::Init { reset } => {
            let seeded = migrate::run_init(&cfg, reset).await?;
            println!("Database initialized successfully.");
            println!("Seeded rows: {}", seeded);
        }
        Commands::Search { text, json } => {
            search::run_search(&cfg, &text, json).await?;
        }
        Commands::Schedule { day } => {
            schedule::run_schedule(&cfg, day).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
