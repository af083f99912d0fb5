//! HTTP front end for campus search.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/query` | Search all tables for `{"message": "..."}` |
//! | `GET`  | `/health` | Health check (returns version) |
//! | `GET`  | `/` | `index.html` from the static directory |
//! | `GET`  | `/static/*` | Files from the static directory |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "message must not be empty" } }
//! ```
//!
//! Error codes: `bad_request` (400), `timeout` (408), `internal` (500).

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::Instrument;

use crate::config::Config;
use crate::db;
use crate::error::SearchError;
use crate::models::MatchResult;
use crate::search::{search, validate_query};
use crate::store::{SqliteStore, Store};

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
struct AppState {
    store: Arc<dyn Store>,
    timeout: Duration,
}

/// Starts the HTTP server on `[server].bind` backed by the configured
/// SQLite database. Runs until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let pool = db::connect(config).await?;
    let store: Arc<dyn Store> = Arc::new(SqliteStore::new(pool));
    let app = router(store, config);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        static_dir = %config.server.static_dir.display(),
        "campus query server listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the router over an arbitrary store.
pub fn router(store: Arc<dyn Store>, config: &Config) -> Router {
    let state = AppState {
        store,
        timeout: Duration::from_secs(config.server.request_timeout_secs),
    };

    let static_dir = &config.server.static_dir;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/query", post(handle_query))
        .route("/health", get(handle_health))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        let status = match &err {
            SearchError::InvalidInput => StatusCode::BAD_REQUEST,
            SearchError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            SearchError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Storage details stay in the logs.
        let message = match &err {
            SearchError::Storage(_) => "internal storage failure".to_string(),
            other => other.to_string(),
        };
        AppError {
            status,
            code: err.code().to_string(),
            message,
        }
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ POST /api/query ============

#[derive(Deserialize)]
struct QueryRequest {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Serialize)]
struct QueryResponse {
    reply: String,
    hits: Vec<MatchResult>,
}

/// Handler for `POST /api/query`.
///
/// Rejects a missing, empty, or unparseable message with `400` before any
/// storage access. The search runs under the configured timeout; when it
/// expires the in-flight scan is dropped and `408` is returned.
async fn handle_query(
    State(state): State<AppState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, AppError> {
    let Json(req) = payload.map_err(|e| bad_request(e.body_text()))?;
    let text = validate_query(req.message.as_deref())?;

    let span = tracing::info_span!("query", request_id = %uuid::Uuid::new_v4());
    let response = tokio::time::timeout(state.timeout, search(state.store.as_ref(), text))
        .instrument(span)
        .await
        .map_err(|_| SearchError::Timeout(state.timeout))??;

    Ok(Json(QueryResponse {
        reply: response.summary,
        hits: response.groups,
    }))
}
