//! HTTP routes.
//!
//! - `GET /api/{category}?ano=&subcategoria=` fetches and extracts one table
//! - `GET /api/categories` lists categories and their subcategories
//! - `GET /health` reports liveness

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use vitis_core::{Catalog, FailureKind, Outcome, Vitis};

/// Shared handler state.
pub struct AppState {
    pub vitis: Vitis,
}

/// Selection filters accepted on data routes.
#[derive(Debug, Default, Deserialize)]
pub struct DataQuery {
    #[serde(alias = "year")]
    pub ano: Option<String>,
    #[serde(alias = "subcategory")]
    pub subcategoria: Option<String>,
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/categories", get(categories))
        .route("/api/{category}", get(category_data))
        .with_state(state)
}

fn status_for(outcome: &Outcome) -> StatusCode {
    match outcome {
        Outcome::Extracted(_) => StatusCode::OK,
        Outcome::Failed(FailureKind::InvalidSelection, _) => StatusCode::BAD_REQUEST,
        Outcome::Failed(FailureKind::Fetch, _) => StatusCode::BAD_GATEWAY,
        Outcome::Failed(FailureKind::Processing, _) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok", version: env!("CARGO_PKG_VERSION") })
}

async fn categories(State(state): State<Arc<AppState>>) -> Json<Catalog> {
    Json(state.vitis.catalog())
}

async fn category_data(
    State(state): State<Arc<AppState>>, Path(category): Path<String>, Query(query): Query<DataQuery>,
) -> (StatusCode, Json<Outcome>) {
    let outcome = state
        .vitis
        .fetch_and_extract(&category, query.ano.as_deref(), query.subcategoria.as_deref())
        .await;

    match &outcome {
        Outcome::Extracted(result) => {
            tracing::info!(%category, rows = result.rows.len(), source_url = %result.source_url, "served table")
        }
        Outcome::Failed(kind, payload) => {
            tracing::warn!(%category, ?kind, error = %payload.error, "request failed")
        }
    }

    (status_for(&outcome), Json(outcome))
}
