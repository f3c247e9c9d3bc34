use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::services::store::RecordStore;
use crate::utils::logging::*;
use crate::AppState;

pub async fn health_check() -> Json<Value> {
    log_health_check();

    Json(json!({
        "status": "healthy",
        "service": "tindo-roster",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub async fn ready_check(State(state): State<Arc<AppState>>) -> Result<Json<Value>, StatusCode> {
    log_status_check();

    // A failing count means the store lock is poisoned and the service can
    // no longer answer queries.
    let store_status = match state.store.count_believers() {
        Ok(_) => "connected",
        Err(_) => "unavailable",
    };

    let overall_ready = store_status == "connected";

    let response = json!({
        "ready": overall_ready,
        "service": "tindo-roster",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "dependencies": {
            "record_store": {
                "status": store_status
            }
        }
    });

    if overall_ready {
        Ok(Json(response))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

pub async fn status_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    log_status_check();

    let believers = state.store.count_believers().unwrap_or(0);
    let ranks = state.store.count_ranks().unwrap_or(0);
    let assignments = state.store.count_assignments().unwrap_or(0);

    Json(json!({
        "service": "tindo-roster",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "environment": std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()),
        "records": {
            "believers": believers,
            "ranks": ranks,
            "rankAssignments": assignments
        },
        "settings": {
            "defaultPageSize": state.settings.roster.default_page_size,
            "seedDefaultRanks": state.settings.roster.seed_default_ranks
        }
    }))
}
