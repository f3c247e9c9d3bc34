// Believer roster service library
// Exposes modules for use by the binary and tests

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use services::store::RecordStore;

/// Shared application state, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub store: Arc<dyn RecordStore>,
}

/// Builds the service router with every route attached
pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health checks
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::ready_check))
        .route("/status", get(handlers::status_check))
        // Believers
        .route(
            "/believers",
            get(handlers::list_believers).post(handlers::create_believer),
        )
        .route("/believers/export", get(handlers::export_believers))
        .route(
            "/believers/duplicate-check",
            post(handlers::duplicate_check),
        )
        .route(
            "/believers/:id",
            get(handlers::get_believer)
                .patch(handlers::update_believer)
                .delete(handlers::delete_believer),
        )
        .route(
            "/believers/:id/ranks",
            post(handlers::create_rank_assignment),
        )
        .route(
            "/believers/:id/ranks/:assignment_id",
            delete(handlers::delete_rank_assignment),
        )
        // Rank taxonomy
        .route(
            "/ranks",
            get(handlers::list_ranks).post(handlers::create_rank),
        )
        .route(
            "/ranks/:id",
            get(handlers::get_rank)
                .patch(handlers::update_rank)
                .delete(handlers::delete_rank),
        )
        .with_state(state)
}
