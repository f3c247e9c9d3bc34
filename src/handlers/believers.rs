use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{
    Believer, BelieverListQuery, BelieverUpdate, NewBeliever, NewRankAssignment,
    RankAssignmentWithRank,
};
use crate::services::export::believers_to_csv;
use crate::services::store::RecordStore;
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};
use crate::AppState;

/// Believer plus its rank assignments, as one JSON object
fn believer_json(
    believer: &Believer,
    assignments: Vec<RankAssignmentWithRank>,
) -> AppResult<Value> {
    let mut value = serde_json::to_value(believer)?;
    value["rankAssignments"] = serde_json::to_value(assignments)?;
    Ok(value)
}

pub async fn list_believers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BelieverListQuery>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/believers", "GET");

    let filter = query.into_filter(state.settings.roster.default_page_size);
    let page = state.store.list_believers(&filter)?;

    let mut data = Vec::with_capacity(page.data.len());
    for believer in &page.data {
        // List rows carry only the most recent decision.
        let mut assignments = state.store.assignments_for_believer(believer.id)?;
        assignments.truncate(1);
        data.push(believer_json(believer, assignments)?);
    }

    Ok(Json(json!({
        "data": data,
        "pagination": page.pagination
    })))
}

pub async fn create_believer(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewBeliever>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    log_request_received("/believers", "POST");

    if payload.full_name.trim().is_empty() {
        log_validation_error("fullName", "must not be blank");
        return Err(AppError::ValidationError("fullName is required".to_string()));
    }

    let believer = state.store.create_believer(payload)?;
    let assignments = state.store.assignments_for_believer(believer.id)?;

    log_believer_created(&believer.id.to_string(), &believer.full_name);

    Ok((
        StatusCode::CREATED,
        Json(believer_json(&believer, assignments)?),
    ))
}

pub async fn get_believer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/believers/:id", "GET");

    let believer = state.store.get_believer(id)?;
    let assignments = state.store.assignments_for_believer(id)?;
    Ok(Json(believer_json(&believer, assignments)?))
}

pub async fn update_believer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(update): Json<BelieverUpdate>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/believers/:id", "PATCH");

    if update
        .full_name
        .as_deref()
        .is_some_and(|name| name.trim().is_empty())
    {
        log_validation_error("fullName", "must not be blank");
        return Err(AppError::ValidationError(
            "fullName must not be blank".to_string(),
        ));
    }

    let believer = state.store.update_believer(id, update)?;
    let assignments = state.store.assignments_for_believer(id)?;

    log_believer_updated(&believer.id.to_string(), &believer.full_name);

    Ok(Json(believer_json(&believer, assignments)?))
}

pub async fn delete_believer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/believers/:id", "DELETE");

    state.store.delete_believer(id)?;
    log_believer_deleted(&id.to_string());

    Ok(Json(json!({ "success": true })))
}

pub async fn export_believers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BelieverListQuery>,
) -> Result<Response, AppError> {
    log_request_received("/believers/export", "GET");

    let filter = query.into_filter(state.settings.roster.default_page_size);
    let believers = state.store.export_believers(&filter)?;
    let csv = believers_to_csv(&believers);

    log_export(believers.len());

    let filename = format!(
        "danh-sach-tin-do-{}.csv",
        chrono::Utc::now().format("%Y-%m-%d")
    );

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "text/csv; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    )
        .into_response())
}

pub async fn create_rank_assignment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NewRankAssignment>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    log_request_received("/believers/:id/ranks", "POST");

    let assignment = state.store.create_assignment(id, payload)?;
    Ok((StatusCode::CREATED, Json(serde_json::to_value(assignment)?)))
}

pub async fn delete_rank_assignment(
    State(state): State<Arc<AppState>>,
    Path((id, assignment_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/believers/:id/ranks/:assignment_id", "DELETE");

    state.store.delete_assignment(id, assignment_id)?;
    Ok(Json(json!({ "success": true })))
}
