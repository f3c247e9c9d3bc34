use axum::{extract::State, response::Json};
use std::sync::Arc;

use namematch::{find_duplicates, surname_token};

use crate::models::{DuplicateCheckRequest, DuplicateCheckResponse};
use crate::services::store::RecordStore;
use crate::utils::logging::*;
use crate::utils::AppError;
use crate::AppState;

/// `POST /believers/duplicate-check`
///
/// Read-only screening before a registration is saved. The candidate pool is
/// narrowed in the store by the first token of the normalized name, then
/// ranked by the matching core; a missing or blank name answers with an
/// empty list rather than an error. Results are advisory: the form shows
/// them as a warning for the operator to confirm.
pub async fn duplicate_check(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DuplicateCheckRequest>,
) -> Result<Json<DuplicateCheckResponse>, AppError> {
    log_request_received("/believers/duplicate-check", "POST");

    let Some(token) = payload.full_name.as_deref().and_then(surname_token) else {
        return Ok(Json(DuplicateCheckResponse {
            candidates: Vec::new(),
        }));
    };

    let pool = state.store.find_candidates_by_surname(&token)?;
    let query = payload.into_query();
    let candidates = find_duplicates(&query, &pool);

    log_duplicate_check(&query.full_name, pool.len(), candidates.len());

    Ok(Json(DuplicateCheckResponse { candidates }))
}
