use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{NewRank, RankUpdate};
use crate::services::store::RecordStore;
use crate::utils::logging::*;
use crate::utils::AppError;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankListQuery {
    pub include_inactive: Option<bool>,
}

pub async fn list_ranks(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RankListQuery>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/ranks", "GET");

    let include_inactive = query.include_inactive.unwrap_or(false);
    let ranks = state.store.list_ranks(include_inactive)?;

    // Keyed by group, in taxonomy order; the flat list is already sorted by
    // (group, order).
    let mut grouped: Map<String, Value> = Map::new();
    for rank in &ranks {
        let entry = grouped
            .entry(rank.group.as_str().to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(items) = entry {
            items.push(serde_json::to_value(rank)?);
        }
    }

    Ok(Json(json!({
        "ranks": ranks,
        "grouped": grouped
    })))
}

pub async fn create_rank(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewRank>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    log_request_received("/ranks", "POST");

    if payload.code.trim().is_empty() {
        log_validation_error("code", "must not be blank");
        return Err(AppError::ValidationError("code is required".to_string()));
    }
    if payload.display_name.trim().is_empty() {
        log_validation_error("displayName", "must not be blank");
        return Err(AppError::ValidationError(
            "displayName is required".to_string(),
        ));
    }
    if payload.order <= 0 {
        log_validation_error("order", "must be a positive integer");
        return Err(AppError::ValidationError(
            "order must be a positive integer".to_string(),
        ));
    }

    let rank = state.store.create_rank(payload)?;
    log_rank_created(&rank.code, &rank.display_name);

    Ok((StatusCode::CREATED, Json(serde_json::to_value(rank)?)))
}

pub async fn get_rank(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/ranks/:id", "GET");

    let rank = state.store.get_rank(id)?;
    let assignments = state.store.assignments_for_rank(id)?;

    let mut value = serde_json::to_value(&rank)?;
    value["assignments"] = serde_json::to_value(assignments)?;
    Ok(Json(value))
}

pub async fn update_rank(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(update): Json<RankUpdate>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/ranks/:id", "PATCH");

    if update
        .display_name
        .as_deref()
        .is_some_and(|name| name.trim().is_empty())
    {
        log_validation_error("displayName", "must not be blank");
        return Err(AppError::ValidationError(
            "displayName must not be blank".to_string(),
        ));
    }

    let rank = state.store.update_rank(id, update)?;
    Ok(Json(serde_json::to_value(rank)?))
}

pub async fn delete_rank(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/ranks/:id", "DELETE");

    state.store.delete_rank(id)?;
    Ok(Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RosterSettings, ServerSettings, Settings};
    use crate::services::MemoryStore;
    use axum::response::IntoResponse;

    fn test_state() -> Arc<AppState> {
        let store = MemoryStore::new();
        store.seed_default_ranks().unwrap();
        Arc::new(AppState {
            settings: Settings {
                server: ServerSettings {
                    host: "127.0.0.1".to_string(),
                    port: 0,
                },
                roster: RosterSettings {
                    default_page_size: 20,
                    seed_default_ranks: true,
                },
            },
            store: Arc::new(store),
        })
    }

    #[tokio::test]
    async fn test_list_ranks_grouped_by_body() {
        let state = test_state();
        let Json(body) = list_ranks(State(state), Query(RankListQuery::default()))
            .await
            .unwrap();

        assert_eq!(body["ranks"].as_array().unwrap().len(), 12);
        assert_eq!(
            body["grouped"]["CUU_TRUNG_DAI"].as_array().unwrap().len(),
            7
        );
        assert_eq!(body["grouped"]["PHUOC_THIEN"].as_array().unwrap().len(), 3);
        assert_eq!(
            body["grouped"]["HIEP_THIEN_DAI"].as_array().unwrap().len(),
            2
        );
    }

    #[tokio::test]
    async fn test_create_rank_validates_and_conflicts() {
        let state = test_state();

        let invalid: NewRank = serde_json::from_value(json!({
            "group": "PHUOC_THIEN",
            "code": "",
            "displayName": "Dự Thiện",
            "order": 1
        }))
        .unwrap();
        assert!(matches!(
            create_rank(State(state.clone()), Json(invalid)).await,
            Err(AppError::ValidationError(_))
        ));

        // Seeded code collides.
        let duplicate: NewRank = serde_json::from_value(json!({
            "group": "PHUOC_THIEN",
            "code": "DU_THIEN",
            "displayName": "Dự Thiện",
            "order": 1
        }))
        .unwrap();
        let response = create_rank(State(state), Json(duplicate))
            .await
            .unwrap_err()
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_and_delete_rank() {
        let state = test_state();
        let rank = state.store.list_ranks(true).unwrap().remove(0);

        let Json(updated) = update_rank(
            State(state.clone()),
            Path(rank.id),
            Json(RankUpdate {
                is_active: Some(false),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(updated["isActive"], json!(false));

        let Json(deleted) = delete_rank(State(state), Path(rank.id)).await.unwrap();
        assert_eq!(deleted["success"], json!(true));
    }
}
