use axum::{
    Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::post,
};
use sqlx::SqlitePool;

use crate::{
    AppState,
    payloads::{MatchResultPayload, NewEvent},
    responses::{AppResponse, Json, SuccessResponse},
    services::{match_service, recompute_locks::RecomputeLocks},
};

async fn record_result(
    Path(match_id): Path<u32>,
    State(pool): State<SqlitePool>,
    State(locks): State<RecomputeLocks>,
    Json(payload): Json<MatchResultPayload>,
) -> impl IntoResponse {
    match match_service::record_result(&pool, &locks, match_id, payload).await {
        Ok(report) => AppResponse::Success {
            payload: SuccessResponse::MatchUpdated { match_id, report },
        }
        .into_response(),
        Err(e) => e.into_response(),
    }
}

async fn add_event(
    Path(match_id): Path<u32>,
    State(pool): State<SqlitePool>,
    State(locks): State<RecomputeLocks>,
    Json(payload): Json<NewEvent>,
) -> impl IntoResponse {
    match match_service::add_event(&pool, &locks, match_id, payload).await {
        Ok((id, report)) => AppResponse::Success {
            payload: SuccessResponse::EventCreated { id, report },
        }
        .into_response(),
        Err(e) => e.into_response(),
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/{id}/result", post(record_result))
        .route("/{id}/events", post(add_event))
        .with_state(state)
}
