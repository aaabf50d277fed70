use axum::{
    Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::delete,
};
use sqlx::SqlitePool;

use crate::{
    AppState,
    responses::{AppResponse, SuccessResponse},
    services::{match_service, recompute_locks::RecomputeLocks},
};

async fn remove_event(
    Path(id): Path<u32>,
    State(pool): State<SqlitePool>,
    State(locks): State<RecomputeLocks>,
) -> impl IntoResponse {
    match match_service::remove_event(&pool, &locks, id).await {
        Ok(report) => AppResponse::Success {
            payload: SuccessResponse::EventRemoved { id, report },
        }
        .into_response(),
        Err(e) => e.into_response(),
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/{id}", delete(remove_event))
        .with_state(state)
}
