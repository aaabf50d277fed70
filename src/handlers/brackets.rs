use axum::{
    Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use sqlx::SqlitePool;

use crate::{AppState, responses::AppResponse, services::bracket_service};

async fn get_brackets(
    Path(edition_id): Path<u32>,
    State(pool): State<SqlitePool>,
) -> impl IntoResponse {
    match bracket_service::edition_brackets(&pool, edition_id).await {
        Ok(brackets) => Into::<AppResponse>::into(brackets).into_response(),
        Err(e) => e.into_response(),
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/{edition_id}", get(get_brackets))
        .with_state(state)
}
