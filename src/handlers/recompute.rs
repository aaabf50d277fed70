use axum::{
    Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::post,
};
use sqlx::SqlitePool;

use crate::{
    AppState,
    responses::AppResponse,
    services::{player_stats_service, recompute_locks::RecomputeLocks, stats_service},
};

async fn recompute_groups(
    State(pool): State<SqlitePool>,
    State(locks): State<RecomputeLocks>,
) -> impl IntoResponse {
    match stats_service::recompute_tables(&pool, &locks).await {
        Ok(report) => Into::<AppResponse>::into(report).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn recompute_match_groups(
    Path(match_id): Path<u32>,
    State(pool): State<SqlitePool>,
    State(locks): State<RecomputeLocks>,
) -> impl IntoResponse {
    match stats_service::recompute_tables_for_match(&pool, &locks, match_id).await {
        Ok(report) => Into::<AppResponse>::into(report).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn recompute_players(
    State(pool): State<SqlitePool>,
    State(locks): State<RecomputeLocks>,
) -> impl IntoResponse {
    match player_stats_service::recompute_player_stats(&pool, &locks).await {
        Ok(report) => Into::<AppResponse>::into(report).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn recompute_match_players(
    Path(match_id): Path<u32>,
    State(pool): State<SqlitePool>,
    State(locks): State<RecomputeLocks>,
) -> impl IntoResponse {
    match player_stats_service::recompute_player_stats_for_match(&pool, &locks, match_id).await {
        Ok(report) => Into::<AppResponse>::into(report).into_response(),
        Err(e) => e.into_response(),
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/groups", post(recompute_groups))
        .route("/groups/match/{id}", post(recompute_match_groups))
        .route("/players", post(recompute_players))
        .route("/players/match/{id}", post(recompute_match_players))
        .with_state(state)
}
