use axum::{
    Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use sqlx::SqlitePool;

use crate::{
    AppState, models::player_stats::LeaderboardCategory, responses::AppResponse,
    services::player_stats_service,
};

async fn get_leaderboard(
    Path(category): Path<String>,
    State(pool): State<SqlitePool>,
) -> impl IntoResponse {
    let category = match LeaderboardCategory::try_from(category.as_str()) {
        Ok(category) => category,
        Err(e) => return e.into_response(),
    };
    match player_stats_service::leaderboard(&pool, category).await {
        Ok(entries) => Into::<AppResponse>::into((category, entries)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/leaderboard/{category}", get(get_leaderboard))
        .with_state(state)
}
