use axum::{
    Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use sqlx::SqlitePool;

use crate::{
    AppState,
    models::phase::GroupId,
    responses::{AppResponse, SuccessResponse},
    services::standings_service,
};

async fn get_group_standings(
    Path(group): Path<String>,
    State(pool): State<SqlitePool>,
) -> impl IntoResponse {
    let group = match GroupId::try_from(group.as_str()) {
        Ok(group) => group,
        Err(e) => return e.into_response(),
    };
    match standings_service::group_standings(&pool, group).await {
        Ok(view) => Into::<AppResponse>::into((group, view)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn get_league_standings(
    Path(edition_id): Path<u32>,
    State(pool): State<SqlitePool>,
) -> impl IntoResponse {
    match standings_service::league_standings(&pool, edition_id).await {
        Ok(standings) => AppResponse::Success {
            payload: SuccessResponse::LeagueStandings {
                edition_id,
                standings,
            },
        }
        .into_response(),
        Err(e) => e.into_response(),
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/groups/{group}", get(get_group_standings))
        .route("/league/{edition_id}", get(get_league_standings))
        .with_state(state)
}
