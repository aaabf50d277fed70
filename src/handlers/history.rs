use axum::{Router, extract::State, response::IntoResponse, routing::get};
use sqlx::SqlitePool;

use crate::{
    AppState,
    responses::{AppResponse, SuccessResponse},
    services::historical_service,
};

async fn get_all_time_standings(State(pool): State<SqlitePool>) -> impl IntoResponse {
    match historical_service::all_time_standings(&pool).await {
        Ok(standings) => AppResponse::Success {
            payload: SuccessResponse::AllTimeStandings { standings },
        }
        .into_response(),
        Err(e) => e.into_response(),
    }
}

async fn get_all_time_scorers(State(pool): State<SqlitePool>) -> impl IntoResponse {
    match historical_service::all_time_scorers(&pool).await {
        Ok(scorers) => Into::<AppResponse>::into(scorers).into_response(),
        Err(e) => e.into_response(),
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/teams", get(get_all_time_standings))
        .route("/scorers", get(get_all_time_scorers))
        .with_state(state)
}
