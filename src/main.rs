use axum::{Router, extract::FromRef};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::Config,
    handlers::{brackets, events, history, matches, players, recompute, standings},
    services::recompute_locks::RecomputeLocks,
};

mod config;
mod errors;
mod handlers;
mod models;
mod payloads;
mod repositories;
mod responses;
mod services;

#[derive(Clone)]
struct AppState {
    pool: SqlitePool,
    locks: RecomputeLocks,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(input: &AppState) -> Self {
        input.pool.clone()
    }
}

impl FromRef<AppState> for RecomputeLocks {
    fn from_ref(input: &AppState) -> Self {
        input.locks.clone()
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tournament_stats=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };
    let pool = SqlitePoolOptions::new()
        .connect(&config.database_url)
        .await
        .unwrap();
    sqlx::migrate!().run(&pool).await.unwrap();
    let state = AppState {
        pool,
        locks: RecomputeLocks::default(),
    };
    let listener = TcpListener::bind(config.bind_addr).await.unwrap();
    tracing::info!("listening on {}", config.bind_addr);
    let app = Router::new()
        .nest("/standings", standings::routes(state.clone()))
        .nest("/players", players::routes(state.clone()))
        .nest("/brackets", brackets::routes(state.clone()))
        .nest("/history", history::routes(state.clone()))
        .nest("/recompute", recompute::routes(state.clone()))
        .nest("/matches", matches::routes(state.clone()))
        .nest("/events", events::routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive());
    axum::serve(listener, app).await.unwrap();
}
