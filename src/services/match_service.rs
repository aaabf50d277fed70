use std::collections::BTreeSet;

use serde::Serialize;

use crate::{
    errors::AppError,
    models::{group_stats::teams_of, phase::EventType, player_stats::touched_players},
    payloads::{MatchResultPayload, NewEvent},
    repositories::{
        event_repo::{self, select_match_events},
        match_repo::{self, update_match_result},
        player_repo::get_player,
    },
    services::{
        edition_service::match_edition,
        player_stats_service::{existing_players, rebuild_players},
        recompute_locks::RecomputeLocks,
        stats_service::{RecomputeReport, TeamScope, rebuild_tables},
    },
};

/// What the recompute after a mutation rewrote.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub tables: Option<RecomputeReport>,
    pub players: RecomputeReport,
}

/// Stores a match result and brings the tables of both teams and the
/// counters of everyone involved back in line with it.
pub async fn record_result(
    pool: &sqlx::SqlitePool,
    locks: &RecomputeLocks,
    match_id: u32,
    payload: MatchResultPayload,
) -> Result<SyncReport, AppError> {
    if payload.is_finished && (payload.home_score.is_none() || payload.away_score.is_none()) {
        return Err(AppError::InvalidScore);
    }
    let (before, edition) = match_edition(pool, match_id).await?;
    let _guard = locks.acquire(edition.id).await;

    let events = select_match_events(pool, match_id).await?;
    let mut players = touched_players(&before, &events);

    let mut tx = pool.begin().await?;
    update_match_result(&mut tx, match_id, &payload).await?;
    tx.commit().await?;
    tracing::debug!("stored result of match {}", match_id);

    let after = match_repo::get_match(pool, match_id)
        .await?
        .ok_or(AppError::MatchNotFound(match_id))?;
    players.extend(touched_players(&after, &events));

    let tables = rebuild_tables(pool, &edition, &TeamScope::Teams(teams_of(&after))).await?;
    let players = existing_players(pool, players).await?;
    let players = rebuild_players(pool, &edition, &players).await?;
    Ok(SyncReport {
        tables: Some(tables),
        players,
    })
}

pub async fn add_event(
    pool: &sqlx::SqlitePool,
    locks: &RecomputeLocks,
    match_id: u32,
    payload: NewEvent,
) -> Result<(u32, SyncReport), AppError> {
    let event_type = EventType::try_from(payload.event_type.as_str())?;
    let (m, edition) = match_edition(pool, match_id).await?;
    get_player(pool, payload.player_id)
        .await?
        .ok_or(AppError::PlayerNotFound(payload.player_id))?;
    let _guard = locks.acquire(edition.id).await;

    let rowid =
        event_repo::create_event(pool, match_id, payload.player_id, &event_type.to_string())
            .await?;
    let id = u32::try_from(rowid).map_err(|_| {
        tracing::error!("event rowid {} does not fit an event id", rowid);
        AppError::Unknown
    })?;
    tracing::debug!("added {} event {} to match {}", event_type, id, match_id);

    let events = select_match_events(pool, match_id).await?;
    let players = existing_players(pool, touched_players(&m, &events)).await?;
    let players = rebuild_players(pool, &edition, &players).await?;
    Ok((
        id,
        SyncReport {
            tables: None,
            players,
        },
    ))
}

pub async fn remove_event(
    pool: &sqlx::SqlitePool,
    locks: &RecomputeLocks,
    event_id: u32,
) -> Result<SyncReport, AppError> {
    let event = event_repo::get_event(pool, event_id)
        .await?
        .ok_or(AppError::EventNotFound(event_id))?;
    let (m, edition) = match_edition(pool, event.match_id).await?;
    let _guard = locks.acquire(edition.id).await;

    // scope is taken while the event still exists
    let events = select_match_events(pool, event.match_id).await?;
    let scope: BTreeSet<u32> = touched_players(&m, &events);
    event_repo::delete_event(pool, event_id).await?;
    tracing::debug!("removed event {} from match {}", event_id, event.match_id);

    let players = existing_players(pool, scope).await?;
    let players = rebuild_players(pool, &edition, &players).await?;
    Ok(SyncReport {
        tables: None,
        players,
    })
}
