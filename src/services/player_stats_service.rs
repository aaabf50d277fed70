use std::collections::{BTreeSet, HashSet};

use crate::{
    errors::AppError,
    models::player_stats::{self, LeaderboardCategory, LeaderboardEntry, touched_players},
    repositories::{
        edition_repo::DbEdition,
        event_repo::{select_edition_events, select_match_events},
        match_repo::select_edition_matches,
        player_repo::{list_players, write_player_counters},
        team_repo::team_map,
    },
    services::{
        edition_service::{current_edition, match_edition},
        recompute_locks::RecomputeLocks,
        stats_service::RecomputeReport,
    },
};

/// Rebuilds the season counters of every player from the current edition.
pub async fn recompute_player_stats(
    pool: &sqlx::SqlitePool,
    locks: &RecomputeLocks,
) -> Result<RecomputeReport, AppError> {
    let edition = current_edition(pool).await?;
    let _guard = locks.acquire(edition.id).await;
    let players: BTreeSet<u32> = list_players(pool).await?.iter().map(|p| p.id).collect();
    rebuild_players(pool, &edition, &players).await
}

/// Rebuilds the counters of the players involved in `match_id`, replaying
/// their whole season in the match's own edition.
pub async fn recompute_player_stats_for_match(
    pool: &sqlx::SqlitePool,
    locks: &RecomputeLocks,
    match_id: u32,
) -> Result<RecomputeReport, AppError> {
    let (m, edition) = match_edition(pool, match_id).await?;
    let _guard = locks.acquire(edition.id).await;
    let events = select_match_events(pool, match_id).await?;
    let players = existing_players(pool, touched_players(&m, &events)).await?;
    rebuild_players(pool, &edition, &players).await
}

/// Drops ids of players that no longer exist.
pub(crate) async fn existing_players(
    pool: &sqlx::SqlitePool,
    players: BTreeSet<u32>,
) -> Result<BTreeSet<u32>, AppError> {
    let known: HashSet<u32> = list_players(pool).await?.iter().map(|p| p.id).collect();
    Ok(players
        .into_iter()
        .filter(|id| {
            let exists = known.contains(id);
            if !exists {
                tracing::warn!("player {} no longer exists, skipping", id);
            }
            exists
        })
        .collect())
}

/// Reset and replay of the counters of `players`. Callers hold the edition's
/// recompute lock.
pub(crate) async fn rebuild_players(
    pool: &sqlx::SqlitePool,
    edition: &DbEdition,
    players: &BTreeSet<u32>,
) -> Result<RecomputeReport, AppError> {
    let matches = select_edition_matches(pool, edition.id).await?;
    let events = select_edition_events(pool, edition.id).await?;
    let counters = player_stats::replay(edition.id, players, &matches, &events);
    let replayed = matches.iter().filter(|m| m.is_finished).count();

    let mut tx = pool.begin().await?;
    for (player_id, c) in counters.iter() {
        write_player_counters(&mut tx, *player_id, c).await?;
    }
    tx.commit().await?;

    tracing::debug!(
        "rebuilt counters of {} players of edition {} from {} matches",
        counters.len(),
        edition.id,
        replayed
    );
    Ok(RecomputeReport::new(edition.id, counters.len(), replayed))
}

pub async fn leaderboard(
    pool: &sqlx::SqlitePool,
    category: LeaderboardCategory,
) -> Result<Vec<LeaderboardEntry>, AppError> {
    let players = list_players(pool).await?;
    let teams = team_map(pool).await?;
    Ok(player_stats::leaderboard(&players, &teams, category))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{models::player_stats::PlayerCounters, repositories::player_repo::get_player};

    async fn counters(pool: &sqlx::SqlitePool) -> HashMap<u32, PlayerCounters> {
        list_players(pool)
            .await
            .expect("failed to list players")
            .into_iter()
            .map(|p| (p.id, p.counters()))
            .collect()
    }

    fn c(scored_goals: u32, yellow_cards: u32, red_cards: u32, mvp: u32) -> PlayerCounters {
        PlayerCounters {
            scored_goals,
            yellow_cards,
            red_cards,
            man_of_the_match: mvp,
        }
    }

    #[sqlx::test(fixtures(
        path = "../../fixtures",
        scripts("teams", "editions", "players", "matches", "events")
    ))]
    async fn test_full_recompute(pool: sqlx::SqlitePool) {
        let report = recompute_player_stats(&pool, &RecomputeLocks::default())
            .await
            .expect("recompute failed");
        assert_eq!(report.edition_id, 2);
        assert_eq!(report.rows_written, 6);

        let all = counters(&pool).await;
        assert_eq!(all[&1], c(3, 0, 0, 1));
        assert_eq!(all[&2], c(3, 0, 0, 0));
        assert_eq!(all[&3], c(3, 1, 0, 0));
        assert_eq!(all[&4], c(2, 0, 1, 1));
        // goals in other editions are reset
        assert_eq!(all[&5], PlayerCounters::default());
        assert_eq!(all[&6], PlayerCounters::default());
    }

    #[sqlx::test(fixtures(
        path = "../../fixtures",
        scripts("teams", "editions", "players", "matches", "events")
    ))]
    async fn test_recompute_is_idempotent(pool: sqlx::SqlitePool) {
        let locks = RecomputeLocks::default();
        recompute_player_stats(&pool, &locks).await.expect("first run");
        let first = counters(&pool).await;
        recompute_player_stats(&pool, &locks).await.expect("second run");
        assert_eq!(first, counters(&pool).await);
    }

    #[sqlx::test(fixtures(
        path = "../../fixtures",
        scripts("teams", "editions", "players", "matches", "events")
    ))]
    async fn test_scoped_recompute(pool: sqlx::SqlitePool) {
        let report = recompute_player_stats_for_match(&pool, &RecomputeLocks::default(), 1)
            .await
            .expect("scoped recompute failed");
        // player 99 scored in match 1 but does not exist
        assert_eq!(report.rows_written, 3);

        let all = counters(&pool).await;
        assert_eq!(all[&1], c(3, 0, 0, 1));
        assert_eq!(all[&2], c(3, 0, 0, 0));
        assert_eq!(all[&3], c(3, 1, 0, 0));
        assert_eq!(all[&4], c(0, 0, 2, 3));
        assert_eq!(all[&5].scored_goals, 7);
    }

    #[sqlx::test(fixtures(
        path = "../../fixtures",
        scripts("teams", "editions", "players", "matches", "events")
    ))]
    async fn test_scoped_recompute_uses_match_edition(pool: sqlx::SqlitePool) {
        let report = recompute_player_stats_for_match(&pool, &RecomputeLocks::default(), 9)
            .await
            .expect("scoped recompute failed");
        assert_eq!(report.edition_id, 1);
        let carl = get_player(&pool, 3).await.unwrap().expect("player exists");
        assert_eq!(carl.counters(), c(3, 0, 0, 1));
    }

    #[sqlx::test(fixtures(
        path = "../../fixtures",
        scripts("teams", "editions", "players", "matches", "events")
    ))]
    async fn test_orphan_match_changes_nothing(pool: sqlx::SqlitePool) {
        let before = counters(&pool).await;
        let err = recompute_player_stats_for_match(&pool, &RecomputeLocks::default(), 11)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MatchdayMissing { match_id: 11 }));
        assert_eq!(before, counters(&pool).await);
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("teams", "players")))]
    async fn test_leaderboard_skips_missing_teams(pool: sqlx::SqlitePool) {
        let entries = leaderboard(&pool, LeaderboardCategory::Goals)
            .await
            .expect("failed to build leaderboard");
        assert_eq!(
            entries.iter().map(|e| (e.player_id, e.count)).collect::<Vec<_>>(),
            vec![(5, 7), (2, 1)]
        );
        assert_eq!(entries[0].team_name, "Wolves");
    }

    #[sqlx::test(fixtures(
        path = "../../fixtures",
        scripts("teams", "editions", "players", "matches", "events")
    ))]
    async fn test_leaderboard_after_recompute(pool: sqlx::SqlitePool) {
        recompute_player_stats(&pool, &RecomputeLocks::default())
            .await
            .expect("recompute failed");
        let entries = leaderboard(&pool, LeaderboardCategory::Goals)
            .await
            .expect("failed to build leaderboard");
        assert_eq!(
            entries.iter().map(|e| e.player_name.as_str()).collect::<Vec<_>>(),
            vec!["Ana Ruiz", "Bea Soto", "Carl Vega", "Dan Ortiz"]
        );
        let mvps = leaderboard(&pool, LeaderboardCategory::Mvp).await.unwrap();
        assert_eq!(mvps.len(), 2);
    }
}
