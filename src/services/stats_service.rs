use std::collections::BTreeSet;

use chrono::Utc;
use serde::Serialize;

use crate::{
    errors::AppError,
    models::{
        group_stats::{replay, table_results, teams_of},
        phase::{EditionFormat, GroupId},
    },
    repositories::{
        edition_repo::{DbEdition, get_current_edition},
        group_stats_repo::{list_group_rows, write_group_row},
        league_repo::{select_league_rows, write_league_row},
        match_repo::select_edition_matches,
    },
    services::{
        edition_service::{current_edition, match_edition},
        recompute_locks::RecomputeLocks,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecomputeReport {
    pub edition_id: u32,
    pub rows_written: usize,
    pub matches_replayed: usize,
    pub recomputed_at: i64,
}

impl RecomputeReport {
    pub fn new(edition_id: u32, rows_written: usize, matches_replayed: usize) -> Self {
        Self {
            edition_id,
            rows_written,
            matches_replayed,
            recomputed_at: Utc::now().timestamp(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TeamScope {
    All,
    Teams(BTreeSet<u32>),
}

impl TeamScope {
    pub fn includes(&self, team_id: u32) -> bool {
        match self {
            TeamScope::All => true,
            TeamScope::Teams(teams) => teams.contains(&team_id),
        }
    }
}

/// Rebuilds every group row, and the league table when the current edition
/// is a league, from the current edition's finished matches.
pub async fn recompute_tables(
    pool: &sqlx::SqlitePool,
    locks: &RecomputeLocks,
) -> Result<RecomputeReport, AppError> {
    let edition = current_edition(pool).await?;
    let _guard = locks.acquire(edition.id).await;
    rebuild_tables(pool, &edition, &TeamScope::All).await
}

/// Rebuilds only the rows of the two teams of `match_id`. Each row depends
/// on its own team's matches alone, so the rows end up exactly as a full
/// recompute would leave them. A match of a past edition only touches its
/// league rows.
pub async fn recompute_tables_for_match(
    pool: &sqlx::SqlitePool,
    locks: &RecomputeLocks,
    match_id: u32,
) -> Result<RecomputeReport, AppError> {
    let (m, edition) = match_edition(pool, match_id).await?;
    let _guard = locks.acquire(edition.id).await;
    rebuild_tables(pool, &edition, &TeamScope::Teams(teams_of(&m))).await
}

/// Reset and replay of the table rows in `scope`. Everything is read before
/// the first write and all writes share one transaction, so a failure leaves
/// the previous rows in place. Callers hold the edition's recompute lock.
pub(crate) async fn rebuild_tables(
    pool: &sqlx::SqlitePool,
    edition: &DbEdition,
    scope: &TeamScope,
) -> Result<RecomputeReport, AppError> {
    let format = EditionFormat::try_from(edition.format.as_str())?;
    let matches = select_edition_matches(pool, edition.id).await?;
    let results = table_results(edition.id, &matches);

    // group rows carry no edition and always hold the current one
    let live = get_current_edition(pool)
        .await?
        .is_some_and(|current| current.id == edition.id);
    let groups = if live {
        let group_rows = list_group_rows(pool).await?;
        let group_keys: Vec<(GroupId, u32)> = group_rows
            .iter()
            .filter(|row| scope.includes(row.team_id))
            .filter_map(|row| match GroupId::try_from(row.group_name.as_str()) {
                Ok(group) => Some((group, row.team_id)),
                Err(_) => {
                    tracing::warn!(
                        "group row {} names unknown group `{}`, skipping",
                        row.id,
                        row.group_name
                    );
                    None
                }
            })
            .collect();
        replay(group_keys, &results)
    } else {
        tracing::debug!("edition {} is not current, group rows left alone", edition.id);
        Default::default()
    };

    let league = match format {
        EditionFormat::League => {
            let league_rows = select_league_rows(pool, edition.id).await?;
            let keys = league_rows
                .iter()
                .filter(|row| scope.includes(row.team_id))
                .map(|row| (row.edition_id, row.team_id));
            replay(keys, &results)
        }
        EditionFormat::Groups => Default::default(),
    };
    let replayed = if live || matches!(format, EditionFormat::League) {
        results.len()
    } else {
        0
    };

    let mut tx = pool.begin().await?;
    for ((group, team_id), record) in groups.iter() {
        write_group_row(&mut tx, group.as_str(), *team_id, record).await?;
    }
    for ((edition_id, team_id), record) in league.iter() {
        write_league_row(&mut tx, *edition_id, *team_id, record).await?;
    }
    tx.commit().await?;

    tracing::debug!(
        "rebuilt {} group rows and {} league rows of edition {} from {} results",
        groups.len(),
        league.len(),
        edition.id,
        replayed
    );
    Ok(RecomputeReport::new(
        edition.id,
        groups.len() + league.len(),
        replayed,
    ))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::repositories::group_stats_repo::DbGroupStatsRow;

    type RowValues = (u32, u32, u32, u32, u32);

    async fn snapshot(pool: &sqlx::SqlitePool) -> HashMap<(String, u32), RowValues> {
        list_group_rows(pool)
            .await
            .expect("failed to list rows")
            .into_iter()
            .map(|row: DbGroupStatsRow| {
                (
                    (row.group_name, row.team_id),
                    (row.won, row.drawn, row.lost, row.scored_goals, row.conceived_goals),
                )
            })
            .collect()
    }

    fn key(group: &str, team_id: u32) -> (String, u32) {
        (group.to_string(), team_id)
    }

    #[sqlx::test(fixtures(
        path = "../../fixtures",
        scripts("teams", "editions", "matches", "group_stats")
    ))]
    async fn test_full_recompute(pool: sqlx::SqlitePool) {
        let report = recompute_tables(&pool, &RecomputeLocks::default())
            .await
            .expect("recompute failed");
        assert_eq!(report.edition_id, 2);
        assert_eq!(report.rows_written, 8);
        assert_eq!(report.matches_replayed, 5);

        let rows = snapshot(&pool).await;
        // includes the gold semi drawn 2-2 between teams 1 and 3
        assert_eq!(rows[&key("group_a", 1)], (1, 2, 1, 6, 6));
        assert_eq!(rows[&key("group_a", 2)], (1, 0, 1, 3, 3));
        assert_eq!(rows[&key("group_a", 3)], (0, 3, 0, 3, 3));
        assert_eq!(rows[&key("group_a", 4)], (0, 1, 0, 0, 0));
        assert_eq!(rows[&key("gold_group", 1)], (1, 2, 1, 6, 6));
        assert_eq!(rows[&key("gold_group", 2)], (1, 0, 1, 3, 3));
        // no matches yet, stale values are reset
        assert_eq!(rows[&key("group_b", 5)], (0, 0, 0, 0, 0));
        assert_eq!(rows[&key("group_b", 77)], (0, 0, 0, 0, 0));
    }

    #[sqlx::test(fixtures(
        path = "../../fixtures",
        scripts("teams", "editions", "matches", "group_stats")
    ))]
    async fn test_recompute_is_idempotent(pool: sqlx::SqlitePool) {
        let locks = RecomputeLocks::default();
        recompute_tables(&pool, &locks).await.expect("first run");
        let first = snapshot(&pool).await;
        recompute_tables(&pool, &locks).await.expect("second run");
        assert_eq!(first, snapshot(&pool).await);
    }

    #[sqlx::test(fixtures(
        path = "../../fixtures",
        scripts("teams", "editions", "matches", "group_stats")
    ))]
    async fn test_conservation_in_group_a(pool: sqlx::SqlitePool) {
        recompute_tables(&pool, &RecomputeLocks::default())
            .await
            .expect("recompute failed");
        let rows: Vec<RowValues> = snapshot(&pool)
            .await
            .into_iter()
            .filter(|((group, _), _)| group == "group_a")
            .map(|(_, values)| values)
            .collect();
        let wins: u32 = rows.iter().map(|r| r.0).sum();
        let losses: u32 = rows.iter().map(|r| r.2).sum();
        let goals_for: u32 = rows.iter().map(|r| r.3).sum();
        let goals_against: u32 = rows.iter().map(|r| r.4).sum();
        assert_eq!(wins, losses);
        assert_eq!(goals_for, goals_against);
    }

    #[sqlx::test(fixtures(
        path = "../../fixtures",
        scripts("teams", "editions", "matches", "group_stats")
    ))]
    async fn test_scoped_matches_full(pool: sqlx::SqlitePool) {
        let locks = RecomputeLocks::default();
        let report = recompute_tables_for_match(&pool, &locks, 2)
            .await
            .expect("scoped recompute failed");
        assert_eq!(report.rows_written, 2);
        let scoped = snapshot(&pool).await;
        // teams 3 and 4 are rebuilt, the others keep their stale values
        assert_eq!(scoped[&key("group_a", 3)], (0, 3, 0, 3, 3));
        assert_eq!(scoped[&key("group_a", 4)], (0, 1, 0, 0, 0));
        assert_eq!(scoped[&key("group_a", 1)], (9, 9, 9, 9, 9));

        recompute_tables(&pool, &locks).await.expect("full recompute");
        let full = snapshot(&pool).await;
        assert_eq!(scoped[&key("group_a", 3)], full[&key("group_a", 3)]);
        assert_eq!(scoped[&key("group_a", 4)], full[&key("group_a", 4)]);
    }

    #[sqlx::test(fixtures(
        path = "../../fixtures",
        scripts("teams", "editions", "matches", "group_stats")
    ))]
    async fn test_past_edition_keeps_group_rows(pool: sqlx::SqlitePool) {
        let locks = RecomputeLocks::default();
        recompute_tables(&pool, &locks).await.expect("full recompute");
        let full = snapshot(&pool).await;
        // match 9 belongs to edition 1
        let report = recompute_tables_for_match(&pool, &locks, 9)
            .await
            .expect("scoped recompute failed");
        assert_eq!(report.edition_id, 1);
        assert_eq!(report.rows_written, 0);
        assert_eq!(report.matches_replayed, 0);
        assert_eq!(full, snapshot(&pool).await);
        assert_eq!(full[&key("group_a", 1)], (1, 2, 1, 6, 6));
    }

    #[sqlx::test(fixtures(
        path = "../../fixtures",
        scripts("teams", "editions", "matches", "group_stats")
    ))]
    async fn test_league_edition(pool: sqlx::SqlitePool) {
        let report = recompute_tables_for_match(&pool, &RecomputeLocks::default(), 10)
            .await
            .expect("league recompute failed");
        assert_eq!(report.edition_id, 3);
        let rows = select_league_rows(&pool, 3).await.unwrap();
        let hawks = rows.iter().find(|r| r.team_id == 5).unwrap();
        assert_eq!((hawks.points, hawks.matches_played, hawks.won), (3, 1, 1));
        assert_eq!((hawks.scored_goals, hawks.conceived_goals), (2, 1));
        let sharks = rows.iter().find(|r| r.team_id == 6).unwrap();
        assert_eq!((sharks.points, sharks.matches_played, sharks.lost), (0, 1, 1));
    }

    #[sqlx::test(fixtures(
        path = "../../fixtures",
        scripts("teams", "editions", "matches", "group_stats")
    ))]
    async fn test_orphan_match_changes_nothing(pool: sqlx::SqlitePool) {
        let before = snapshot(&pool).await;
        let err = recompute_tables_for_match(&pool, &RecomputeLocks::default(), 11)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MatchdayMissing { match_id: 11 }));
        assert_eq!(before, snapshot(&pool).await);
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("teams", "group_stats")))]
    async fn test_no_active_edition(pool: sqlx::SqlitePool) {
        let err = recompute_tables(&pool, &RecomputeLocks::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NoActiveEdition));
    }
}
