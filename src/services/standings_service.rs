use std::collections::HashMap;

use crate::{
    errors::{AppError, is_transient},
    models::{
        phase::{EditionFormat, GroupId},
        standings::{Record, TeamRecord, TeamStanding, TieBreak},
    },
    repositories::{
        group_stats_repo::select_group_rows,
        league_repo::select_league_rows,
        team_repo::{DbTeam, team_map},
    },
    services::edition_service,
};

#[derive(Debug)]
pub enum StandingsView {
    Ready(Vec<TeamStanding>),
    /// The rows could not be read this time; callers ask again later.
    Pending,
}

/// Standings of one group collection as stored, ranked on the table keys.
/// Rows of teams that no longer exist are left out.
pub async fn group_standings(
    pool: &sqlx::SqlitePool,
    group: GroupId,
) -> Result<StandingsView, AppError> {
    let fetched = async {
        let rows = select_group_rows(pool, group.as_str()).await?;
        let teams = team_map(pool).await?;
        Ok::<_, sqlx::Error>((rows, teams))
    }
    .await;
    let (rows, teams) = match fetched {
        Ok(fetched) => fetched,
        Err(e) if is_transient(&e) => {
            tracing::warn!("standings of {} not available yet: {}", group, e);
            return Ok(StandingsView::Pending);
        }
        Err(e) => return Err(e.into()),
    };
    let records = rows.iter().map(|row| (row.team_id, row.record()));
    Ok(StandingsView::Ready(rank(records, &teams)))
}

pub async fn league_standings(
    pool: &sqlx::SqlitePool,
    edition_id: u32,
) -> Result<Vec<TeamStanding>, AppError> {
    let edition = edition_service::edition(pool, edition_id).await?;
    if EditionFormat::try_from(edition.format.as_str())? != EditionFormat::League {
        return Err(AppError::NotALeague(edition_id));
    }
    let rows = select_league_rows(pool, edition_id).await?;
    let teams = team_map(pool).await?;
    let records = rows.iter().map(|row| (row.team_id, row.record()));
    Ok(rank(records, &teams))
}

fn rank(
    records: impl IntoIterator<Item = (u32, Record)>,
    teams: &HashMap<u32, DbTeam>,
) -> Vec<TeamStanding> {
    let mut table: Vec<TeamRecord> = records
        .into_iter()
        .filter(|(team_id, _)| {
            let exists = teams.contains_key(team_id);
            if !exists {
                tracing::warn!("standings row of missing team {}, skipping", team_id);
            }
            exists
        })
        .map(|(team_id, record)| TeamRecord { team_id, record })
        .collect();
    TieBreak::Table.rank(&mut table);
    table
        .iter()
        .filter_map(|t| teams.get(&t.team_id).map(|team| TeamStanding::new(team, &t.record)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{recompute_locks::RecomputeLocks, stats_service::recompute_tables};

    fn ready(view: StandingsView) -> Vec<TeamStanding> {
        match view {
            StandingsView::Ready(standings) => standings,
            StandingsView::Pending => panic!("standings are pending"),
        }
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("teams", "group_stats")))]
    async fn test_group_standings_order(pool: sqlx::SqlitePool) {
        let standings = ready(group_standings(&pool, GroupId::GroupA).await.unwrap());
        assert_eq!(
            standings.iter().map(|s| s.team_id).collect::<Vec<_>>(),
            vec![1, 3, 2, 4]
        );
        let bears = &standings[1];
        assert_eq!(bears.team_name, "Bears");
        assert_eq!(bears.team_logo, None);
        assert_eq!((bears.matches_played, bears.points), (2, 6));
        assert_eq!(bears.goal_difference, 4);
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("teams", "group_stats")))]
    async fn test_missing_team_is_skipped(pool: sqlx::SqlitePool) {
        let standings = ready(group_standings(&pool, GroupId::GroupB).await.unwrap());
        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].team_name, "Hawks");
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("teams", "group_stats")))]
    async fn test_empty_group(pool: sqlx::SqlitePool) {
        let standings = ready(group_standings(&pool, GroupId::SilverGroup).await.unwrap());
        assert!(standings.is_empty());
    }

    #[sqlx::test(fixtures(
        path = "../../fixtures",
        scripts("teams", "editions", "matches", "group_stats")
    ))]
    async fn test_empty_matchday_after_recompute(pool: sqlx::SqlitePool) {
        // group_b has a matchday without matches
        recompute_tables(&pool, &RecomputeLocks::default())
            .await
            .expect("recompute failed");
        let standings = ready(group_standings(&pool, GroupId::GroupB).await.unwrap());
        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].points, 0);
        assert_eq!(standings[0].matches_played, 0);
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("teams", "group_stats")))]
    async fn test_closed_pool_is_pending(pool: sqlx::SqlitePool) {
        pool.close().await;
        let view = group_standings(&pool, GroupId::GroupA).await.unwrap();
        assert!(matches!(view, StandingsView::Pending));
    }

    #[sqlx::test(fixtures(
        path = "../../fixtures",
        scripts("teams", "editions", "group_stats")
    ))]
    async fn test_league_standings(pool: sqlx::SqlitePool) {
        let standings = league_standings(&pool, 3).await.unwrap();
        assert_eq!(
            standings.iter().map(|s| s.team_id).collect::<Vec<_>>(),
            vec![6, 5]
        );
        assert_eq!(standings[0].points, 9);
        let err = league_standings(&pool, 2).await.unwrap_err();
        assert!(matches!(err, AppError::NotALeague(2)));
        let err = league_standings(&pool, 40).await.unwrap_err();
        assert!(matches!(err, AppError::EditionNotFound(40)));
    }
}
