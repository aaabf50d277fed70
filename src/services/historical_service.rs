use serde::Serialize;

use crate::{
    errors::AppError,
    models::{
        historical::{self, all_time_table},
        player_stats::{LeaderboardEntry, sort_entries},
        standings::TeamStanding,
    },
    repositories::{
        edition_repo::list_editions,
        event_repo::list_events,
        match_repo::list_matches,
        player_repo::list_players,
        team_repo::team_map,
    },
};

/// Marks an edition whose records are known to be incomplete.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataCaveat {
    pub edition_id: u32,
    pub year: u32,
    pub semester: u32,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllTimeScorers {
    pub scorers: Vec<LeaderboardEntry>,
    pub caveat: Option<DataCaveat>,
}

/// All-time table over every finished match. Nothing stored is touched.
pub async fn all_time_standings(pool: &sqlx::SqlitePool) -> Result<Vec<TeamStanding>, AppError> {
    let matches = list_matches(pool).await?;
    let teams = team_map(pool).await?;
    let table = all_time_table(&matches);
    Ok(table
        .iter()
        .filter_map(|t| match teams.get(&t.team_id) {
            Some(team) => Some(TeamStanding::new(team, &t.record)),
            None => {
                tracing::warn!("all-time record of missing team {}, skipping", t.team_id);
                None
            }
        })
        .collect())
}

pub async fn all_time_scorers(pool: &sqlx::SqlitePool) -> Result<AllTimeScorers, AppError> {
    let events = list_events(pool).await?;
    let players = list_players(pool).await?;
    let teams = team_map(pool).await?;
    let editions = list_editions(pool).await?;

    let mut scorers: Vec<LeaderboardEntry> = historical::all_time_scorers(&events)
        .into_iter()
        .filter_map(|(player_id, goals)| {
            let Some(player) = players.iter().find(|p| p.id == player_id) else {
                tracing::warn!("goals of missing player {}, skipping", player_id);
                return None;
            };
            LeaderboardEntry::new(player, &teams, goals)
        })
        .collect();
    sort_entries(&mut scorers);

    let caveat = editions.first().map(|edition| DataCaveat {
        edition_id: edition.id,
        year: edition.year,
        semester: edition.semester,
        message: format!(
            "Events of the {}-{} edition may be incomplete, goal totals undercount it",
            edition.year, edition.semester
        ),
    });
    Ok(AllTimeScorers { scorers, caveat })
}
