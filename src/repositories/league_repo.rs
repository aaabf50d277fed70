use sqlx::{Sqlite, Transaction, prelude::FromRow};

use crate::models::standings::Record;

#[derive(Clone, Debug, FromRow)]
pub struct DbTableRow {
    pub id: u32,
    pub edition_id: u32,
    pub team_id: u32,
    pub points: u32,
    pub matches_played: u32,
    pub won: u32,
    pub lost: u32,
    pub drawn: u32,
    pub scored_goals: u32,
    pub conceived_goals: u32,
}

impl DbTableRow {
    pub fn record(&self) -> Record {
        Record {
            won: self.won,
            drawn: self.drawn,
            lost: self.lost,
            goals_for: self.scored_goals,
            goals_against: self.conceived_goals,
        }
    }
}

pub async fn select_league_rows(
    pool: &sqlx::SqlitePool,
    edition_id: u32,
) -> sqlx::Result<Vec<DbTableRow>> {
    sqlx::query_as("select * from league_table where edition_id = ?1 order by team_id asc")
        .bind(edition_id)
        .fetch_all(pool)
        .await
}

pub async fn write_league_row(
    tx: &mut Transaction<'_, Sqlite>,
    edition_id: u32,
    team_id: u32,
    record: &Record,
) -> sqlx::Result<()> {
    sqlx::query(
        "update league_table set
            points = ?1,
            matches_played = ?2,
            won = ?3,
            lost = ?4,
            drawn = ?5,
            scored_goals = ?6,
            conceived_goals = ?7
        where edition_id = ?8 and team_id = ?9",
    )
    .bind(record.points())
    .bind(record.matches_played())
    .bind(record.won)
    .bind(record.lost)
    .bind(record.drawn)
    .bind(record.goals_for)
    .bind(record.goals_against)
    .bind(edition_id)
    .bind(team_id)
    .execute(tx.as_mut())
    .await?;
    Ok(())
}
