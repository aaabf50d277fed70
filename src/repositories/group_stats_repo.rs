use sqlx::{Sqlite, Transaction, prelude::FromRow};

use crate::models::standings::Record;

#[derive(Clone, Debug, FromRow)]
pub struct DbGroupStatsRow {
    pub id: u32,
    pub group_name: String,
    pub team_id: u32,
    pub won: u32,
    pub lost: u32,
    pub drawn: u32,
    pub scored_goals: u32,
    pub conceived_goals: u32,
}

impl DbGroupStatsRow {
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

pub async fn select_group_rows(
    pool: &sqlx::SqlitePool,
    group_name: &str,
) -> sqlx::Result<Vec<DbGroupStatsRow>> {
    sqlx::query_as("select * from group_stats where group_name = ?1 order by team_id asc")
        .bind(group_name)
        .fetch_all(pool)
        .await
}

pub async fn list_group_rows(pool: &sqlx::SqlitePool) -> sqlx::Result<Vec<DbGroupStatsRow>> {
    sqlx::query_as("select * from group_stats order by group_name asc, team_id asc")
        .fetch_all(pool)
        .await
}

pub async fn write_group_row(
    tx: &mut Transaction<'_, Sqlite>,
    group_name: &str,
    team_id: u32,
    record: &Record,
) -> sqlx::Result<()> {
    sqlx::query(
        "update group_stats set
            won = ?1,
            lost = ?2,
            drawn = ?3,
            scored_goals = ?4,
            conceived_goals = ?5
        where group_name = ?6 and team_id = ?7",
    )
    .bind(record.won)
    .bind(record.lost)
    .bind(record.drawn)
    .bind(record.goals_for)
    .bind(record.goals_against)
    .bind(group_name)
    .bind(team_id)
    .execute(tx.as_mut())
    .await?;
    Ok(())
}
