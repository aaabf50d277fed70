use sqlx::{Sqlite, Transaction, prelude::FromRow};

use crate::models::player_stats::PlayerCounters;

#[derive(Clone, Debug, FromRow)]
pub struct DbPlayer {
    pub id: u32,
    pub team_id: u32,
    pub name: String,
    pub scored_goals: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub man_of_the_match: u32,
}

impl DbPlayer {
    pub fn counters(&self) -> PlayerCounters {
        PlayerCounters {
            scored_goals: self.scored_goals,
            yellow_cards: self.yellow_cards,
            red_cards: self.red_cards,
            man_of_the_match: self.man_of_the_match,
        }
    }
}

pub async fn list_players(pool: &sqlx::SqlitePool) -> sqlx::Result<Vec<DbPlayer>> {
    sqlx::query_as("select * from players order by id asc")
        .fetch_all(pool)
        .await
}

pub async fn get_player(pool: &sqlx::SqlitePool, id: u32) -> sqlx::Result<Option<DbPlayer>> {
    sqlx::query_as("select * from players where id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn write_player_counters(
    tx: &mut Transaction<'_, Sqlite>,
    player_id: u32,
    counters: &PlayerCounters,
) -> sqlx::Result<()> {
    sqlx::query(
        "update players set
            scored_goals = ?1,
            yellow_cards = ?2,
            red_cards = ?3,
            man_of_the_match = ?4
        where id = ?5",
    )
    .bind(counters.scored_goals)
    .bind(counters.yellow_cards)
    .bind(counters.red_cards)
    .bind(counters.man_of_the_match)
    .bind(player_id)
    .execute(tx.as_mut())
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("players")))]
    async fn test_write_player_counters(pool: sqlx::SqlitePool) {
        let counters = PlayerCounters {
            scored_goals: 3,
            yellow_cards: 1,
            red_cards: 0,
            man_of_the_match: 2,
        };
        let mut tx = pool.begin().await.unwrap();
        write_player_counters(&mut tx, 1, &counters)
            .await
            .expect("failed to write counters");
        tx.commit().await.unwrap();
        let player = get_player(&pool, 1).await.unwrap().expect("player exists");
        assert_eq!(player.counters(), counters);
    }
}
