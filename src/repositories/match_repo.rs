use sqlx::{Sqlite, Transaction, prelude::FromRow};

use crate::payloads::MatchResultPayload;

/// A match together with the phase and edition of its matchday. Both are
/// `None` when the matchday no longer exists.
#[derive(Clone, Debug, FromRow)]
pub struct DbMatch {
    pub id: u32,
    pub matchday_id: u32,
    pub home_team_id: Option<u32>,
    pub away_team_id: Option<u32>,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub home_penalties: Option<u32>,
    pub away_penalties: Option<u32>,
    pub is_finished: bool,
    pub mvp_player_id: Option<u32>,
    pub phase: Option<String>,
    pub edition_id: Option<u32>,
}

const SELECT_MATCHES: &str = "select m.*, md.phase as phase, md.edition_id as edition_id
    from matches m
    left join matchdays md on md.id = m.matchday_id";

pub async fn get_match(pool: &sqlx::SqlitePool, id: u32) -> sqlx::Result<Option<DbMatch>> {
    sqlx::query_as(&format!("{SELECT_MATCHES} where m.id = ?1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_matches(pool: &sqlx::SqlitePool) -> sqlx::Result<Vec<DbMatch>> {
    sqlx::query_as(&format!("{SELECT_MATCHES} order by m.id asc"))
        .fetch_all(pool)
        .await
}

pub async fn select_edition_matches(
    pool: &sqlx::SqlitePool,
    edition_id: u32,
) -> sqlx::Result<Vec<DbMatch>> {
    sqlx::query_as(&format!(
        "{SELECT_MATCHES} where md.edition_id = ?1 order by md.number asc, m.id asc"
    ))
    .bind(edition_id)
    .fetch_all(pool)
    .await
}

pub async fn update_match_result(
    tx: &mut Transaction<'_, Sqlite>,
    id: u32,
    payload: &MatchResultPayload,
) -> sqlx::Result<()> {
    sqlx::query(
        "update matches set
            home_score = ?1,
            away_score = ?2,
            home_penalties = ?3,
            away_penalties = ?4,
            is_finished = ?5,
            mvp_player_id = ?6
        where id = ?7",
    )
    .bind(payload.home_score)
    .bind(payload.away_score)
    .bind(payload.home_penalties)
    .bind(payload.away_penalties)
    .bind(payload.is_finished)
    .bind(payload.mvp_player_id)
    .bind(id)
    .execute(tx.as_mut())
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("editions", "matches")))]
    async fn test_select_edition_matches(pool: sqlx::SqlitePool) {
        let matches = select_edition_matches(&pool, 2)
            .await
            .expect("failed to select matches");
        assert_eq!(matches.len(), 8);
        assert!(matches.iter().all(|m| m.edition_id == Some(2)));
        assert_eq!(matches[0].phase.as_deref(), Some("group_a"));
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("editions", "matches")))]
    async fn test_match_without_matchday(pool: sqlx::SqlitePool) {
        let orphan = get_match(&pool, 11)
            .await
            .expect("failed to get match")
            .expect("match exists");
        assert_eq!(orphan.phase, None);
        assert_eq!(orphan.edition_id, None);
    }
}
