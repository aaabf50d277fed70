use sqlx::prelude::FromRow;

#[derive(Clone, Debug, FromRow)]
pub struct DbEvent {
    pub id: u32,
    pub match_id: u32,
    pub player_id: u32,
    pub event_type: String,
}

pub async fn get_event(pool: &sqlx::SqlitePool, id: u32) -> sqlx::Result<Option<DbEvent>> {
    sqlx::query_as("select * from events where id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_events(pool: &sqlx::SqlitePool) -> sqlx::Result<Vec<DbEvent>> {
    sqlx::query_as("select * from events order by id asc")
        .fetch_all(pool)
        .await
}

pub async fn select_match_events(
    pool: &sqlx::SqlitePool,
    match_id: u32,
) -> sqlx::Result<Vec<DbEvent>> {
    sqlx::query_as("select * from events where match_id = ?1 order by id asc")
        .bind(match_id)
        .fetch_all(pool)
        .await
}

pub async fn select_edition_events(
    pool: &sqlx::SqlitePool,
    edition_id: u32,
) -> sqlx::Result<Vec<DbEvent>> {
    sqlx::query_as(
        "select e.*
        from events e
        inner join matches m on m.id = e.match_id
        inner join matchdays md on md.id = m.matchday_id
        where md.edition_id = ?1
        order by e.id asc",
    )
    .bind(edition_id)
    .fetch_all(pool)
    .await
}

pub async fn create_event(
    pool: &sqlx::SqlitePool,
    match_id: u32,
    player_id: u32,
    event_type: &str,
) -> sqlx::Result<i64> {
    let result =
        sqlx::query("insert into events (match_id, player_id, event_type) values (?1, ?2, ?3)")
            .bind(match_id)
            .bind(player_id)
            .bind(event_type)
            .execute(pool)
            .await?;
    Ok(result.last_insert_rowid())
}

pub async fn delete_event(pool: &sqlx::SqlitePool, id: u32) -> sqlx::Result<()> {
    sqlx::query("delete from events where id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("editions", "matches", "events")))]
    async fn test_select_edition_events(pool: sqlx::SqlitePool) {
        let events = select_edition_events(&pool, 1)
            .await
            .expect("failed to select events");
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| e.match_id == 9));
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("editions", "matches")))]
    async fn test_create_and_delete_event(pool: sqlx::SqlitePool) {
        let id = create_event(&pool, 1, 1, "goal")
            .await
            .expect("failed to create event");
        let event = get_event(&pool, id as u32)
            .await
            .expect("failed to get event")
            .expect("event exists");
        assert_eq!(event.event_type, "goal");
        delete_event(&pool, id as u32)
            .await
            .expect("failed to delete event");
        assert!(select_match_events(&pool, 1).await.unwrap().is_empty());
    }
}
