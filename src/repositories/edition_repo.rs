use sqlx::prelude::FromRow;

#[derive(Clone, Debug, FromRow)]
pub struct DbEdition {
    pub id: u32,
    pub sequence: u32,
    pub year: u32,
    pub semester: u32,
    pub format: String,
    pub is_current: bool,
}

pub async fn get_current_edition(pool: &sqlx::SqlitePool) -> sqlx::Result<Option<DbEdition>> {
    sqlx::query_as("select * from editions where is_current = 1 order by sequence desc limit 1")
        .fetch_optional(pool)
        .await
}

pub async fn get_edition(pool: &sqlx::SqlitePool, id: u32) -> sqlx::Result<Option<DbEdition>> {
    sqlx::query_as("select * from editions where id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_editions(pool: &sqlx::SqlitePool) -> sqlx::Result<Vec<DbEdition>> {
    sqlx::query_as("select * from editions order by sequence asc")
        .fetch_all(pool)
        .await
}
