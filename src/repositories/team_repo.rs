use std::collections::HashMap;

use serde::Serialize;
use sqlx::prelude::FromRow;

#[derive(Clone, Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DbTeam {
    pub id: u32,
    pub name: String,
    pub logo: Option<String>,
}

pub async fn list_teams(pool: &sqlx::SqlitePool) -> sqlx::Result<Vec<DbTeam>> {
    sqlx::query_as("select * from teams").fetch_all(pool).await
}

pub async fn team_map(pool: &sqlx::SqlitePool) -> sqlx::Result<HashMap<u32, DbTeam>> {
    let teams = list_teams(pool).await?;
    Ok(teams.into_iter().map(|t| (t.id, t)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("teams")))]
    async fn test_team_map(pool: sqlx::SqlitePool) {
        let teams = team_map(&pool).await.expect("failed to list teams");
        assert_eq!(teams.len(), 6);
        assert_eq!(teams[&1].name, "Lions");
        assert_eq!(teams[&3].logo, None);
    }
}
