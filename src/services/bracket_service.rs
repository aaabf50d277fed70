use std::collections::HashMap;

use crate::{
    errors::AppError,
    models::bracket::{DivisionBracket, arrange},
    repositories::{
        match_repo::select_edition_matches,
        team_repo::{DbTeam, team_map},
    },
    services::edition_service,
};

pub struct EditionBrackets {
    pub edition_id: u32,
    pub brackets: Vec<DivisionBracket>,
    pub teams: HashMap<u32, DbTeam>,
}

/// Gold, silver and bronze brackets of an edition, read straight from its
/// matches.
pub async fn edition_brackets(
    pool: &sqlx::SqlitePool,
    edition_id: u32,
) -> Result<EditionBrackets, AppError> {
    let edition = edition_service::edition(pool, edition_id).await?;
    let matches = select_edition_matches(pool, edition.id).await?;
    let teams = team_map(pool).await?;
    Ok(EditionBrackets {
        edition_id: edition.id,
        brackets: arrange(&matches),
        teams,
    })
}
