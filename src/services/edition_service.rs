use crate::{
    errors::AppError,
    repositories::{
        edition_repo::{self, DbEdition},
        match_repo::{self, DbMatch},
    },
};

pub async fn current_edition(pool: &sqlx::SqlitePool) -> Result<DbEdition, AppError> {
    edition_repo::get_current_edition(pool)
        .await?
        .ok_or(AppError::NoActiveEdition)
}

pub async fn edition(pool: &sqlx::SqlitePool, id: u32) -> Result<DbEdition, AppError> {
    edition_repo::get_edition(pool, id)
        .await?
        .ok_or(AppError::EditionNotFound(id))
}

/// Resolves a match and the edition its matchday belongs to.
pub async fn match_edition(
    pool: &sqlx::SqlitePool,
    match_id: u32,
) -> Result<(DbMatch, DbEdition), AppError> {
    let m = match_repo::get_match(pool, match_id)
        .await?
        .ok_or(AppError::MatchNotFound(match_id))?;
    let Some(edition_id) = m.edition_id else {
        tracing::warn!("match {} points at missing matchday {}", m.id, m.matchday_id);
        return Err(AppError::MatchdayMissing { match_id });
    };
    let edition = edition_repo::get_edition(pool, edition_id)
        .await?
        .ok_or(AppError::EditionMissing {
            matchday_id: m.matchday_id,
        })?;
    Ok((m, edition))
}
