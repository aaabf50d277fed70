use std::collections::{BTreeMap, BTreeSet};

use crate::{
    models::standings::Record,
    repositories::match_repo::DbMatch,
};

/// The part of a match that feeds a table: both teams set, both scores set
/// and marked finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FinishedResult {
    pub home_team_id: u32,
    pub away_team_id: u32,
    pub home_score: u32,
    pub away_score: u32,
}

impl FinishedResult {
    pub fn from_match(m: &DbMatch) -> Option<Self> {
        if !m.is_finished {
            return None;
        }
        Some(Self {
            home_team_id: m.home_team_id?,
            away_team_id: m.away_team_id?,
            home_score: m.home_score?,
            away_score: m.away_score?,
        })
    }

    /// Goals scored and conceded by `team_id`, if it played this match.
    pub fn side(&self, team_id: u32) -> Option<(u32, u32)> {
        if team_id == self.home_team_id {
            Some((self.home_score, self.away_score))
        } else if team_id == self.away_team_id {
            Some((self.away_score, self.home_score))
        } else {
            None
        }
    }
}

/// Results of the edition that its tables replay. Every finished and
/// scored match counts, whatever its phase.
pub fn table_results<'a>(
    edition_id: u32,
    matches: impl IntoIterator<Item = &'a DbMatch>,
) -> Vec<FinishedResult> {
    matches
        .into_iter()
        .filter(|m| m.edition_id == Some(edition_id))
        .filter_map(FinishedResult::from_match)
        .collect()
}

/// Rebuilds the record behind every row key from scratch. `rows` are the
/// `(collection, team)` assignments to rebuild; a team listed under several
/// collections gets every one of its matches in each of them. Keys whose
/// team played nothing come back as an empty record, which is how a row is
/// reset.
pub fn replay<K>(
    rows: impl IntoIterator<Item = (K, u32)>,
    results: &[FinishedResult],
) -> BTreeMap<(K, u32), Record>
where
    K: Ord + Copy,
{
    let mut table: BTreeMap<(K, u32), Record> = rows
        .into_iter()
        .map(|key| (key, Record::default()))
        .collect();
    for result in results {
        for ((_, team_id), record) in table.iter_mut() {
            if let Some((scored, conceded)) = result.side(*team_id) {
                record.add_match(scored, conceded);
            }
        }
    }
    table
}

/// Teams whose rows a change to `m` can affect.
pub fn teams_of(m: &DbMatch) -> BTreeSet<u32> {
    m.home_team_id.into_iter().chain(m.away_team_id).collect()
}
