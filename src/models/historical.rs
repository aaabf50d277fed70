use std::collections::BTreeMap;

use itertools::Itertools;

use crate::{
    models::{
        group_stats::FinishedResult,
        phase::EventType,
        standings::{Record, TeamRecord, TieBreak},
    },
    repositories::{event_repo::DbEvent, match_repo::DbMatch},
};

/// Every finished match ever played, of any edition and phase, folded into
/// one record per team and ranked on the all-time keys.
pub fn all_time_table(matches: &[DbMatch]) -> Vec<TeamRecord> {
    let mut records: BTreeMap<u32, Record> = BTreeMap::new();
    for result in matches.iter().filter_map(FinishedResult::from_match) {
        records
            .entry(result.home_team_id)
            .or_default()
            .add_match(result.home_score, result.away_score);
        records
            .entry(result.away_team_id)
            .or_default()
            .add_match(result.away_score, result.home_score);
    }
    let mut table: Vec<TeamRecord> = records
        .into_iter()
        .map(|(team_id, record)| TeamRecord { team_id, record })
        .collect();
    TieBreak::AllTime.rank(&mut table);
    table
}

/// `(player_id, goals)` over every recorded `goal` event, most goals first,
/// ties by player id.
pub fn all_time_scorers(events: &[DbEvent]) -> Vec<(u32, u32)> {
    events
        .iter()
        .filter(|e| {
            matches!(
                EventType::try_from(e.event_type.as_str()),
                Ok(EventType::Goal)
            )
        })
        .counts_by(|e| e.player_id)
        .into_iter()
        .map(|(player_id, count)| (player_id, count as u32))
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
        .collect()
}
