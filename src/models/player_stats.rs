use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    fmt::Display,
};

use serde::Serialize;

use crate::{
    errors::AppError,
    models::phase::EventType,
    repositories::{
        event_repo::DbEvent, match_repo::DbMatch, player_repo::DbPlayer, team_repo::DbTeam,
    },
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerCounters {
    pub scored_goals: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub man_of_the_match: u32,
}

impl PlayerCounters {
    pub fn apply(&mut self, event_type: EventType) {
        match event_type {
            EventType::Goal | EventType::Penalty => self.scored_goals += 1,
            EventType::YellowCard => self.yellow_cards += 1,
            EventType::RedCard => self.red_cards += 1,
            EventType::OwnGoal | EventType::Substitution => {}
        }
    }

    pub fn get(&self, category: LeaderboardCategory) -> u32 {
        match category {
            LeaderboardCategory::Goals => self.scored_goals,
            LeaderboardCategory::YellowCards => self.yellow_cards,
            LeaderboardCategory::RedCards => self.red_cards,
            LeaderboardCategory::Mvp => self.man_of_the_match,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeaderboardCategory {
    Goals,
    YellowCards,
    RedCards,
    Mvp,
}

impl TryFrom<&str> for LeaderboardCategory {
    type Error = AppError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "goals" => Ok(Self::Goals),
            "yellow_cards" => Ok(Self::YellowCards),
            "red_cards" => Ok(Self::RedCards),
            "mvp" => Ok(Self::Mvp),
            _ => Err(AppError::InvalidCategory(value.to_owned())),
        }
    }
}

impl Display for LeaderboardCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaderboardCategory::Goals => write!(f, "goals"),
            LeaderboardCategory::YellowCards => write!(f, "yellow_cards"),
            LeaderboardCategory::RedCards => write!(f, "red_cards"),
            LeaderboardCategory::Mvp => write!(f, "mvp"),
        }
    }
}

/// Rebuilds the counters of every player in `players` from the finished
/// matches of `edition_id` and their events. Every player in `players`
/// comes back, zeroed when nothing counts for them; events and awards of
/// anyone else are ignored.
pub fn replay(
    edition_id: u32,
    players: &BTreeSet<u32>,
    matches: &[DbMatch],
    events: &[DbEvent],
) -> BTreeMap<u32, PlayerCounters> {
    let mut counters: BTreeMap<u32, PlayerCounters> = players
        .iter()
        .map(|id| (*id, PlayerCounters::default()))
        .collect();
    let finished: HashSet<u32> = matches
        .iter()
        .filter(|m| m.edition_id == Some(edition_id) && m.is_finished)
        .map(|m| m.id)
        .collect();
    for m in matches.iter().filter(|m| finished.contains(&m.id)) {
        if let Some(c) = m.mvp_player_id.and_then(|id| counters.get_mut(&id)) {
            c.man_of_the_match += 1;
        }
    }
    for event in events.iter().filter(|e| finished.contains(&e.match_id)) {
        let Some(c) = counters.get_mut(&event.player_id) else {
            continue;
        };
        match EventType::try_from(event.event_type.as_str()) {
            Ok(event_type) => c.apply(event_type),
            Err(_) => tracing::warn!(
                "event {} has unknown type `{}`, skipping",
                event.id,
                event.event_type
            ),
        }
    }
    counters
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub player_id: u32,
    pub player_name: String,
    pub team_name: String,
    pub count: u32,
}

impl LeaderboardEntry {
    /// `None` when the player's team no longer exists.
    pub fn new(player: &DbPlayer, teams: &HashMap<u32, DbTeam>, count: u32) -> Option<Self> {
        let Some(team) = teams.get(&player.team_id) else {
            tracing::warn!(
                "player {} belongs to missing team {}, skipping",
                player.id,
                player.team_id
            );
            return None;
        };
        Some(Self {
            player_id: player.id,
            player_name: player.name.clone(),
            team_name: team.name.clone(),
            count,
        })
    }
}

/// Most first, then by name and id. Players without a single count are left
/// out.
pub fn leaderboard(
    players: &[DbPlayer],
    teams: &HashMap<u32, DbTeam>,
    category: LeaderboardCategory,
) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = players
        .iter()
        .filter(|p| p.counters().get(category) > 0)
        .filter_map(|p| LeaderboardEntry::new(p, teams, p.counters().get(category)))
        .collect();
    sort_entries(&mut entries);
    entries
}

pub fn sort_entries(entries: &mut [LeaderboardEntry]) {
    entries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.player_name.cmp(&b.player_name))
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
}

/// Players whose season totals an edit of `m` can change: everyone with an
/// event in it and its man of the match.
pub fn touched_players(m: &DbMatch, events: &[DbEvent]) -> BTreeSet<u32> {
    events
        .iter()
        .filter(|e| e.match_id == m.id)
        .map(|e| e.player_id)
        .chain(m.mvp_player_id)
        .collect()
}
