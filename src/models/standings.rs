use std::cmp::Ordering;

use serde::Serialize;

use crate::repositories::team_repo::DbTeam;

/// Win/draw/loss and goal totals of one team within one table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Record {
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl Record {
    /// Adds one played match seen from this team's side. Penalties never
    /// enter a table: equal scores are a draw.
    pub fn add_match(&mut self, scored: u32, conceded: u32) {
        self.goals_for += scored;
        self.goals_against += conceded;
        match scored.cmp(&conceded) {
            Ordering::Greater => self.won += 1,
            Ordering::Equal => self.drawn += 1,
            Ordering::Less => self.lost += 1,
        }
    }

    pub fn points(&self) -> u32 {
        self.won * 3 + self.drawn
    }

    pub fn matches_played(&self) -> u32 {
        self.won + self.drawn + self.lost
    }

    pub fn goal_difference(&self) -> i64 {
        self.goals_for as i64 - self.goals_against as i64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TeamRecord {
    pub team_id: u32,
    pub record: Record,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TieBreak {
    /// Group and league tables: points, goal difference, goals scored,
    /// then fewer goals conceded.
    Table,
    /// All-time tables stop after goals scored.
    AllTime,
}

impl TieBreak {
    /// Orders `a` before `b` when `a` ranks higher. Entries equal on every
    /// compared key fall back to ascending team id so repeated computations
    /// agree.
    pub fn compare(&self, a: &TeamRecord, b: &TeamRecord) -> Ordering {
        let ordering = b
            .record
            .points()
            .cmp(&a.record.points())
            .then_with(|| b.record.goal_difference().cmp(&a.record.goal_difference()))
            .then_with(|| b.record.goals_for.cmp(&a.record.goals_for));
        let ordering = match self {
            TieBreak::Table => ordering
                .then_with(|| a.record.goals_against.cmp(&b.record.goals_against)),
            TieBreak::AllTime => ordering,
        };
        ordering.then_with(|| a.team_id.cmp(&b.team_id))
    }

    pub fn rank(&self, records: &mut [TeamRecord]) {
        records.sort_by(|a, b| self.compare(a, b));
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStanding {
    pub team_id: u32,
    pub team_name: String,
    pub team_logo: Option<String>,
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: u32,
}

impl TeamStanding {
    pub fn new(team: &DbTeam, record: &Record) -> Self {
        Self {
            team_id: team.id,
            team_name: team.name.clone(),
            team_logo: team.logo.clone(),
            matches_played: record.matches_played(),
            wins: record.won,
            draws: record.drawn,
            losses: record.lost,
            goals_for: record.goals_for,
            goals_against: record.goals_against,
            goal_difference: record.goal_difference(),
            points: record.points(),
        }
    }
}
