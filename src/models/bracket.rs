use std::cmp::Ordering;

use crate::{
    models::phase::{Division, KnockoutRound, Phase},
    repositories::match_repo::DbMatch,
};

/// A logical position in a division's bracket: the match scheduled there,
/// or a placeholder while none exists yet.
#[derive(Clone, Debug)]
pub enum BracketSlot {
    Scheduled(DbMatch),
    Placeholder(Phase),
}

impl BracketSlot {
    pub fn phase(&self) -> Option<Phase> {
        match self {
            BracketSlot::Scheduled(m) => m.phase.as_deref().and_then(|p| Phase::try_from(p).ok()),
            BracketSlot::Placeholder(phase) => Some(*phase),
        }
    }

    pub fn winner(&self) -> Option<u32> {
        match self {
            BracketSlot::Scheduled(m) => match_winner(m),
            BracketSlot::Placeholder(_) => None,
        }
    }
}

/// Winning team of a knockout match, `None` while it cannot be told:
/// unfinished, a side not assigned, a score missing, or level on both
/// score and penalties.
pub fn match_winner(m: &DbMatch) -> Option<u32> {
    if !m.is_finished {
        return None;
    }
    let (home, away) = (m.home_team_id?, m.away_team_id?);
    let (home_score, away_score) = (m.home_score?, m.away_score?);
    match home_score.cmp(&away_score) {
        Ordering::Greater => Some(home),
        Ordering::Less => Some(away),
        Ordering::Equal => match (m.home_penalties, m.away_penalties) {
            (Some(hp), Some(ap)) if hp > ap => Some(home),
            (Some(hp), Some(ap)) if ap > hp => Some(away),
            _ => None,
        },
    }
}

#[derive(Clone, Debug)]
pub struct DivisionBracket {
    pub division: Division,
    pub semis: [BracketSlot; 2],
    pub final_match: BracketSlot,
}

impl DivisionBracket {
    /// Finalists as far as the semi-finals have decided them.
    pub fn finalists(&self) -> [Option<u32>; 2] {
        [self.semis[0].winner(), self.semis[1].winner()]
    }

    pub fn champion(&self) -> Option<u32> {
        self.final_match.winner()
    }
}

/// Arranges knockout matches into one bracket per division. Matches fill
/// slots in id order; missing slots become placeholders and surplus matches
/// are dropped.
pub fn arrange(matches: &[DbMatch]) -> Vec<DivisionBracket> {
    Division::ALL
        .into_iter()
        .map(|division| {
            let mut semis = slots(matches, division, KnockoutRound::Semi, 2);
            let final_match = slots(matches, division, KnockoutRound::Final, 1)
                .pop()
                .unwrap_or(BracketSlot::Placeholder(division.phase(KnockoutRound::Final)));
            let second = semis
                .pop()
                .unwrap_or(BracketSlot::Placeholder(division.phase(KnockoutRound::Semi)));
            let first = semis
                .pop()
                .unwrap_or(BracketSlot::Placeholder(division.phase(KnockoutRound::Semi)));
            DivisionBracket {
                division,
                semis: [first, second],
                final_match,
            }
        })
        .collect()
}

fn slots(
    matches: &[DbMatch],
    division: Division,
    round: KnockoutRound,
    count: usize,
) -> Vec<BracketSlot> {
    let phase = division.phase(round);
    let mut scheduled: Vec<&DbMatch> = matches
        .iter()
        .filter(|m| {
            m.phase
                .as_deref()
                .and_then(|p| Phase::try_from(p).ok())
                .and_then(|p| p.knockout())
                == Some((division, round))
        })
        .collect();
    scheduled.sort_by_key(|m| m.id);
    if scheduled.len() > count {
        tracing::warn!(
            "{} matches scheduled for {}, only {} fit the bracket",
            scheduled.len(),
            phase,
            count
        );
    }
    let mut slots: Vec<BracketSlot> = scheduled
        .into_iter()
        .take(count)
        .cloned()
        .map(BracketSlot::Scheduled)
        .collect();
    slots.resize(count, BracketSlot::Placeholder(phase));
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knockout(id: u32, phase: &str) -> DbMatch {
        DbMatch {
            id,
            matchday_id: 1,
            home_team_id: Some(1),
            away_team_id: Some(2),
            home_score: Some(2),
            away_score: Some(2),
            home_penalties: Some(4),
            away_penalties: Some(3),
            is_finished: true,
            mvp_player_id: None,
            phase: Some(phase.to_string()),
            edition_id: Some(1),
        }
    }

    #[test]
    fn test_tie_resolved_by_penalties() {
        let m = knockout(1, "gold_final");
        assert_eq!(match_winner(&m), Some(1));
        let m = DbMatch {
            home_penalties: Some(2),
            ..knockout(1, "gold_final")
        };
        assert_eq!(match_winner(&m), Some(2));
    }

    #[test]
    fn test_unfinished_has_no_winner() {
        let m = DbMatch {
            is_finished: false,
            home_score: Some(5),
            away_score: Some(0),
            ..knockout(1, "gold_semi")
        };
        assert_eq!(match_winner(&m), None);
    }

    #[test]
    fn test_undetermined_outcomes() {
        let missing_team = DbMatch {
            away_team_id: None,
            ..knockout(1, "gold_semi")
        };
        let missing_score = DbMatch {
            home_score: None,
            ..knockout(2, "gold_semi")
        };
        let level_penalties = DbMatch {
            away_penalties: Some(4),
            ..knockout(3, "gold_semi")
        };
        let no_penalties = DbMatch {
            home_penalties: None,
            away_penalties: None,
            ..knockout(4, "gold_semi")
        };
        for m in [missing_team, missing_score, level_penalties, no_penalties] {
            assert_eq!(match_winner(&m), None, "match {}", m.id);
        }
    }

    #[test]
    fn test_decided_by_score() {
        let m = DbMatch {
            home_score: Some(0),
            away_score: Some(1),
            home_penalties: None,
            away_penalties: None,
            ..knockout(1, "silver_final")
        };
        assert_eq!(match_winner(&m), Some(2));
    }

    #[test]
    fn test_arrange_pads_with_placeholders() {
        let matches = vec![knockout(5, "gold_semi"), knockout(9, "silver_final")];
        let brackets = arrange(&matches);
        assert_eq!(brackets.len(), 3);

        let gold = &brackets[0];
        assert_eq!(gold.division, Division::Gold);
        assert!(matches!(&gold.semis[0], BracketSlot::Scheduled(m) if m.id == 5));
        assert!(matches!(gold.semis[1], BracketSlot::Placeholder(Phase::GoldSemi)));
        assert!(matches!(gold.final_match, BracketSlot::Placeholder(Phase::GoldFinal)));
        assert_eq!(gold.finalists(), [Some(1), None]);
        assert_eq!(gold.champion(), None);

        let silver = &brackets[1];
        assert!(matches!(silver.semis[0], BracketSlot::Placeholder(Phase::SilverSemi)));
        assert_eq!(silver.champion(), Some(1));

        let bronze = &brackets[2];
        assert!(bronze.semis.iter().all(|s| s.winner().is_none()));
        assert_eq!(bronze.final_match.phase(), Some(Phase::BronzeFinal));
    }

    #[test]
    fn test_arrange_orders_and_truncates() {
        let matches = vec![
            knockout(8, "bronze_semi"),
            knockout(3, "bronze_semi"),
            knockout(6, "bronze_semi"),
        ];
        let brackets = arrange(&matches);
        let bronze = &brackets[2];
        assert!(matches!(&bronze.semis[0], BracketSlot::Scheduled(m) if m.id == 3));
        assert!(matches!(&bronze.semis[1], BracketSlot::Scheduled(m) if m.id == 6));
    }
}
