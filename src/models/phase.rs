use std::fmt::Display;

use serde::Serialize;

use crate::errors::AppError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    GroupA,
    GroupB,
    GoldGroup,
    SilverGroup,
    /// There is no bronze group table. Its matches count towards whatever
    /// other group rows the two teams hold, like any other finished match.
    BronzeGroup,
    GoldSemi,
    GoldFinal,
    SilverSemi,
    SilverFinal,
    BronzeSemi,
    BronzeFinal,
    Regular,
}

impl Phase {
    pub fn knockout(&self) -> Option<(Division, KnockoutRound)> {
        match self {
            Phase::GoldSemi => Some((Division::Gold, KnockoutRound::Semi)),
            Phase::GoldFinal => Some((Division::Gold, KnockoutRound::Final)),
            Phase::SilverSemi => Some((Division::Silver, KnockoutRound::Semi)),
            Phase::SilverFinal => Some((Division::Silver, KnockoutRound::Final)),
            Phase::BronzeSemi => Some((Division::Bronze, KnockoutRound::Semi)),
            Phase::BronzeFinal => Some((Division::Bronze, KnockoutRound::Final)),
            _ => None,
        }
    }
}

impl TryFrom<&str> for Phase {
    type Error = AppError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "group_a" => Ok(Self::GroupA),
            "group_b" => Ok(Self::GroupB),
            "gold_group" => Ok(Self::GoldGroup),
            "silver_group" => Ok(Self::SilverGroup),
            "bronze_group" => Ok(Self::BronzeGroup),
            "gold_semi" => Ok(Self::GoldSemi),
            "gold_final" => Ok(Self::GoldFinal),
            "silver_semi" => Ok(Self::SilverSemi),
            "silver_final" => Ok(Self::SilverFinal),
            "bronze_semi" => Ok(Self::BronzeSemi),
            "bronze_final" => Ok(Self::BronzeFinal),
            "regular" => Ok(Self::Regular),
            _ => Err(AppError::InvalidPhase(value.to_owned())),
        }
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::GroupA => write!(f, "group_a"),
            Phase::GroupB => write!(f, "group_b"),
            Phase::GoldGroup => write!(f, "gold_group"),
            Phase::SilverGroup => write!(f, "silver_group"),
            Phase::BronzeGroup => write!(f, "bronze_group"),
            Phase::GoldSemi => write!(f, "gold_semi"),
            Phase::GoldFinal => write!(f, "gold_final"),
            Phase::SilverSemi => write!(f, "silver_semi"),
            Phase::SilverFinal => write!(f, "silver_final"),
            Phase::BronzeSemi => write!(f, "bronze_semi"),
            Phase::BronzeFinal => write!(f, "bronze_final"),
            Phase::Regular => write!(f, "regular"),
        }
    }
}

/// One of the parallel group collections a team can hold a standings row in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupId {
    GroupA,
    GroupB,
    GoldGroup,
    SilverGroup,
}

impl GroupId {
    pub const ALL: [GroupId; 4] = [
        GroupId::GroupA,
        GroupId::GroupB,
        GroupId::GoldGroup,
        GroupId::SilverGroup,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupId::GroupA => "group_a",
            GroupId::GroupB => "group_b",
            GroupId::GoldGroup => "gold_group",
            GroupId::SilverGroup => "silver_group",
        }
    }
}

impl TryFrom<&str> for GroupId {
    type Error = AppError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        GroupId::ALL
            .into_iter()
            .find(|group| group.as_str() == value.trim().to_lowercase())
            .ok_or_else(|| AppError::InvalidGroup(value.to_owned()))
    }
}

impl Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Division {
    Gold,
    Silver,
    Bronze,
}

impl Division {
    pub const ALL: [Division; 3] = [Division::Gold, Division::Silver, Division::Bronze];

    pub fn phase(&self, round: KnockoutRound) -> Phase {
        match (self, round) {
            (Division::Gold, KnockoutRound::Semi) => Phase::GoldSemi,
            (Division::Gold, KnockoutRound::Final) => Phase::GoldFinal,
            (Division::Silver, KnockoutRound::Semi) => Phase::SilverSemi,
            (Division::Silver, KnockoutRound::Final) => Phase::SilverFinal,
            (Division::Bronze, KnockoutRound::Semi) => Phase::BronzeSemi,
            (Division::Bronze, KnockoutRound::Final) => Phase::BronzeFinal,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KnockoutRound {
    Semi,
    Final,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventType {
    Goal,
    Penalty,
    OwnGoal,
    YellowCard,
    RedCard,
    Substitution,
}

impl TryFrom<&str> for EventType {
    type Error = AppError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "goal" => Ok(Self::Goal),
            "penalty" => Ok(Self::Penalty),
            "own_goal" => Ok(Self::OwnGoal),
            "yellow_card" => Ok(Self::YellowCard),
            "red_card" => Ok(Self::RedCard),
            "substitution" => Ok(Self::Substitution),
            _ => Err(AppError::InvalidEventType(value.to_owned())),
        }
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventType::Goal => write!(f, "goal"),
            EventType::Penalty => write!(f, "penalty"),
            EventType::OwnGoal => write!(f, "own_goal"),
            EventType::YellowCard => write!(f, "yellow_card"),
            EventType::RedCard => write!(f, "red_card"),
            EventType::Substitution => write!(f, "substitution"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditionFormat {
    Groups,
    League,
}

impl TryFrom<&str> for EditionFormat {
    type Error = AppError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "groups" => Ok(Self::Groups),
            "league" => Ok(Self::League),
            _ => Err(AppError::InvalidFormat(value.to_owned())),
        }
    }
}
