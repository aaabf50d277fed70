use std::collections::HashMap;

use axum::{
    Json as AxumJson,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    errors::AppError,
    models::{
        bracket::{BracketSlot, DivisionBracket},
        phase::{Division, GroupId, KnockoutRound, Phase},
        player_stats::{LeaderboardCategory, LeaderboardEntry},
        standings::TeamStanding,
    },
    repositories::team_repo::DbTeam,
    services::{
        bracket_service::EditionBrackets,
        historical_service::{AllTimeScorers, DataCaveat},
        match_service::SyncReport,
        standings_service::StandingsView,
        stats_service::RecomputeReport,
    },
};

#[derive(Debug, Serialize)]
#[serde(tag = "status")]
#[serde(rename_all = "camelCase")]
pub enum AppResponse {
    Error { error: ErrorResponse },
    Success { payload: SuccessResponse },
}

pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    AxumJson<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumJson::<T>::from_request(req, state).await {
            Ok(json) => Ok(Json(json.0)),
            Err(rej) => match rej {
                JsonRejection::JsonDataError(_) => Err(AppError::JsonDataError),
                JsonRejection::JsonSyntaxError(e) => Err(AppError::JsonSyntaxError(e.to_string())),
                JsonRejection::MissingJsonContentType(_) => Err(AppError::MissingContentType),
                _ => Err(AppError::JsonUnknownError),
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing)]
    pub status_code: StatusCode,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketSlotResponse {
    phase: Phase,
    placeholder: bool,
    match_id: Option<u32>,
    home_team: Option<DbTeam>,
    away_team: Option<DbTeam>,
    home_score: Option<u32>,
    away_score: Option<u32>,
    home_penalties: Option<u32>,
    away_penalties: Option<u32>,
    is_finished: bool,
    winner_team_id: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionResponse {
    division: Division,
    semis: Vec<BracketSlotResponse>,
    #[serde(rename = "final")]
    final_match: BracketSlotResponse,
    finalist_team_ids: [Option<u32>; 2],
    champion_team_id: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[serde(rename_all_fields = "camelCase")]
#[serde(tag = "type")]
pub enum SuccessResponse {
    GroupStandings {
        group: GroupId,
        pending: bool,
        standings: Vec<TeamStanding>,
    },
    LeagueStandings {
        edition_id: u32,
        standings: Vec<TeamStanding>,
    },
    Leaderboard {
        category: String,
        entries: Vec<LeaderboardEntry>,
    },
    Brackets {
        edition_id: u32,
        divisions: Vec<DivisionResponse>,
    },
    AllTimeStandings {
        standings: Vec<TeamStanding>,
    },
    AllTimeScorers {
        scorers: Vec<LeaderboardEntry>,
        caveat: Option<DataCaveat>,
    },
    Recomputed {
        report: RecomputeReport,
    },
    MatchUpdated {
        match_id: u32,
        report: SyncReport,
    },
    EventCreated {
        id: u32,
        report: SyncReport,
    },
    EventRemoved {
        id: u32,
        report: SyncReport,
    },
}

impl From<(GroupId, StandingsView)> for AppResponse {
    fn from((group, view): (GroupId, StandingsView)) -> Self {
        let (pending, standings) = match view {
            StandingsView::Ready(standings) => (false, standings),
            StandingsView::Pending => (true, Vec::new()),
        };
        Self::Success {
            payload: SuccessResponse::GroupStandings {
                group,
                pending,
                standings,
            },
        }
    }
}

impl From<(LeaderboardCategory, Vec<LeaderboardEntry>)> for AppResponse {
    fn from((category, entries): (LeaderboardCategory, Vec<LeaderboardEntry>)) -> Self {
        Self::Success {
            payload: SuccessResponse::Leaderboard {
                category: category.to_string(),
                entries,
            },
        }
    }
}

impl From<AllTimeScorers> for AppResponse {
    fn from(value: AllTimeScorers) -> Self {
        Self::Success {
            payload: SuccessResponse::AllTimeScorers {
                scorers: value.scorers,
                caveat: value.caveat,
            },
        }
    }
}

impl From<RecomputeReport> for AppResponse {
    fn from(report: RecomputeReport) -> Self {
        Self::Success {
            payload: SuccessResponse::Recomputed { report },
        }
    }
}

fn slot_response(
    slot: &BracketSlot,
    fallback: Phase,
    teams: &HashMap<u32, DbTeam>,
) -> BracketSlotResponse {
    let phase = slot.phase().unwrap_or(fallback);
    match slot {
        BracketSlot::Scheduled(m) => BracketSlotResponse {
            phase,
            placeholder: false,
            match_id: Some(m.id),
            home_team: m.home_team_id.and_then(|id| teams.get(&id).cloned()),
            away_team: m.away_team_id.and_then(|id| teams.get(&id).cloned()),
            home_score: m.home_score,
            away_score: m.away_score,
            home_penalties: m.home_penalties,
            away_penalties: m.away_penalties,
            is_finished: m.is_finished,
            winner_team_id: slot.winner(),
        },
        BracketSlot::Placeholder(_) => BracketSlotResponse {
            phase,
            placeholder: true,
            match_id: None,
            home_team: None,
            away_team: None,
            home_score: None,
            away_score: None,
            home_penalties: None,
            away_penalties: None,
            is_finished: false,
            winner_team_id: None,
        },
    }
}

fn division_response(bracket: &DivisionBracket, teams: &HashMap<u32, DbTeam>) -> DivisionResponse {
    let semi = bracket.division.phase(KnockoutRound::Semi);
    let final_phase = bracket.division.phase(KnockoutRound::Final);
    DivisionResponse {
        division: bracket.division,
        semis: bracket
            .semis
            .iter()
            .map(|slot| slot_response(slot, semi, teams))
            .collect(),
        final_match: slot_response(&bracket.final_match, final_phase, teams),
        finalist_team_ids: bracket.finalists(),
        champion_team_id: bracket.champion(),
    }
}

impl From<EditionBrackets> for AppResponse {
    fn from(value: EditionBrackets) -> Self {
        Self::Success {
            payload: SuccessResponse::Brackets {
                edition_id: value.edition_id,
                divisions: value
                    .brackets
                    .iter()
                    .map(|bracket| division_response(bracket, &value.teams))
                    .collect(),
            },
        }
    }
}

impl IntoResponse for AppResponse {
    fn into_response(self) -> axum::response::Response {
        let status_code = match &self {
            AppResponse::Error { error } => error.status_code,
            AppResponse::Success { payload: _ } => StatusCode::OK,
        };
        (status_code, AxumJson(self)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match &self {
            AppError::NoActiveEdition => StatusCode::NOT_FOUND,
            AppError::EditionNotFound(_) => StatusCode::NOT_FOUND,
            AppError::MatchNotFound(_) => StatusCode::NOT_FOUND,
            AppError::MatchdayMissing { match_id: _ } => StatusCode::CONFLICT,
            AppError::EditionMissing { matchday_id: _ } => StatusCode::CONFLICT,
            AppError::EventNotFound(_) => StatusCode::NOT_FOUND,
            AppError::PlayerNotFound(_) => StatusCode::NOT_FOUND,
            AppError::NotALeague(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidPhase(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidGroup(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidEventType(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidFormat(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidCategory(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidScore => StatusCode::BAD_REQUEST,
            AppError::MissingConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidConfig { name: _, value: _ } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::MissingContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::JsonSyntaxError(_) => StatusCode::BAD_REQUEST,
            AppError::JsonDataError => StatusCode::BAD_REQUEST,
            AppError::JsonUnknownError => StatusCode::BAD_REQUEST,
            AppError::Database(e) => {
                tracing::error!("database failure: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
        };
        AppResponse::Error {
            error: ErrorResponse {
                code: self.code(),
                message: format!("{}", self),
                status_code,
            },
        }
        .into_response()
    }
}
