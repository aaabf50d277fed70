use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No edition is marked as current")]
    NoActiveEdition,
    #[error("Edition `{0}` does not exist")]
    EditionNotFound(u32),
    #[error("Match `{0}` does not exist")]
    MatchNotFound(u32),
    #[error("Match `{match_id}` is not linked to an existing matchday")]
    MatchdayMissing { match_id: u32 },
    #[error("Matchday `{matchday_id}` is not linked to an existing edition")]
    EditionMissing { matchday_id: u32 },
    #[error("Event `{0}` does not exist")]
    EventNotFound(u32),
    #[error("Player `{0}` does not exist")]
    PlayerNotFound(u32),
    #[error("Edition `{0}` does not use the league format")]
    NotALeague(u32),
    #[error("Invalid phase: `{0}`")]
    InvalidPhase(String),
    #[error("Invalid group: `{0}`, possible values are: group_a, group_b, gold_group and silver_group")]
    InvalidGroup(String),
    #[error("Invalid event type: `{0}`")]
    InvalidEventType(String),
    #[error("Invalid edition format: `{0}`, possible values are: groups and league")]
    InvalidFormat(String),
    #[error("Invalid leaderboard category: `{0}`, possible values are: goals, yellow_cards, red_cards and mvp")]
    InvalidCategory(String),
    #[error("A finished match needs both a home and an away score")]
    InvalidScore,
    #[error("Missing environment variable `{0}`")]
    MissingConfig(&'static str),
    #[error("Invalid value `{value}` for environment variable `{name}`")]
    InvalidConfig { name: &'static str, value: String },
    #[error("Unknown JSON Error")]
    JsonUnknownError,
    #[error("Missing JSON content-type header")]
    MissingContentType,
    #[error("JSON Syntax error: {0}")]
    JsonSyntaxError(String),
    #[error("Invalid JSON data")]
    JsonDataError,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("unknown error")]
    Unknown,
}

impl AppError {
    pub fn code(&self) -> String {
        match self {
            AppError::NoActiveEdition => String::from("NoActiveEdition"),
            AppError::EditionNotFound(_) => String::from("EditionNotFound"),
            AppError::MatchNotFound(_) => String::from("MatchNotFound"),
            AppError::MatchdayMissing { match_id: _ } => String::from("MatchdayMissing"),
            AppError::EditionMissing { matchday_id: _ } => String::from("EditionMissing"),
            AppError::EventNotFound(_) => String::from("EventNotFound"),
            AppError::PlayerNotFound(_) => String::from("PlayerNotFound"),
            AppError::NotALeague(_) => String::from("NotALeague"),
            AppError::InvalidPhase(_) => String::from("InvalidPhase"),
            AppError::InvalidGroup(_) => String::from("InvalidGroup"),
            AppError::InvalidEventType(_) => String::from("InvalidEventType"),
            AppError::InvalidFormat(_) => String::from("InvalidFormat"),
            AppError::InvalidCategory(_) => String::from("InvalidCategory"),
            AppError::InvalidScore => String::from("InvalidScore"),
            AppError::MissingConfig(_) => String::from("MissingConfig"),
            AppError::InvalidConfig { name: _, value: _ } => String::from("InvalidConfig"),
            AppError::JsonUnknownError => String::from("JsonUnknownError"),
            AppError::MissingContentType => String::from("MissingContentType"),
            AppError::JsonSyntaxError(_) => String::from("JsonSyntaxError"),
            AppError::JsonDataError => String::from("JsonDataError"),
            AppError::Database(_) => String::from("DatabaseError"),
            AppError::Unknown => String::from("Unknown"),
        }
    }
}

// Failures that a later read is expected to get past on its own.
pub fn is_transient(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
    )
}
