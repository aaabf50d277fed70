use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResultPayload {
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub home_penalties: Option<u32>,
    pub away_penalties: Option<u32>,
    pub is_finished: bool,
    pub mvp_player_id: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub player_id: u32,
    pub event_type: String,
}
