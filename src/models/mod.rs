pub mod bracket;
pub mod group_stats;
pub mod historical;
pub mod phase;
pub mod player_stats;
pub mod standings;
