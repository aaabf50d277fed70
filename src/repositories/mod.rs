pub mod edition_repo;
pub mod event_repo;
pub mod group_stats_repo;
pub mod league_repo;
pub mod match_repo;
pub mod player_repo;
pub mod team_repo;
