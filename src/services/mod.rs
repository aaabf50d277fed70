pub mod bracket_service;
pub mod edition_service;
pub mod historical_service;
pub mod match_service;
pub mod player_stats_service;
pub mod recompute_locks;
pub mod standings_service;
pub mod stats_service;
