pub mod brackets;
pub mod events;
pub mod history;
pub mod matches;
pub mod players;
pub mod recompute;
pub mod standings;
