// Gameplay/protocol tuning, separate from runtime configuration.

pub mod drifter;
pub mod mirror;
pub mod player;
