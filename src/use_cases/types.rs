// Use-case level inputs/outputs for the scene loop.

use crate::domain::{EntitySnapshot, VelocityInput};

/// Events flowing from the outside world into the scene task. Drained in
/// one batch at the top of every tick, so each one takes effect atomically
/// before the next integration step.
#[derive(Debug, Clone)]
pub enum SceneEvent {
    /// The rendering surface resized; carries the new world rectangle.
    Resize {
        min_x: f32,
        min_y: f32,
        max_x: f32,
        max_y: f32,
    },
    /// Velocity vector for the player entity from the input surface.
    Velocity(VelocityInput),
    /// Inbound mirror command addressed to a named entity.
    Command {
        target: String,
        method: String,
        payload: String,
    },
    Pause,
    Resume,
    SetLevel { level: u32 },
    AddScore { points: i64 },
    ResetSession,
}

/// High-level scene lifecycle, published through a watch channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Paused,
    Ended,
}

/// Snapshot of the scene for a given tick.
#[derive(Debug, Clone)]
pub struct SceneUpdate {
    pub tick: u64,
    pub entities: Vec<EntitySnapshot>,
    pub score: u64,
    pub level: u32,
    pub remaining_seconds: f32,
}

/// One outbound command for the overlay mirror. Fire-and-forget; never
/// retained past dispatch.
#[derive(Debug, Clone)]
pub struct MirrorMessage {
    pub target: String,
    pub method: &'static str,
    pub payload: String,
}
