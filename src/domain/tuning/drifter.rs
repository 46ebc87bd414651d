/// Spawn tuning for transient drifters.
///
/// Keep this separate from runtime/server configuration (tick rates, buffer
/// sizes, etc.). Immutable after construction.

/// Where newly spawned drifters enter from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnMode {
    /// Enter just outside the left edge, travelling right.
    FromLeft,
    /// Enter just outside the right edge, travelling left.
    FromRight,
    /// Enter from a random direction, placed opposite it past the margin.
    Radial,
}

#[derive(Debug, Clone, Copy)]
pub struct DrifterTuning {
    /// Seconds between spawns, always > 0.
    pub interval: f32,

    /// Uniform speed range in world units per second, `min <= max`, both > 0.
    pub speed_min: f32,
    pub speed_max: f32,

    /// Normalized vertical placement range for directed spawns.
    pub y_min: f32,
    pub y_max: f32,

    pub mode: SpawnMode,

    /// World-space half size given to spawned drifters.
    pub half_extent: f32,
}

impl Default for DrifterTuning {
    fn default() -> Self {
        Self {
            interval: 1.5,
            speed_min: 1.0,
            speed_max: 4.0,
            y_min: 0.2,
            y_max: 0.8,
            mode: SpawnMode::FromLeft,
            half_extent: 0.25,
        }
    }
}
