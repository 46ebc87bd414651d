/// Tuning for the single input-driven player entity.

use crate::domain::state::Rgb;

#[derive(Debug, Clone, Copy)]
pub struct PlayerTuning {
    /// Cap on the magnitude of the externally supplied velocity vector, in
    /// world units per second.
    pub max_speed: f32,

    /// World-space half size used for clamping and visibility.
    pub half_extent: f32,

    pub color: Rgb,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_speed: 5.0,
            half_extent: 0.3,
            color: Rgb { r: 231, g: 76, b: 60 },
        }
    }
}
