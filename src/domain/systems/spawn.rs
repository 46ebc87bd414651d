// Spawn cadence and off-screen placement for transient drifters.

use crate::domain::state::SimEntity;
use crate::domain::tuning::drifter::{DrifterTuning, SpawnMode};
use crate::domain::viewport::Viewport;
use rand::Rng;
use tracing::warn;

// Fixed world position used when no usable viewport exists at spawn time.
// Matches the off-screen-left default the scene uses for its own entities.
const FALLBACK_X: f32 = -10.0;
const FALLBACK_Y: f32 = 0.0;

// Random directions shorter than this are considered degenerate and redrawn.
const MIN_DIRECTION_LEN: f32 = 1e-4;
const MAX_DIRECTION_DRAWS: u32 = 8;

/// Countdown driving the spawn cadence. Fires at most once per tick; a
/// reset always restarts the full interval and can never deliver a stale
/// expiry from before the reset.
#[derive(Debug, Clone, Copy)]
pub struct SpawnTimer {
    interval: f32,
    remaining: f32,
}

impl SpawnTimer {
    /// Primes the first fire at half the interval so a fresh scene does not
    /// sit empty for a full period.
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            remaining: interval * 0.5,
        }
    }

    /// Decrements by `dt`; returns true when the timer fired this tick.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = self.interval;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.remaining = self.interval;
    }
}

/// Creates one drifter just outside the visible rectangle, pointed so it
/// travels into (and across) the view. Spawned drifters never wrap; the
/// scene recycles them after they have fully crossed.
pub fn spawn_drifter<R: Rng>(
    rng: &mut R,
    cfg: &DrifterTuning,
    vp: &Viewport,
    id: u64,
) -> SimEntity {
    if vp.is_degenerate() {
        warn!(id, "no usable viewport at spawn time; using fallback position");
        return SimEntity::drifter(
            id,
            FALLBACK_X,
            FALLBACK_Y,
            1.0,
            0.0,
            cfg.speed_min,
            cfg.half_extent,
        );
    }

    let speed = rng.gen_range(cfg.speed_min..=cfg.speed_max);

    let (nx, ny, dir_x, dir_y) = match cfg.mode {
        SpawnMode::FromLeft => {
            let ny = rng.gen_range(cfg.y_min..=cfg.y_max);
            (-0.05, ny, 1.0, 0.0)
        }
        SpawnMode::FromRight => {
            let ny = rng.gen_range(cfg.y_min..=cfg.y_max);
            (1.05, ny, -1.0, 0.0)
        }
        SpawnMode::Radial => {
            let (dx, dy) = unit_direction(rng);
            // Opposite the travel direction so the drifter crosses the
            // center and keeps going.
            (
                0.5 - dx * vp.spawn_margin,
                0.5 - dy * vp.spawn_margin,
                dx,
                dy,
            )
        }
    };

    let (x, y) = vp.normalized_to_world(nx, ny);
    SimEntity::drifter(id, x, y, dir_x, dir_y, speed, cfg.half_extent)
}

/// Uniform random unit direction via rejection sampling, bounded to a small
/// number of draws before falling back to +X so spawn latency stays fixed.
fn unit_direction<R: Rng>(rng: &mut R) -> (f32, f32) {
    for _ in 0..MAX_DIRECTION_DRAWS {
        let x: f32 = rng.gen_range(-1.0..=1.0);
        let y: f32 = rng.gen_range(-1.0..=1.0);
        if let Some(d) = normalize(x, y) {
            return d;
        }
    }
    (1.0, 0.0)
}

/// Normalizes a vector, rejecting near-zero magnitudes so NaN never enters
/// entity state.
fn normalize(x: f32, y: f32) -> Option<(f32, f32)> {
    let len = (x * x + y * y).sqrt();
    if len < MIN_DIRECTION_LEN {
        return None;
    }
    Some((x / len, y / len))
}
