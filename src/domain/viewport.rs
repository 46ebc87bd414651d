// World-space viewport and the normalized [0,1]x[0,1] coordinate model
// shared by wrap decisions, spawn placement and the mirror protocol.

/// The world rectangle currently visible, plus the margins used for wrap
/// and off-screen spawn decisions.
///
/// Conversions are pure functions of a snapshot of this struct. The scene
/// loop replaces the rectangle when the rendering surface resizes; nothing
/// else mutates it.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,

    /// Fractional extension beyond [0,1] on each axis. Entities are allowed
    /// to fully leave the visible rectangle before a wrap or recycle fires.
    pub margin: f32,

    /// Distance, as a fraction of the normalized extent, at which radial
    /// spawns are placed from the center.
    pub spawn_margin: f32,
}

impl Default for Viewport {
    // Documented fallback rectangle used until the first resize arrives.
    fn default() -> Self {
        Self {
            min_x: -5.0,
            max_x: 5.0,
            min_y: -5.0,
            max_y: 5.0,
            margin: 0.08,
            spawn_margin: 0.6,
        }
    }
}

impl Viewport {
    /// Replaces the visible rectangle, keeping the configured margins.
    pub fn with_rect(self, min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
            ..self
        }
    }

    /// True when either axis has no usable extent. A degenerate viewport
    /// means the rendering surface has not reported a real size; callers
    /// fall back to fixed positions instead of dividing by zero.
    pub fn is_degenerate(&self) -> bool {
        !(self.max_x > self.min_x) || !(self.max_y > self.min_y)
    }

    /// Maps a world point into normalized coordinates. Values outside the
    /// rectangle map outside [0,1] and are intentionally not clamped so
    /// callers can detect off-screen state.
    pub fn world_to_normalized(&self, x: f32, y: f32) -> (f32, f32) {
        (
            axis_to_normalized(x, self.min_x, self.max_x),
            axis_to_normalized(y, self.min_y, self.max_y),
        )
    }

    /// Exact inverse of [`Self::world_to_normalized`] under the same
    /// viewport snapshot.
    pub fn normalized_to_world(&self, nx: f32, ny: f32) -> (f32, f32) {
        (
            self.min_x + nx * (self.max_x - self.min_x),
            self.min_y + ny * (self.max_y - self.min_y),
        )
    }

    /// True iff both normalized coordinates lie in `[-margin, 1 + margin]`.
    pub fn is_within_margin(&self, x: f32, y: f32) -> bool {
        let (nx, ny) = self.world_to_normalized(x, y);
        let lo = -self.margin;
        let hi = 1.0 + self.margin;
        nx >= lo && nx <= hi && ny >= lo && ny <= hi
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        )
    }
}

fn axis_to_normalized(v: f32, min: f32, max: f32) -> f32 {
    let extent = max - min;
    if extent > 0.0 { (v - min) / extent } else { 0.0 }
}
