/// Protocol tuning for the overlay mirror bridge.

#[derive(Debug, Clone)]
pub struct MirrorTuning {
    /// Name of the remote object that mirror commands address.
    pub target: String,

    /// Minimum normalized movement on either axis before another position
    /// update goes out. Bounds outbound volume to roughly one message per
    /// visually significant move instead of one per tick.
    pub threshold: f32,

    /// The overlay surface uses a top-origin normalized Y while the scene is
    /// bottom-origin. When set, outbound ny is sent as `1 - ny` and inbound
    /// ny is flipped back. This is the only place the flip is applied.
    pub flip_y: bool,
}

impl Default for MirrorTuning {
    fn default() -> Self {
        Self {
            target: "overlay-cube".to_string(),
            threshold: 0.0005,
            flip_y: true,
        }
    }
}
