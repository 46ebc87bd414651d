// Keeps the overlay's copy of the player entity in step with the scene.
//
// The scene entity is the single source of truth; the overlay is a pure
// mirror driven by outbound messages, and the only way the overlay side can
// write back is through the documented inbound command path handled by
// `receive`.

use crate::domain::tuning::mirror::MirrorTuning;
use crate::domain::viewport::Viewport;
use crate::domain::{Rgb, SimEntity};
use crate::use_cases::types::MirrorMessage;
use tokio::sync::broadcast;
use tracing::debug;

pub const METHOD_SET_POSITION: &str = "SetPosition";
pub const METHOD_SET_ACTIVE: &str = "SetActive";
pub const METHOD_SET_COLOR: &str = "SetColor";

const OUT_SET_POSITION: &str = "SetPositionFromNormalized";
const OUT_SET_ACTIVE: &str = "SetActive";

pub struct MirrorBridge {
    tuning: MirrorTuning,
    // Last successfully sent normalized position; unset until the first
    // send lands, and cleared on resize because the mapping changed.
    last_nx: Option<f32>,
    last_ny: Option<f32>,
    last_active: Option<bool>,
}

impl MirrorBridge {
    pub fn new(tuning: MirrorTuning) -> Self {
        Self {
            tuning,
            last_nx: None,
            last_ny: None,
            last_active: None,
        }
    }

    pub fn target(&self) -> &str {
        &self.tuning.target
    }

    /// Forgets the last sent state so the next publish sends a full update.
    /// Called when the viewport rectangle changes.
    pub fn reset(&mut self) {
        self.last_nx = None;
        self.last_ny = None;
        self.last_active = None;
    }

    /// Emits position/active updates for the bridged entity when they have
    /// moved past the configured threshold. Sending is fire-and-forget: a
    /// send with no overlay connected fails, the last-sent state stays
    /// untouched and the next eligible tick retries naturally.
    pub fn publish(
        &mut self,
        e: &SimEntity,
        vp: &Viewport,
        tx: &broadcast::Sender<MirrorMessage>,
    ) {
        if vp.is_degenerate() {
            return;
        }

        if self.last_active != Some(e.active) {
            let sent = tx
                .send(self.message(OUT_SET_ACTIVE, e.active.to_string()))
                .is_ok();
            if sent {
                self.last_active = Some(e.active);
            } else {
                debug!("mirror transport unavailable; active flag not sent");
            }
        }

        let (nx, mut ny) = vp.world_to_normalized(e.x, e.y);
        if self.tuning.flip_y {
            ny = 1.0 - ny;
        }

        let moved = match (self.last_nx, self.last_ny) {
            (Some(lx), Some(ly)) => {
                (nx - lx).abs() > self.tuning.threshold || (ny - ly).abs() > self.tuning.threshold
            }
            _ => true,
        };
        if !moved {
            return;
        }

        let payload = format!("{nx},{ny}");
        match tx.send(self.message(OUT_SET_POSITION, payload)) {
            Ok(_) => {
                self.last_nx = Some(nx);
                self.last_ny = Some(ny);
            }
            Err(_) => debug!("mirror transport unavailable; position not sent"),
        }
    }

    /// Applies one inbound command to the bridged entity. Malformed or
    /// out-of-domain payloads are dropped whole: no partial write, no error
    /// raised to the caller.
    pub fn receive(&self, method: &str, payload: &str, e: &mut SimEntity, vp: &Viewport) {
        match method {
            METHOD_SET_POSITION => {
                let Some((nx, ny)) = parse_normalized_pair(payload) else {
                    debug!(payload, "dropping unparsable SetPosition payload");
                    return;
                };
                let ny = if self.tuning.flip_y { 1.0 - ny } else { ny };
                let (x, y) = vp.normalized_to_world(nx, ny);
                // Single atomic position write, visible before the next tick
                // reads the entity.
                e.x = x;
                e.y = y;
            }
            METHOD_SET_ACTIVE => match parse_flag(payload) {
                Some(active) => e.active = active,
                None => debug!(payload, "dropping unparsable SetActive payload"),
            },
            METHOD_SET_COLOR => match Rgb::from_hex(payload) {
                Some(color) => e.color = color,
                None => debug!(payload, "dropping unparsable SetColor payload"),
            },
            _ => debug!(method, "dropping unknown mirror command"),
        }
    }

    fn message(&self, method: &'static str, payload: String) -> MirrorMessage {
        MirrorMessage {
            target: self.tuning.target.clone(),
            method,
            payload,
        }
    }
}

// Parses "nx,ny" with locale-invariant decimals, requiring both fields to
// be finite. Values are clamped into [0,1] after parsing.
fn parse_normalized_pair(payload: &str) -> Option<(f32, f32)> {
    let (a, b) = payload.split_once(',')?;
    let nx: f32 = a.trim().parse().ok()?;
    let ny: f32 = b.trim().parse().ok()?;
    if !nx.is_finite() || !ny.is_finite() {
        return None;
    }
    Some((nx.clamp(0.0, 1.0), ny.clamp(0.0, 1.0)))
}

// Accepts "true"/"false" (any case) and "1"/"0".
fn parse_flag(payload: &str) -> Option<bool> {
    match payload.trim() {
        "1" => Some(true),
        "0" => Some(false),
        other if other.eq_ignore_ascii_case("true") => Some(true),
        other if other.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}
