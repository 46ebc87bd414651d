use crate::use_cases::{MirrorMessage, SceneEvent, SceneUpdate, SessionState};
use axum::extract::ws::Utf8Bytes;
use std::sync::Arc;
use tokio::sync::{Notify, broadcast, mpsc, watch};

#[derive(Clone)]
pub struct AppState {
    // Inputs flowing from the network into the scene loop.
    pub event_tx: mpsc::Sender<SceneEvent>,
    // Scene updates produced by the scene loop (domain structs).
    pub update_tx: broadcast::Sender<SceneUpdate>,
    // Serialized scene updates, shared across all connections.
    pub update_bytes_tx: broadcast::Sender<Utf8Bytes>,
    // Latest serialized scene update for lag recovery.
    pub update_latest_tx: watch::Sender<Utf8Bytes>,
    // Throttled mirror commands for the overlay surface.
    pub mirror_tx: broadcast::Sender<MirrorMessage>,
    // High-level session state (running/paused/ended).
    pub session_state_tx: watch::Sender<SessionState>,
    // Tears down the scene task on shutdown.
    pub scene_shutdown: Arc<Notify>,
}
