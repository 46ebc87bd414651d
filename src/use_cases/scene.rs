// The scene loop: one task owns every entity, the viewport, the spawn
// timer, the mirror bridge and the session counters. All external mutation
// arrives through the event channel and is applied between ticks.

use crate::domain::systems::spawn::SpawnTimer;
use crate::domain::systems::{motion, spawn, visibility};
use crate::domain::tuning::drifter::DrifterTuning;
use crate::domain::tuning::mirror::MirrorTuning;
use crate::domain::tuning::player::PlayerTuning;
use crate::domain::{EntitySnapshot, SimEntity, VelocityInput, Viewport};
use crate::use_cases::mirror::MirrorBridge;
use crate::use_cases::session::Session;
use crate::use_cases::types::{MirrorMessage, SceneEvent, SceneUpdate, SessionState};

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Notify, broadcast, mpsc, watch};
use tracing::{debug, info};

/// Everything configurable about one scene, supplied at construction.
#[derive(Debug, Clone, Default)]
pub struct SceneTuning {
    pub drifter: DrifterTuning,
    pub player: PlayerTuning,
    pub mirror: MirrorTuning,
    pub countdown: CountdownTuning,
}

#[derive(Debug, Clone, Copy)]
pub struct CountdownTuning {
    pub seconds: f32,
}

impl Default for CountdownTuning {
    fn default() -> Self {
        Self { seconds: 120.0 }
    }
}

pub async fn scene_task(
    mut event_rx: mpsc::Receiver<SceneEvent>,
    update_tx: broadcast::Sender<SceneUpdate>,
    mirror_tx: broadcast::Sender<MirrorMessage>,
    session_state_tx: watch::Sender<SessionState>,
    tick_interval: Duration,
    shutdown: Arc<Notify>,
    tuning: SceneTuning,
) {
    let mut tick: u64 = 0;
    let mut next_entity_id: u64 = 1;
    let mut rng = StdRng::from_entropy();

    let mut viewport = Viewport::default();
    let mut drifters: Vec<SimEntity> = Vec::new();

    // The player starts just inside the lower-left corner of the fallback
    // rectangle, like the input surface places its cursor.
    let (px, py) = viewport.normalized_to_world(0.05, 0.05);
    let mut player = SimEntity::player(
        next_entity_id,
        px,
        py,
        tuning.player.half_extent,
        tuning.player.color,
    );
    next_entity_id = next_entity_id.wrapping_add(1);

    let mut velocity = VelocityInput::default();
    let mut spawn_timer = SpawnTimer::new(tuning.drifter.interval);
    let mut bridge = MirrorBridge::new(tuning.mirror.clone());
    let mut session = Session::new(tuning.countdown.seconds);
    let mut paused = false;
    let mut ended = false;

    let _ = session_state_tx.send(SessionState::Running);

    let mut interval = tokio::time::interval(tick_interval);
    let mut last_tick = Instant::now();

    loop {
        tokio::select! {
            _ = shutdown.notified() => {
                // Exit cleanly when the scene is torn down.
                break;
            }
            _ = interval.tick() => {}
        }

        // Drain inbound events so every write lands atomically before this
        // tick's integration step reads entity state.
        while let Ok(ev) = event_rx.try_recv() {
            match ev {
                SceneEvent::Resize {
                    min_x,
                    min_y,
                    max_x,
                    max_y,
                } => {
                    viewport = viewport.with_rect(min_x, min_y, max_x, max_y);
                    // The normalized mapping changed; force a fresh mirror
                    // update and keep the player inside the new rectangle.
                    bridge.reset();
                    motion::clamp_to_viewport(&mut player, &viewport);
                    debug!(min_x, min_y, max_x, max_y, "viewport resized");
                }
                SceneEvent::Velocity(v) => {
                    velocity = clamp_speed(v, tuning.player.max_speed);
                }
                SceneEvent::Command {
                    target,
                    method,
                    payload,
                } => {
                    if target == bridge.target() {
                        bridge.receive(&method, &payload, &mut player, &viewport);
                    } else {
                        debug!(%target, "dropping command for unknown target");
                    }
                }
                SceneEvent::Pause => {
                    paused = true;
                    velocity = VelocityInput::default();
                    session.countdown.pause();
                    if !ended {
                        let _ = session_state_tx.send(SessionState::Paused);
                    }
                }
                SceneEvent::Resume => {
                    if !ended {
                        paused = false;
                        session.countdown.resume();
                        let _ = session_state_tx.send(SessionState::Running);
                    }
                }
                SceneEvent::SetLevel { level } => {
                    session.set_level(level);
                    ended = false;
                    paused = false;
                    let _ = session_state_tx.send(SessionState::Running);
                    info!(level = session.level, "level set");
                }
                SceneEvent::AddScore { points } => {
                    session.add_score(points);
                }
                SceneEvent::ResetSession => {
                    session.reset();
                    spawn_timer.reset();
                    ended = false;
                    paused = false;
                    let _ = session_state_tx.send(SessionState::Running);
                    info!("session reset");
                }
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last_tick).as_secs_f32();
        last_tick = now;

        if !paused && dt > 0.0 {
            if session.countdown.tick(dt) {
                // The countdown ending pauses the scene in place.
                ended = true;
                paused = true;
                velocity = VelocityInput::default();
                let _ = session_state_tx.send(SessionState::Ended);
                info!("countdown finished; scene paused");
            }

            motion::advance_player(&mut player, velocity, dt, &viewport);
            for d in &mut drifters {
                motion::advance(d, dt, &viewport);
            }

            if spawn_timer.tick(dt) {
                let id = next_entity_id;
                next_entity_id = next_entity_id.wrapping_add(1);
                let d = spawn::spawn_drifter(&mut rng, &tuning.drifter, &viewport, id);
                debug!(id, x = d.x, y = d.y, "spawned drifter");
                drifters.push(d);
            }

            // Recycle drifters that have fully crossed and left the margin
            // region; ones still on approach are kept.
            drifters.retain(|d| {
                visibility::is_within_margin_region(d, &viewport)
                    || !visibility::is_departing(d, &viewport)
            });
        }

        bridge.publish(&player, &viewport, &mirror_tx);

        tick += 1;
        let mut entities: Vec<EntitySnapshot> = Vec::with_capacity(drifters.len() + 1);
        entities.push(EntitySnapshot::from(&player));
        entities.extend(drifters.iter().map(EntitySnapshot::from));

        let _ = update_tx.send(SceneUpdate {
            tick,
            entities,
            score: session.score,
            level: session.level,
            remaining_seconds: session.countdown.remaining(),
        });
    }
}

// Caps the input velocity magnitude so a hostile input surface cannot fling
// the player across the scene in one tick.
fn clamp_speed(v: VelocityInput, max_speed: f32) -> VelocityInput {
    let len = (v.vx * v.vx + v.vy * v.vy).sqrt();
    if len > max_speed && len > 0.0 {
        let scale = max_speed / len;
        VelocityInput {
            vx: v.vx * scale,
            vy: v.vy * scale,
        }
    } else {
        v
    }
}
