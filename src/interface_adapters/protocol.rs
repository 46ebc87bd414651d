// Wire protocol DTOs and conversions for public scene server messages.
// Internal service-to-service DTOs should live outside this module.

use crate::domain::{EntityKind, EntitySnapshot, VelocityInput};
use crate::use_cases::{MirrorMessage, SceneEvent, SceneUpdate, SessionState};
use serde::{Deserialize, Serialize};

/// Messages the server sends to connected clients over the WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    // Snapshot of the scene for a given tick.
    SceneUpdate(SceneUpdateDto),
    // High-level session transitions (running, paused, ended).
    SessionState(SessionStateDto),
    // Mirror command for the overlay surface's copy of the player.
    Mirror(MirrorCommandDto),
}

/// Messages a client sends to the server over the WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    // Inbound mirror command addressed to a named entity.
    Command(MirrorCommandDto),
    // Velocity vector for the player entity.
    Velocity(VelocityDto),
    // New world rectangle after the rendering surface resized.
    Resize(ViewportRectDto),
    Pause,
    Resume,
    SetLevel(LevelDto),
    AddScore(ScoreDto),
    ResetSession,
}

/// One mirror command in either direction: a named target, a method and a
/// single string-encoded payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorCommandDto {
    pub target: String,
    pub method: String,
    pub payload: String,
}

impl From<MirrorMessage> for MirrorCommandDto {
    fn from(msg: MirrorMessage) -> Self {
        Self {
            target: msg.target,
            method: msg.method.to_string(),
            payload: msg.payload,
        }
    }
}

/// Velocity payload; missing fields default to zero.
#[derive(Debug, Clone, Deserialize)]
pub struct VelocityDto {
    #[serde(default)]
    pub vx: f32,
    #[serde(default)]
    pub vy: f32,
}

/// World rectangle reported by the rendering surface.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewportRectDto {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LevelDto {
    pub level: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoreDto {
    pub points: i64,
}

impl From<ClientMessage> for SceneEvent {
    fn from(msg: ClientMessage) -> Self {
        match msg {
            ClientMessage::Command(cmd) => SceneEvent::Command {
                target: cmd.target,
                method: cmd.method,
                payload: cmd.payload,
            },
            ClientMessage::Velocity(v) => SceneEvent::Velocity(VelocityInput {
                vx: v.vx,
                vy: v.vy,
            }),
            ClientMessage::Resize(r) => SceneEvent::Resize {
                min_x: r.min_x,
                min_y: r.min_y,
                max_x: r.max_x,
                max_y: r.max_y,
            },
            ClientMessage::Pause => SceneEvent::Pause,
            ClientMessage::Resume => SceneEvent::Resume,
            ClientMessage::SetLevel(l) => SceneEvent::SetLevel { level: l.level },
            ClientMessage::AddScore(s) => SceneEvent::AddScore { points: s.points },
            ClientMessage::ResetSession => SceneEvent::ResetSession,
        }
    }
}

/// Snapshot of the scene sent to clients on each tick.
#[derive(Debug, Clone, Serialize)]
pub struct SceneUpdateDto {
    pub tick: u64,
    pub entities: Vec<EntityStateDto>,
    pub score: u64,
    pub level: u32,
    pub remaining_seconds: f32,
}

impl From<SceneUpdate> for SceneUpdateDto {
    fn from(update: SceneUpdate) -> Self {
        Self {
            tick: update.tick,
            entities: update.entities.iter().map(EntityStateDto::from).collect(),
            score: update.score,
            level: update.level,
            remaining_seconds: update.remaining_seconds,
        }
    }
}

/// Flattened entity state for wire transmission in scene updates.
#[derive(Debug, Clone, Serialize)]
pub struct EntityStateDto {
    pub id: u64,
    pub kind: EntityKindDto,
    pub x: f32,
    pub y: f32,
    pub active: bool,
    pub color: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKindDto {
    Player,
    Drifter,
}

impl From<&EntitySnapshot> for EntityStateDto {
    fn from(entity: &EntitySnapshot) -> Self {
        Self {
            id: entity.id,
            kind: match entity.kind {
                EntityKind::Player => EntityKindDto::Player,
                EntityKind::Drifter => EntityKindDto::Drifter,
            },
            x: entity.x,
            y: entity.y,
            active: entity.active,
            color: entity.color.to_hex(),
        }
    }
}

/// Session lifecycle state sent to clients for UI flow.
#[derive(Debug, Clone, Serialize)]
pub enum SessionStateDto {
    Running,
    Paused,
    Ended,
}

impl From<SessionState> for SessionStateDto {
    fn from(state: SessionState) -> Self {
        match state {
            SessionState::Running => SessionStateDto::Running,
            SessionState::Paused => SessionStateDto::Paused,
            SessionState::Ended => SessionStateDto::Ended,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_messages_parse_from_tagged_json() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"Velocity","data":{"vx":1.5}}"#)
                .expect("velocity message parses");
        match SceneEvent::from(msg) {
            SceneEvent::Velocity(v) => {
                assert_eq!(v.vx, 1.5);
                assert_eq!(v.vy, 0.0);
            }
            other => panic!("unexpected event: {other:?}"),
        }

        let msg: ClientMessage = serde_json::from_str(r#"{"type":"Pause"}"#)
            .expect("unit variant parses");
        assert!(matches!(SceneEvent::from(msg), SceneEvent::Pause));
    }

    #[test]
    fn mirror_messages_serialize_with_string_payloads() {
        let dto = MirrorCommandDto::from(MirrorMessage {
            target: "overlay-cube".to_string(),
            method: "SetPositionFromNormalized",
            payload: "0.5,0.25".to_string(),
        });
        let json = serde_json::to_string(&ServerMessage::Mirror(dto)).expect("serializes");
        assert!(json.contains(r#""type":"Mirror""#));
        assert!(json.contains(r#""payload":"0.5,0.25""#));
    }
}
