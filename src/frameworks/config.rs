use std::{env, time::Duration};

// Runtime/server constants (not scene tuning).

pub fn http_port() -> u16 {
    env::var("SCENE_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3001)
}

pub fn countdown_seconds() -> f32 {
    env::var("SCENE_COUNTDOWN_SECONDS")
        .ok()
        .and_then(|value| value.parse::<f32>().ok())
        .filter(|secs| *secs > 0.0)
        .unwrap_or(120.0)
}

pub const EVENT_CHANNEL_CAPACITY: usize = 1024;
pub const UPDATE_BROADCAST_CAPACITY: usize = 128;
pub const MIRROR_BROADCAST_CAPACITY: usize = 256;

pub const TICK_INTERVAL: Duration = Duration::from_millis(1000 / 60);
