// Use cases layer: application workflows for the scene server.

pub mod mirror;
pub mod scene;
pub mod session;
pub mod types;

pub use scene::{SceneTuning, scene_task};
pub use types::{MirrorMessage, SceneEvent, SceneUpdate, SessionState};
