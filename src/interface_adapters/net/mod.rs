// Network adapter modules split by external client sockets vs internal HTTP routes.

pub mod client;
pub mod internal;

pub use client::{scene_update_serializer, ws_handler};
pub use internal::{reset_session_handler, set_level_handler};
