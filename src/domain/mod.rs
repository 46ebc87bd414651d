// Domain layer: core simulation types and rules.

pub mod state;
pub mod systems;
pub mod tuning;
pub mod viewport;

pub use state::{EntityKind, EntitySnapshot, Rgb, SimEntity, VelocityInput};
pub use viewport::Viewport;
