// Pure simulation systems applied by the scene loop each tick.

pub mod motion;
pub mod spawn;
pub mod visibility;
