pub mod engine;
pub mod planes;
pub mod sprites;
pub mod types;
pub mod walls;

pub use engine::{Engine, EngineError};
pub use types::{Column, DepthBuffer, NO_HIT, Screen, WallHit};
pub use walls::{cast_axis, cast_ray};
