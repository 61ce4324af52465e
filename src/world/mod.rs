mod camera;
pub mod demo;
mod grid;
mod texture;

pub use camera::{Pose, direction, normalize_degrees};

pub use grid::{Cell, EMPTY, GridError, GridMap, Layer};

pub use texture::{Rgba, Texture, TextureBank, TextureError, TextureId};
