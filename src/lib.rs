//! Grid raycaster: a DDA wall pass, floor/ceiling casting and depth-tested
//! billboard sprites, emitted as plain rectangles for any pixel back-end.

pub mod config;
pub mod defs;
pub mod engine;
pub mod renderer;
pub mod sim;
pub mod world;
