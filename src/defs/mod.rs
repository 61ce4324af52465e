//! Static actor catalogue.
//!
//! A level only names an actor kind and a position; everything else
//! (behaviour parameters, billboard size, height above the floor) comes
//! from this table.

use glam::{Vec2, vec2};
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::sim::Behavior;

#[derive(Debug)]
pub struct ActorInfo {
    pub id: &'static str,
    pub behavior: Behavior,
    /// Billboard size relative to one grid cell (x = width, y = height).
    pub scale: Vec2,
    /// Height of the billboard centre above the floor, in cells.
    pub z: f32,
}

pub static ACTORS: &[ActorInfo] = &[
    ActorInfo {
        id: "MEDKIT",
        behavior: Behavior::Pickup { radius: 24.0 },
        scale: vec2(0.35, 0.35),
        z: 0.175,
    },
    ActorInfo {
        id: "BARREL",
        behavior: Behavior::HazardPickup { radius: 28.0 },
        scale: vec2(0.5, 0.6),
        z: 0.3,
    },
    ActorInfo {
        id: "GHOST",
        behavior: Behavior::Hostile {
            speed: 40.0,
            contact_radius: 20.0,
        },
        scale: vec2(0.7, 0.9),
        z: 0.5,
    },
];

static BY_ID: Lazy<HashMap<&'static str, &'static ActorInfo>> =
    Lazy::new(|| ACTORS.iter().map(|info| (info.id, info)).collect());

pub fn by_id(id: &str) -> Option<&'static ActorInfo> {
    BY_ID.get(id).copied()
}
