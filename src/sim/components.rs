use bitflags::bitflags;
use glam::{Vec2, Vec3};

use crate::world::TextureId;

/// World-space position.  z is the billboard centre above the floor.
#[derive(Debug, Clone, Copy)]
pub struct Position(pub Vec3);

/// Per-axis billboard scale in cells (x = width, y = height).
#[derive(Debug, Clone, Copy)]
pub struct Scale(pub Vec2);

/// Inactive actors are neither simulated nor drawn; they are never despawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Active(pub bool);

#[derive(Debug, Clone, Copy)]
pub struct Sprite(pub TextureId);

/// What an actor does when the player comes close.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behavior {
    /// Disappears when the player is within `radius`.
    Pickup { radius: f32 },
    /// Like `Pickup`, but also bumps the pickup counter shown on the HUD.
    HazardPickup { radius: f32 },
    /// Walks towards the player; touching it ends the game.
    Hostile { speed: f32, contact_radius: f32 },
}

bitflags! {
    /// Directional intents for one frame, already abstracted from raw input.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Intents: u8 {
        const FORWARD      = 0x01;
        const BACKWARD     = 0x02;
        const TURN_LEFT    = 0x04;
        const TURN_RIGHT   = 0x08;
        const STRAFE_LEFT  = 0x10;
        const STRAFE_RIGHT = 0x20;
        const INTERACT     = 0x40;
    }
}

/// Gameplay signals read by the outer loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameStatus {
    pub game_over: bool,
    /// Counter bumped by hazard pickups.
    pub pickups: u32,
    /// Plain pickups taken (not part of the HUD counter).
    pub collected: u32,
}
