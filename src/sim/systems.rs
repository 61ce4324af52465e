use glam::Vec2;
use hecs::World;
use smallvec::SmallVec;

use super::collision::{try_move, try_move_with_slide};
use super::{Active, Behavior, Intents, Position};
use crate::config::MoveConfig;
use crate::world::{Cell, EMPTY, GridMap, Layer, Pose};

/// Something gameplay-relevant that happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    DoorOpened { x: i32, y: i32 },
    Collected(hecs::Entity),
    HazardCollected(hecs::Entity),
    Caught(hecs::Entity),
}

pub type Events = SmallVec<[Event; 4]>;

/* ── Player ───────────────────────────────────────────────────────── */

/// Integrate one frame of intents into `pose`.
///
/// * Forward / backward / strafe moves are all-or-nothing: the move is
///   dropped when its destination cell is not empty.
/// * Turning never collides.
/// * Interact opens a door cell `interact_reach` units ahead.
pub fn player_input(
    pose: &mut Pose,
    grid: &mut GridMap,
    cfg: &MoveConfig,
    intents: Intents,
    dt: f32,
) -> Events {
    let mut events = Events::new();
    let step = cfg.move_speed * dt;

    /* 1. translate along the current heading */
    let fwd = axis(intents, Intents::FORWARD, Intents::BACKWARD);
    if fwd != 0.0 {
        let delta = pose.forward() * fwd * step;
        try_move(grid, &mut pose.pos, delta);
    }

    let side = axis(intents, Intents::STRAFE_RIGHT, Intents::STRAFE_LEFT);
    if side != 0.0 {
        let delta = pose.right() * side * step;
        try_move(grid, &mut pose.pos, delta);
    }

    /* 2. turn (unconditional) */
    let turn = axis(intents, Intents::TURN_RIGHT, Intents::TURN_LEFT);
    if turn != 0.0 {
        pose.turn(turn * cfg.turn_speed * dt);
    }

    /* 3. use */
    if intents.contains(Intents::INTERACT) {
        if let Some((x, y)) = open_door(pose, grid, cfg) {
            events.push(Event::DoorOpened { x, y });
        }
    }

    events
}

#[inline]
fn axis(intents: Intents, pos: Intents, neg: Intents) -> f32 {
    intents.contains(pos) as i32 as f32 - intents.contains(neg) as i32 as f32
}

/// Clear the door cell in front of the player, if there is one.
/// Opening an already open door finds `Empty` and does nothing.
fn open_door(pose: &Pose, grid: &mut GridMap, cfg: &MoveConfig) -> Option<(i32, i32)> {
    let door = cfg.door?;
    let reach = pose.pos + pose.forward() * cfg.interact_reach;
    let (x, y) = grid.cell_coords(reach);
    if grid.wall(x, y) != Cell::Solid(door) {
        return None;
    }
    grid.set(Layer::Walls, x, y, EMPTY)?;
    log::info!("door opened at ({x}, {y})");
    Some((x, y))
}

/* ── Actors ───────────────────────────────────────────────────────── */

/// Run every active actor's behaviour once against the player position.
pub fn actor_think(world: &mut World, grid: &GridMap, player: Vec2, dt: f32) -> Events {
    let mut events = Events::new();

    for (ent, (pos, active, behavior)) in
        world.query_mut::<(&mut Position, &mut Active, &Behavior)>()
    {
        if !active.0 {
            continue;
        }
        let mut xy = pos.0.truncate();
        let to_player = player - xy;
        let dist = to_player.length();

        match *behavior {
            Behavior::Pickup { radius } => {
                if dist <= radius {
                    active.0 = false;
                    events.push(Event::Collected(ent));
                }
            }
            Behavior::HazardPickup { radius } => {
                if dist <= radius {
                    active.0 = false;
                    events.push(Event::HazardCollected(ent));
                }
            }
            Behavior::Hostile {
                speed,
                contact_radius,
            } => {
                if dist <= contact_radius {
                    events.push(Event::Caught(ent));
                    continue;
                }
                let delta = to_player.normalize_or_zero() * speed * dt;
                try_move_with_slide(grid, &mut xy, delta);
                pos.0.x = xy.x;
                pos.0.y = xy.y;
            }
        }
    }

    events
}

/*──────────────────────────────── Tests ───────────────────────────────*/
