use super::{Active, Position, Scale, Sprite};
use crate::defs::ActorInfo;
use crate::world::TextureId;
use glam::Vec2;
use hecs::World;

/// Spawn an actor of kind `info` standing at `pos`.
///
/// `cell_size` converts the catalogue's cell-relative height into world units.
pub fn spawn_actor(
    world: &mut World,
    info: &'static ActorInfo,
    pos: Vec2,
    cell_size: f32,
    sprite: TextureId,
) -> hecs::Entity {
    world.spawn((
        Position(pos.extend(info.z * cell_size)),
        Scale(info.scale),
        Active(true),
        info.behavior,
        Sprite(sprite),
    ))
}
