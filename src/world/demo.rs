//! Built-in level used by the viewers and the end-to-end tests.
//!
//! Textures are generated procedurally so the crate runs without any asset
//! files on disk.

use glam::{Vec2, vec2};

use super::{GridError, GridMap, Pose, Rgba, Texture, TextureBank, TextureError, TextureId};

pub const CELL: f32 = 64.0;
const TEX: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Texture(#[from] TextureError),
}

/// Everything a loader would normally hand to the engine.
pub struct DemoLevel {
    pub grid: GridMap,
    pub textures: TextureBank,
    pub spawn: Pose,
    pub door: TextureId,
    /// `(actor kind name, world position, sprite texture)`
    pub actors: Vec<(&'static str, Vec2, TextureId)>,
}

#[rustfmt::skip]
const WALLS: [u8; 12 * 12] = [
    1,1,1,1,1,1,1,1,1,1,1,1,
    1,0,0,0,0,0,0,1,0,0,0,1,
    1,0,0,0,0,0,0,1,0,0,0,1,
    1,0,0,2,0,0,0,3,0,0,0,1,
    1,0,0,0,0,0,0,1,0,0,0,1,
    1,0,0,0,0,2,0,1,1,3,1,1,
    1,0,0,0,0,0,0,0,0,0,0,1,
    1,1,0,1,1,0,0,0,0,2,0,1,
    1,0,0,0,1,0,0,0,0,0,0,1,
    1,0,0,0,1,0,0,2,0,0,0,1,
    1,0,0,0,0,0,0,0,0,0,0,1,
    1,1,1,1,1,1,1,1,1,1,1,1,
];

fn bricks(name: &str, mortar: Rgba, brick: Rgba) -> Texture {
    let mut pixels = Vec::with_capacity(TEX * TEX);
    for y in 0..TEX {
        for x in 0..TEX {
            let row = y / 8;
            let shift = if row % 2 == 0 { 0 } else { 8 };
            let is_mortar = y % 8 == 0 || (x + shift) % 16 == 0;
            pixels.push(if is_mortar { mortar } else { brick });
        }
    }
    Texture {
        name: name.into(),
        w: TEX,
        h: TEX,
        pixels,
    }
}

fn door(name: &str) -> Texture {
    let frame = Rgba::opaque(70, 50, 30);
    let plank = Rgba::opaque(140, 100, 50);
    let mut pixels = Vec::with_capacity(TEX * TEX);
    for y in 0..TEX {
        for x in 0..TEX {
            let edge = x < 2 || x >= TEX - 2 || y < 2 || y >= TEX - 2 || x % 8 == 0;
            pixels.push(if edge { frame } else { plank });
        }
    }
    Texture {
        name: name.into(),
        w: TEX,
        h: TEX,
        pixels,
    }
}

/// Filled disc with fully transparent corners.
fn disc(name: &str, colour: Rgba) -> Texture {
    let r = TEX as f32 * 0.5;
    let mut pixels = Vec::with_capacity(TEX * TEX);
    for y in 0..TEX {
        for x in 0..TEX {
            let d = vec2(x as f32 + 0.5 - r, y as f32 + 0.5 - r).length();
            pixels.push(if d <= r { colour } else { Rgba::TRANSPARENT });
        }
    }
    Texture {
        name: name.into(),
        w: TEX,
        h: TEX,
        pixels,
    }
}

pub fn demo_level() -> Result<DemoLevel, DemoError> {
    let mut textures = TextureBank::new();
    let brick = textures.insert(
        "BRICK",
        bricks("BRICK", Rgba::opaque(90, 90, 90), Rgba::opaque(150, 40, 30)),
    )?;
    let stone = textures.insert(
        "STONE",
        bricks("STONE", Rgba::opaque(40, 40, 40), Rgba::opaque(110, 110, 120)),
    )?;
    let door_id = textures.insert("DOOR", door("DOOR"))?;
    let floor = textures.insert(
        "FLOOR",
        Texture::checker(
            "FLOOR",
            TEX,
            8,
            Rgba::opaque(60, 60, 60),
            Rgba::opaque(90, 90, 80),
        ),
    )?;
    let ceil = textures.insert(
        "CEIL",
        Texture::checker(
            "CEIL",
            TEX,
            16,
            Rgba::opaque(30, 30, 50),
            Rgba::opaque(40, 40, 70),
        ),
    )?;
    let medkit = textures.insert("MEDKIT", disc("MEDKIT", Rgba::opaque(240, 240, 240)))?;
    let barrel = textures.insert("BARREL", disc("BARREL", Rgba::opaque(60, 170, 60)))?;
    let ghost = textures.insert("GHOST", disc("GHOST", Rgba::opaque(200, 60, 200)))?;

    debug_assert_eq!((brick, stone, door_id), (1, 2, 3));

    let walls: Vec<TextureId> = WALLS.iter().map(|&c| c as TextureId).collect();
    let floors = walls
        .iter()
        .map(|&w| if w == 0 { floor } else { 0 })
        .collect();
    // leave the east wing open to the sky
    let ceilings = walls
        .iter()
        .enumerate()
        .map(|(i, &w)| if w == 0 && i % 12 < 7 { ceil } else { 0 })
        .collect();

    let grid = GridMap::new(12, 12, CELL, walls, floors, ceilings)?;

    let at = |cx: f32, cy: f32| vec2(cx * CELL, cy * CELL);
    Ok(DemoLevel {
        grid,
        textures,
        spawn: Pose::new(at(2.5, 2.5), 0.0, 60.0),
        door: door_id,
        actors: vec![
            ("MEDKIT", at(5.5, 1.5), medkit),
            ("MEDKIT", at(2.5, 9.5), medkit),
            ("BARREL", at(4.5, 4.5), barrel),
            ("BARREL", at(9.5, 2.5), barrel),
            ("GHOST", at(9.5, 9.5), ghost),
        ],
    })
}
