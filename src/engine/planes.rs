//! Floor / ceiling pass.
//!
//! Runs after the wall pass.  For every screen column it walks the rows
//! below the wall slice (floor) and above it (ceiling), inverse-projects each
//! row onto the plane along that column's ray and samples the matching grid
//! layer.  Rows are stepped at the column's pixel width so each sample is a
//! square block.

use glam::Vec2;

use crate::{
    engine::types::{Column, Scene},
    renderer::{Rect, Renderer, Rgb},
    world::{Cell, Layer, TextureError, direction},
};

/// Emit every visible floor and ceiling block for `columns`.
pub fn plane_pass<R: Renderer>(
    scene: &Scene,
    columns: &[Column],
    out: &mut R,
) -> Result<(), TextureError> {
    let mut blocks = 0usize;
    for col in columns.iter().filter(|c| c.w > 0) {
        blocks += floor_column(scene, col, out)?;
        blocks += ceiling_column(scene, col, out)?;
    }
    log::trace!("plane pass: {blocks} blocks");
    Ok(())
}

fn floor_column<R: Renderer>(
    scene: &Scene,
    col: &Column,
    out: &mut R,
) -> Result<usize, TextureError> {
    let half_h = scene.screen.half_h;
    let screen_h = scene.screen.h as i32;
    let stride = col.w;
    let mut emitted = 0;

    let mut y = (col.bottom.ceil().max(half_h.ceil()) as i32).max(0);
    while y < screen_h {
        let h = stride.min(screen_h - y);
        let dy = y as f32 + h as f32 * 0.5 - half_h;
        if dy > 0.0 {
            let height = scene.view.eye_z;
            if let Some(colour) = sample(scene, col, Layer::Floors, height, dy)? {
                out.fill_rect(&Rect::new(col.x, y, col.w, h, colour));
                emitted += 1;
            }
        }
        y += stride;
    }
    Ok(emitted)
}

fn ceiling_column<R: Renderer>(
    scene: &Scene,
    col: &Column,
    out: &mut R,
) -> Result<usize, TextureError> {
    let half_h = scene.screen.half_h;
    let stride = col.w;
    let mut emitted = 0;

    let mut y = (col.top.floor().min(half_h.floor()) as i32).min(scene.screen.h as i32);
    while y > 0 {
        let y0 = (y - stride).max(0);
        let h = y - y0;
        let dy = half_h - (y0 as f32 + h as f32 * 0.5);
        if dy > 0.0 {
            let height = scene.grid.cell_size() - scene.view.eye_z;
            if let Some(colour) = sample(scene, col, Layer::Ceilings, height, dy)? {
                out.fill_rect(&Rect::new(col.x, y0, col.w, h, colour));
                emitted += 1;
            }
        }
        y = y0;
    }
    Ok(emitted)
}

/// World point on the plane `height` units from the eye seen `dy` rows off
/// the horizon, then its texel.  `None` for empty or off-grid cells.
fn sample(
    scene: &Scene,
    col: &Column,
    layer: Layer,
    height: f32,
    dy: f32,
) -> Result<Option<Rgb>, TextureError> {
    let straight = height * scene.view.focal / dy;
    let along = straight / (col.angle - scene.pose.heading()).to_radians().cos();
    let p: Vec2 = scene.pose.pos + direction(col.angle) * along;

    let (cx, cy) = scene.grid.cell_coords(p);
    let Cell::Solid(id) = scene.grid.cell(layer, cx, cy) else {
        return Ok(None);
    };

    let tex = scene.bank.texture(id)?;
    let c = scene.grid.cell_size();
    let tu = tex.wrap_u((p.x * tex.w as f32 / c).floor() as i32);
    let tv = tex.wrap_v((p.y * tex.h as f32 / c).floor() as i32);
    Ok(Some(tex.texel(tu, tv)?.into()))
}
