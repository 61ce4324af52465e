//! Wall pass: one grid DDA per angular sample.
//!
//! Each sample is cast twice, once stepping across horizontal grid lines and
//! once across vertical ones, by the same routine parameterised on [`Axis`].
//! The nearer hit wins; an exact tie goes to the vertical pass.

use glam::Vec2;

use crate::{
    engine::types::{Axis, Column, DepthBuffer, NO_HIT, Scene, WallHit, column_span},
    renderer::{Rect, Renderer, Rgb},
    world::{Cell, GridMap, TextureError, direction},
};

/// Walk the grid lines of one `axis` from `origin` along unit vector `dir`.
///
/// At every crossing both the cell ahead of the line and the one behind it
/// are checked.  The behind cell catches rays grazing a corner and wins when
/// both are solid.  Returns
/// `None` when the ray runs parallel to the lines, leaves the grid, or
/// exhausts the traversal bound.
pub fn cast_axis(grid: &GridMap, origin: Vec2, dir: Vec2, axis: Axis) -> Option<WallHit> {
    let (o_maj, o_min) = axis.split(origin);
    let (d_maj, d_min) = axis.split(dir);
    if d_maj.abs() < f32::EPSILON {
        return None;
    }

    let c = grid.cell_size();
    let forward = d_maj > 0.0;
    let slope = d_min / d_maj;

    let mut maj = if forward {
        ((o_maj / c).floor() + 1.0) * c
    } else {
        // an eye sitting on a line belongs to the cell past it, so that
        // line is the first one crossed
        (o_maj / c).floor() * c
    };
    let mut min = o_min + (maj - o_maj) * slope;
    let step = if forward { c } else { -c };

    for _ in 0..=grid.max_depth() {
        let line = (maj / c).round() as i32;
        let lane = (min / c).floor() as i32;
        let (ahead, behind) = if forward {
            (line, line - 1)
        } else {
            (line - 1, line)
        };

        let (ax, ay) = axis.cell(ahead, lane);
        let (bx, by) = axis.cell(behind, lane);
        let ahead_cell = grid.wall(ax, ay);

        // the behind cell is reached first along the ray
        let solid = match (ahead_cell, grid.wall(bx, by)) {
            (_, Cell::Solid(id)) | (Cell::Solid(id), _) => Some(id),
            _ => None,
        };
        if let Some(texture) = solid {
            let point = axis.join(maj, min);
            return Some(WallHit {
                distance: point.distance(origin),
                point,
                texture,
                u: min.rem_euclid(c),
                axis,
            });
        }
        if ahead_cell == Cell::Outside {
            return None;
        }

        maj += step;
        min += step * slope;
    }
    None
}

/// Pick the nearer of the two passes; exact ties prefer the vertical one.
#[inline]
pub fn nearer(horizontal: Option<WallHit>, vertical: Option<WallHit>) -> Option<WallHit> {
    match (horizontal, vertical) {
        (Some(h), Some(v)) => Some(if v.distance <= h.distance { v } else { h }),
        (h, v) => v.or(h),
    }
}

/// Nearest wall along the ray leaving `origin` at `angle` degrees.
pub fn cast_ray(grid: &GridMap, origin: Vec2, angle: f32) -> Option<WallHit> {
    let dir = direction(angle);
    nearer(
        cast_axis(grid, origin, dir, Axis::Horizontal),
        cast_axis(grid, origin, dir, Axis::Vertical),
    )
}

/// Ray angle of sample `i` out of `n` across the field of view.
#[inline]
pub fn sample_angle(heading: f32, fov: f32, i: usize, n: usize) -> f32 {
    heading - fov * 0.5 + i as f32 * fov / n as f32
}

/// Cast every sample, fill `depth` and `columns`, and emit the wall slices.
///
/// `depth` is reset first and holds raw (uncorrected) distances afterwards.
pub fn wall_pass<R: Renderer>(
    scene: &Scene,
    depth: &mut DepthBuffer,
    columns: &mut Vec<Column>,
    out: &mut R,
) -> Result<(), TextureError> {
    let n = depth.len();
    let heading = scene.pose.heading();
    let fov = scene.pose.fov();
    let half_h = scene.screen.half_h;
    let c = scene.grid.cell_size();

    depth.reset();
    columns.clear();

    for i in 0..n {
        let angle = sample_angle(heading, fov, i, n);
        let (x, w) = column_span(i, n, scene.screen.w);
        let hit = cast_ray(scene.grid, scene.pose.pos, angle);
        log::trace!("sample {i} @ {angle:.2}°: {hit:?}");

        let mut col = Column {
            x,
            w,
            angle,
            hit,
            corrected: NO_HIT,
            top: half_h,
            bottom: half_h,
        };

        match hit {
            None => depth.write(i, NO_HIT),
            Some(hit) => {
                depth.write(i, hit.distance);
                let corrected = (hit.distance * (angle - heading).to_radians().cos()).max(1e-3);
                let scale = scene.view.focal / corrected;
                col.corrected = corrected;
                col.top = half_h - (c - scene.view.eye_z) * scale;
                col.bottom = half_h + scene.view.eye_z * scale;
                if w > 0 {
                    draw_slice(scene, &col, &hit, out)?;
                }
            }
        }
        columns.push(col);
    }
    Ok(())
}

/// One rect per texel row of the slice, clipped to the screen.
fn draw_slice<R: Renderer>(
    scene: &Scene,
    col: &Column,
    hit: &WallHit,
    out: &mut R,
) -> Result<(), TextureError> {
    let tex = scene.bank.texture(hit.texture)?;
    let c = scene.grid.cell_size();
    let tu = tex.wrap_u((hit.u / c * tex.w as f32).floor() as i32);

    let screen_h = scene.screen.h as i32;
    let texel_h = (col.bottom - col.top) / tex.h as f32;

    for tv in 0..tex.h {
        let y0 = ((col.top + tv as f32 * texel_h).floor() as i32).clamp(0, screen_h);
        let y1 = ((col.top + (tv + 1) as f32 * texel_h).floor() as i32).clamp(0, screen_h);
        if y1 <= y0 {
            continue;
        }
        let colour = Rgb::from(tex.texel(tu, tv)?);
        out.fill_rect(&Rect::new(col.x, y0, col.w, y1 - y0, colour));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        engine::types::Screen,
        renderer::Recorder,
        world::{Pose, Rgba, Texture, TextureBank, TextureId},
    };
    use glam::vec2;

    const C: f32 = 64.0;
    const RED: Rgba = Rgba::opaque(200, 0, 0);

    /// `w`×`h` map whose border cells are wall 1.
    fn bordered(w: usize, h: usize) -> GridMap {
        let mut walls = vec![0 as TextureId; w * h];
        for y in 0..h {
            for x in 0..w {
                if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                    walls[y * w + x] = 1;
                }
            }
        }
        GridMap::with_walls(w, h, C, walls).unwrap()
    }

    fn red_bank() -> TextureBank {
        let mut bank = TextureBank::new();
        bank.insert("RED", Texture::solid("RED", 8, 8, RED)).unwrap();
        bank
    }

    fn run(
        grid: &GridMap,
        pose: &Pose,
        samples: usize,
        screen: Screen,
    ) -> (DepthBuffer, Vec<Column>, Recorder) {
        let bank = red_bank();
        let scene = Scene::new(grid, pose, &bank, screen);
        let mut depth = DepthBuffer::new(samples);
        let mut cols = Vec::new();
        let mut rec = Recorder::default();
        rec.begin_frame(screen.w, screen.h);
        wall_pass(&scene, &mut depth, &mut cols, &mut rec).unwrap();
        (depth, cols, rec)
    }

    #[test]
    fn enclosed_room_always_hits() {
        let grid = bordered(8, 8);
        let eye = vec2(4.3 * C, 3.7 * C);
        for a in 0..360 {
            let hit = cast_ray(&grid, eye, a as f32 + 0.5).expect("ray escaped");
            assert!(hit.distance.is_finite());
            assert!(hit.distance < 8.0 * C * 2f32.sqrt());
        }
    }

    #[test]
    fn axis_aligned_ray_reports_whole_cells() {
        let grid = bordered(8, 8);
        // face of the east border is at x = 7C
        let hit = cast_ray(&grid, vec2(C, 1.5 * C), 0.0).unwrap();
        assert!((hit.distance - 6.0 * C).abs() < 1e-3);
        assert_eq!(hit.axis, Axis::Vertical);

        // face of the west border is at x = C
        let hit = cast_ray(&grid, vec2(3.0 * C, 1.5 * C), 180.0).unwrap();
        assert!((hit.distance - 2.0 * C).abs() < 1e-3);

        // face of the south border is at y = 7C
        let hit = cast_ray(&grid, vec2(2.5 * C, 4.0 * C), 90.0).unwrap();
        assert!((hit.distance - 3.0 * C).abs() < 1e-3);
        assert_eq!(hit.axis, Axis::Horizontal);
    }

    #[test]
    fn parallel_pass_reports_nothing() {
        let grid = bordered(4, 4);
        let o = vec2(1.5 * C, 1.5 * C);
        assert_eq!(cast_axis(&grid, o, vec2(1.0, 0.0), Axis::Horizontal), None);
        assert_eq!(cast_axis(&grid, o, vec2(0.0, 1.0), Axis::Vertical), None);
    }

    #[test]
    fn grazing_corner_is_caught_from_behind() {
        // a single pillar at (2,1); the ray clips its lower-left corner,
        // entering through x = 2C and leaving through y = C
        let mut walls = vec![0; 16];
        walls[4 + 2] = 1;
        let grid = GridMap::with_walls(4, 4, C, walls).unwrap();
        let o = vec2(1.5 * C, 1.9 * C);
        let hit = cast_axis(&grid, o, direction(-45.0), Axis::Horizontal).unwrap();
        assert!((hit.point.y - C).abs() < 1e-3);
        assert!((hit.point.x - 2.4 * C).abs() < 1e-2);
        assert_eq!(hit.texture, 1);

        // the vertical pass meets the pillar's west face first
        let v = cast_axis(&grid, o, direction(-45.0), Axis::Vertical).unwrap();
        assert!((v.point.x - 2.0 * C).abs() < 1e-3);
        assert_eq!(cast_ray(&grid, o, -45.0), Some(v));
    }

    #[test]
    fn both_cells_solid_reports_the_nearer_one() {
        // pillar (2,1) as above, plus a wall right behind it at (2,0)
        let mut walls = vec![0; 16];
        walls[4 + 2] = 1;
        walls[2] = 5;
        let grid = GridMap::with_walls(4, 4, C, walls).unwrap();
        let hit = cast_axis(&grid, vec2(1.5 * C, 1.9 * C), direction(-45.0), Axis::Horizontal)
            .unwrap();
        assert!((hit.point.y - C).abs() < 1e-3);
        assert_eq!(hit.texture, 1);
    }

    #[test]
    fn eye_on_a_line_sees_the_touching_wall() {
        let mut grid = bordered(4, 4);
        grid.set(crate::world::Layer::Walls, 1, 1, 2);
        let eye = vec2(2.0 * C, 1.5 * C);

        let hit = cast_ray(&grid, eye, 180.0).unwrap();
        assert!(hit.distance.abs() < 1e-3);
        assert_eq!(hit.texture, 2);
        assert_eq!(hit.axis, Axis::Vertical);

        // the other way the first line is one cell ahead
        let hit = cast_ray(&grid, eye, 0.0).unwrap();
        assert!((hit.distance - C).abs() < 1e-3);
        assert_eq!(hit.texture, 1);
    }

    #[test]
    fn single_walled_cell_with_open_diagonals() {
        // only the four edge neighbours of (2,2) are solid
        let mut walls = vec![0; 25];
        for (x, y) in [(1, 2), (3, 2), (2, 1), (2, 3)] {
            walls[y * 5 + x] = 1;
        }
        let grid = GridMap::with_walls(5, 5, C, walls).unwrap();
        let reach = C * 2f32.sqrt() + 1e-3;

        for fx in [2.1, 2.5, 2.9] {
            for fy in [2.1, 2.5, 2.9] {
                let eye = vec2(fx * C, fy * C);
                for a in 0..1440 {
                    let angle = a as f32 * 0.25;
                    let hit = cast_ray(&grid, eye, angle)
                        .unwrap_or_else(|| panic!("ray at {angle}° from {eye} escaped"));
                    assert!(hit.distance <= reach, "{angle}° from {eye}: {}", hit.distance);
                }
            }
        }
    }

    #[test]
    fn ties_prefer_vertical() {
        let h = WallHit {
            distance: 10.0,
            point: Vec2::ZERO,
            texture: 1,
            u: 0.0,
            axis: Axis::Horizontal,
        };
        let v = WallHit {
            axis: Axis::Vertical,
            texture: 2,
            ..h
        };
        assert_eq!(nearer(Some(h), Some(v)).unwrap().axis, Axis::Vertical);

        let closer = WallHit { distance: 9.0, ..h };
        assert_eq!(nearer(Some(closer), Some(v)).unwrap().axis, Axis::Horizontal);
        assert_eq!(nearer(None, Some(v)), Some(v));
        assert_eq!(nearer(Some(h), None), Some(h));
        assert_eq!(nearer(None, None), None);
    }

    #[test]
    fn corrected_never_exceeds_raw() {
        let grid = bordered(8, 8);
        let pose = Pose::new(vec2(4.0 * C, 4.0 * C), 0.0, 60.0);
        // an even sample count puts sample n/2 exactly on the heading
        let (depth, cols, _) = run(&grid, &pose, 240, Screen::new(240, 100));

        for (i, col) in cols.iter().enumerate() {
            assert!(col.corrected <= depth.get(i) + 1e-3);
        }
        assert_eq!(cols[120].angle, 0.0);
        assert_eq!(cols[120].corrected, depth.get(120));
    }

    #[test]
    fn wall_pass_is_idempotent() {
        let grid = bordered(8, 8);
        let pose = Pose::new(vec2(3.3 * C, 4.6 * C), 37.0, 60.0);
        let screen = Screen::new(320, 200);
        let (a, _, ra) = run(&grid, &pose, 241, screen);
        let (b, _, rb) = run(&grid, &pose, 241, screen);
        assert_eq!(a.as_slice(), b.as_slice());
        assert_eq!(ra.rects, rb.rects);
    }

    #[test]
    fn open_field_writes_no_hit() {
        let grid = GridMap::with_walls(4, 4, C, vec![0; 16]).unwrap();
        let pose = Pose::new(vec2(2.0 * C, 2.0 * C), 0.0, 60.0);
        let (depth, cols, rec) = run(&grid, &pose, 17, Screen::new(64, 48));
        assert!(depth.is_complete());
        assert!(depth.as_slice().iter().all(|&d| d == NO_HIT));
        assert!(cols.iter().all(|c| c.hit.is_none() && c.top == c.bottom));
        assert!(rec.rects.is_empty());
    }

    #[test]
    fn slice_is_centred_and_scales_with_distance() {
        let grid = bordered(8, 8);
        let screen = Screen::new(120, 100);
        let pose = Pose::new(vec2(4.0 * C, 4.0 * C), 0.0, 60.0);
        let (_, cols, rec) = run(&grid, &pose, 120, screen);

        let mid = &cols[60];
        let focal = pose.focal(screen.half_h);
        let expect_h = C * focal / mid.corrected;
        assert!((mid.bottom - mid.top - expect_h).abs() < 1e-3);
        assert!((mid.top + mid.bottom - 2.0 * screen.half_h).abs() < 1e-3);

        let y = screen.half_h as i32;
        let r = rec.top_at(mid.x, y).expect("no wall at the horizon");
        assert_eq!(r.colour, Rgb::from(RED));
    }

    #[test]
    fn unknown_wall_texture_fails_the_frame() {
        let mut grid = bordered(4, 4);
        grid.set(crate::world::Layer::Walls, 3, 1, 9);
        let pose = Pose::new(vec2(1.5 * C, 1.5 * C), 0.0, 60.0);
        let bank = red_bank();
        let scene = Scene::new(&grid, &pose, &bank, Screen::new(32, 32));
        let mut depth = DepthBuffer::new(32);
        let mut rec = Recorder::default();
        let err = wall_pass(&scene, &mut depth, &mut Vec::new(), &mut rec).unwrap_err();
        assert_eq!(err, TextureError::BadId(9));
    }

    #[test]
    fn small_bordered_map_end_to_end() {
        let grid = bordered(8, 8);
        assert_eq!(grid.max_depth(), 8);
        let pose = Pose::new(vec2(4.0 * C, 4.0 * C), 0.0, 60.0);
        let (depth, _, _) = run(&grid, &pose, 241, Screen::new(640, 480));

        let diagonal = 8.0 * C * 2f32.sqrt();
        assert!(depth.is_complete());
        for &d in depth.as_slice() {
            assert_ne!(d, NO_HIT);
            assert!(d < diagonal);
        }
    }
}
