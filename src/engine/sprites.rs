//! Billboard sprites, painted back to front.
//!
//! Each active actor is projected as a screen-aligned quad.  Occlusion is a
//! per-column test against the wall depth buffer; sprites never test against
//! each other, the far-to-near order handles that.

use glam::{Vec2, Vec3};
use hecs::{Entity, World};

use crate::{
    engine::types::{DepthBuffer, Scene, column_span},
    renderer::{Rect, Renderer, Rgb},
    sim::{Active, Position, Scale, Sprite},
    world::{Texture, TextureError, TextureId},
};

/// Snapshot of one drawable actor for the current frame.
#[derive(Clone, Copy, Debug)]
pub struct VisSprite {
    pub entity: Entity,
    /// Euclidean distance from the eye, comparable with the depth buffer.
    pub dist: f32,
    pub pos: Vec3,
    pub scale: Vec2,
    pub tex: TextureId,
}

/// Gather every active actor into `out`, farthest first.
pub fn collect_sprites(world: &World, eye: Vec2, out: &mut Vec<VisSprite>) {
    out.clear();
    let mut query = world.query::<(&Position, &Scale, &Active, &Sprite)>();
    for (entity, (pos, scale, active, sprite)) in query.iter() {
        if !active.0 {
            continue;
        }
        out.push(VisSprite {
            entity,
            dist: pos.0.truncate().distance(eye),
            pos: pos.0,
            scale: scale.0,
            tex: sprite.0,
        });
    }
    out.sort_by(|a, b| b.dist.total_cmp(&a.dist));
}

/// Screen-space footprint of a sprite, before clipping.
struct Quad {
    x0: f32,
    x1: f32,
    top: f32,
    bottom: f32,
}

/// Draw `sprites` (already sorted) against `depth`.  Returns how many of
/// them put at least one pixel on screen.
pub fn sprite_pass<R: Renderer>(
    scene: &Scene,
    sprites: &[VisSprite],
    depth: &DepthBuffer,
    out: &mut R,
) -> Result<usize, TextureError> {
    let mut drawn = 0;
    for s in sprites {
        let Some(quad) = project(scene, s) else {
            continue;
        };
        let tex = scene.bank.texture(s.tex)?;
        if draw_sprite(scene, s, &quad, tex, depth, out)? {
            drawn += 1;
        }
    }
    Ok(drawn)
}

fn project(scene: &Scene, s: &VisSprite) -> Option<Quad> {
    let cam = scene.pose.to_cam(s.pos.truncate());
    if cam.y <= 0.0 {
        return None;
    }

    // x is placed by the sprite's angle off the heading, with the same
    // linear angle → column mapping the wall rays use, and not by the
    // `half_w + x * focal / y` plane projection.  The two drift apart
    // towards the screen edges; only this one keeps the per-column depth
    // test aligned with the wall slices.  Size and height still use `focal`.
    let fov = scene.pose.fov();
    let offset = cam.x.atan2(cam.y).to_degrees();
    let sx = (offset + fov * 0.5) / fov * scene.screen.w as f32;

    let c = scene.grid.cell_size();
    let k = scene.view.focal / cam.y;
    let w = c * s.scale.x * k;
    let h = c * s.scale.y * k;
    let cy = scene.screen.half_h + (scene.view.eye_z - s.pos.z) * k;

    Some(Quad {
        x0: sx - w * 0.5,
        x1: sx + w * 0.5,
        top: cy - h * 0.5,
        bottom: cy + h * 0.5,
    })
}

fn draw_sprite<R: Renderer>(
    scene: &Scene,
    s: &VisSprite,
    quad: &Quad,
    tex: &Texture,
    depth: &DepthBuffer,
    out: &mut R,
) -> Result<bool, TextureError> {
    let screen_w = scene.screen.w as i32;
    let screen_h = scene.screen.h as i32;
    let px0 = (quad.x0.floor() as i32).max(0);
    let px1 = (quad.x1.ceil() as i32).min(screen_w);
    if px0 >= px1 || quad.x1 <= quad.x0 {
        return Ok(false);
    }

    let n = depth.len();
    let first = depth.sample_for_x(px0, scene.screen.w);
    let last = depth.sample_for_x(px1 - 1, scene.screen.w);
    let width = quad.x1 - quad.x0;
    let texel_h = (quad.bottom - quad.top) / tex.h as f32;
    let mut any = false;

    for i in first..=last {
        if s.dist >= depth.get(i) {
            continue;
        }
        let (cx, cw) = column_span(i, n, scene.screen.w);
        let x0 = cx.max(px0);
        let x1 = (cx + cw).min(px1);
        if x0 >= x1 {
            continue;
        }

        let mid = (x0 + x1) as f32 * 0.5;
        let tu = (((mid - quad.x0) / width * tex.w as f32).floor() as i32)
            .clamp(0, tex.w as i32 - 1) as usize;

        for tv in 0..tex.h {
            let y0 = ((quad.top + tv as f32 * texel_h).floor() as i32).clamp(0, screen_h);
            let y1 = ((quad.top + (tv + 1) as f32 * texel_h).floor() as i32).clamp(0, screen_h);
            if y1 <= y0 {
                continue;
            }
            let texel = tex.texel(tu, tv)?;
            if texel.is_transparent() {
                continue;
            }
            out.fill_rect(&Rect::new(x0, y0, x1 - x0, y1 - y0, Rgb::from(texel)));
            any = true;
        }
    }
    Ok(any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        engine::types::Screen,
        renderer::Recorder,
        world::{GridMap, Pose, Rgba, TextureBank, direction},
    };
    use glam::{vec2, vec3};

    const C: f32 = 64.0;
    const ORANGE: Rgba = Rgba::opaque(250, 150, 0);
    const TEAL: Rgba = Rgba::opaque(0, 150, 150);

    struct Fixture {
        grid: GridMap,
        bank: TextureBank,
        pose: Pose,
        screen: Screen,
    }

    impl Fixture {
        fn new() -> Self {
            let mut bank = TextureBank::new();
            bank.insert("ORANGE", Texture::solid("ORANGE", 4, 4, ORANGE)).unwrap();
            bank.insert("TEAL", Texture::solid("TEAL", 4, 4, TEAL)).unwrap();
            // 2×2 checker with transparent top-left / bottom-right
            let pixels = vec![Rgba::TRANSPARENT, TEAL, TEAL, Rgba::TRANSPARENT];
            bank.insert("HOLE", Texture::new("HOLE", 2, 2, pixels).unwrap())
                .unwrap();
            Self {
                grid: GridMap::with_walls(16, 16, C, vec![0; 256]).unwrap(),
                bank,
                pose: Pose::new(vec2(C, 8.0 * C), 0.0, 60.0),
                screen: Screen::new(120, 100),
            }
        }

        fn draw(&self, sprites: &[VisSprite], depth: &DepthBuffer) -> (Recorder, usize) {
            let scene = Scene::new(&self.grid, &self.pose, &self.bank, self.screen);
            let mut rec = Recorder::default();
            rec.begin_frame(self.screen.w, self.screen.h);
            let drawn = sprite_pass(&scene, sprites, depth, &mut rec).unwrap();
            (rec, drawn)
        }
    }

    fn sprite(world: &mut World, pos: Vec3, tex: TextureId) -> Entity {
        world.spawn((
            Position(pos),
            Scale(Vec2::splat(0.5)),
            Active(true),
            Sprite(tex),
        ))
    }

    fn flat_depth(n: usize, d: f32) -> DepthBuffer {
        let mut depth = DepthBuffer::new(n);
        for i in 0..n {
            depth.write(i, d);
        }
        depth
    }

    #[test]
    fn collected_far_to_near_and_inactive_skipped() {
        let mut world = World::new();
        let eye = vec2(0.0, 0.0);
        let near = sprite(&mut world, vec3(10.0, 0.0, 32.0), 1);
        let far = sprite(&mut world, vec3(300.0, 0.0, 32.0), 1);
        let mid = sprite(&mut world, vec3(0.0, 100.0, 32.0), 1);
        let gone = sprite(&mut world, vec3(50.0, 0.0, 32.0), 1);
        world.get::<&mut Active>(gone).unwrap().0 = false;

        let mut out = Vec::new();
        collect_sprites(&world, eye, &mut out);
        let order: Vec<Entity> = out.iter().map(|s| s.entity).collect();
        assert_eq!(order, vec![far, mid, near]);
    }

    #[test]
    fn wall_in_front_hides_sprite() {
        let fx = Fixture::new();
        let mut world = World::new();
        sprite(&mut world, vec3(4.0 * C, 8.0 * C, 32.0), 1);
        let mut sprites = Vec::new();
        collect_sprites(&world, fx.pose.pos, &mut sprites);
        let d = sprites[0].dist;

        let (rec, drawn) = fx.draw(&sprites, &flat_depth(120, d - 1.0));
        assert_eq!(drawn, 0);
        assert!(rec.rects.is_empty());

        // equal distance does not pass the strict test either
        let (rec, _) = fx.draw(&sprites, &flat_depth(120, d));
        assert!(rec.rects.is_empty());

        let (rec, drawn) = fx.draw(&sprites, &flat_depth(120, d + 1.0));
        assert_eq!(drawn, 1);
        let centre = rec.top_at(60, 50).expect("sprite missing at centre");
        assert_eq!(centre.colour, Rgb::from(ORANGE));
    }

    #[test]
    fn occlusion_is_per_column() {
        let fx = Fixture::new();
        let mut world = World::new();
        sprite(&mut world, vec3(4.0 * C, 8.0 * C, 32.0), 1);
        let mut sprites = Vec::new();
        collect_sprites(&world, fx.pose.pos, &mut sprites);

        // a wall close by on the left half of the view only
        let mut depth = DepthBuffer::new(120);
        for i in 0..120 {
            depth.write(i, if i < 60 { 10.0 } else { 1e6 });
        }
        let (rec, _) = fx.draw(&sprites, &depth);
        assert!(!rec.rects.is_empty());
        assert!(rec.rects.iter().all(|r| r.x >= 60));
    }

    #[test]
    fn behind_the_eye_is_skipped() {
        let fx = Fixture::new();
        let mut world = World::new();
        sprite(&mut world, vec3(0.5 * C, 8.0 * C, 32.0), 1);
        let mut sprites = Vec::new();
        collect_sprites(&world, fx.pose.pos, &mut sprites);
        let (rec, drawn) = fx.draw(&sprites, &flat_depth(120, 1e6));
        assert_eq!(drawn, 0);
        assert!(rec.rects.is_empty());
    }

    #[test]
    fn nearer_sprite_is_painted_last() {
        let fx = Fixture::new();
        let mut world = World::new();
        sprite(&mut world, vec3(3.0 * C, 8.0 * C, 32.0), 1);
        sprite(&mut world, vec3(6.0 * C, 8.0 * C, 32.0), 2);
        let mut sprites = Vec::new();
        collect_sprites(&world, fx.pose.pos, &mut sprites);

        let (rec, drawn) = fx.draw(&sprites, &flat_depth(120, 1e6));
        assert_eq!(drawn, 2);
        assert_eq!(rec.rects.first().map(|r| r.colour), Some(Rgb::from(TEAL)));
        assert_eq!(rec.top_at(60, 50).map(|r| r.colour), Some(Rgb::from(ORANGE)));
    }

    #[test]
    fn sprite_lands_on_the_column_of_its_ray() {
        let fx = Fixture::new();
        let scene = Scene::new(&fx.grid, &fx.pose, &fx.bank, fx.screen);
        let n = 120;
        for i in [4, 30, 60, 95, 116] {
            let fov = fx.pose.fov();
            let angle = fx.pose.heading() - fov * 0.5 + i as f32 * fov / n as f32;
            let at = fx.pose.pos + direction(angle) * 5.0 * C;
            let s = VisSprite {
                entity: Entity::DANGLING,
                dist: 5.0 * C,
                pos: at.extend(32.0),
                scale: Vec2::splat(0.5),
                tex: 1,
            };
            let q = project(&scene, &s).unwrap();
            let (x, _) = column_span(i, n, fx.screen.w);
            assert!(((q.x0 + q.x1) * 0.5 - x as f32).abs() < 1e-2, "sample {i}");
        }
    }

    #[test]
    fn transparent_texels_are_skipped() {
        let fx = Fixture::new();
        let mut world = World::new();
        let e = sprite(&mut world, vec3(3.0 * C, 8.0 * C, 32.0), 3);
        let mut sprites = Vec::new();
        collect_sprites(&world, fx.pose.pos, &mut sprites);
        assert_eq!(sprites[0].entity, e);

        let (rec, _) = fx.draw(&sprites, &flat_depth(120, 1e6));
        let scene = Scene::new(&fx.grid, &fx.pose, &fx.bank, fx.screen);
        let q = project(&scene, &sprites[0]).unwrap();
        let (cx, cy) = ((q.x0 + q.x1) * 0.5, (q.top + q.bottom) * 0.5);

        // top-left quadrant is see-through, top-right is not
        let tl = (cx - 2.0) as i32;
        let tr = (cx + 2.0) as i32;
        let ty = (cy - 2.0) as i32;
        assert!(rec.top_at(tl, ty).is_none());
        assert_eq!(rec.top_at(tr, ty).map(|r| r.colour), Some(Rgb::from(TEAL)));
    }
}
