//! Top-down map view of the built-in level.
//!
//! ```bash
//! cargo run --release --bin yacaster_rs
//! ```
//!
//! Shows the wall grid, the actors and the player's ray fan, each ray ending
//! where the wall raycaster reports its hit.  Same controls as `view_sw`.

use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::time::Instant;

use yacaster_rs::{
    config::Config,
    engine::{Engine, cast_ray},
    renderer::{Rect, Renderer, Rgb, Software},
    sim::{Active, Intents, Position},
    world::{Cell, direction},
};

const WIDTH: usize = 768;
const HEIGHT: usize = 768;
/// Rays drawn across the field of view.
const FAN: usize = 60;

const FLOOR: Rgb = Rgb(20, 20, 20);
const GRID: Rgb = Rgb(45, 45, 45);
const PLAYER: Rgb = Rgb(255, 220, 0);
const RAY: Rgb = Rgb(230, 230, 120);
const ACTOR: Rgb = Rgb(90, 200, 255);

fn read_intents(win: &Window) -> Intents {
    let mut i = Intents::empty();
    let keys = [
        (Key::Up, Intents::FORWARD),
        (Key::W, Intents::FORWARD),
        (Key::Down, Intents::BACKWARD),
        (Key::S, Intents::BACKWARD),
        (Key::Left, Intents::TURN_LEFT),
        (Key::Right, Intents::TURN_RIGHT),
        (Key::A, Intents::STRAFE_LEFT),
        (Key::D, Intents::STRAFE_RIGHT),
    ];
    for (key, intent) in keys {
        if win.is_key_down(key) {
            i |= intent;
        }
    }
    if win.is_key_pressed(Key::Space, KeyRepeat::No) {
        i |= Intents::INTERACT;
    }
    i
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut engine = Engine::from_demo(Config::default())?;
    let mut sw = Software::default();

    let mut window = Window::new("yacaster: map", WIDTH, HEIGHT, WindowOptions::default())?;
    window.set_target_fps(60);

    // ─────────── map-space → screen-space transform ────────────
    let grid = engine.grid();
    let tile = (WIDTH / grid.width()).min(HEIGHT / grid.height()) as i32;
    let scale = tile as f32 / grid.cell_size();
    let to_screen = move |x: f32, y: f32| -> (i32, i32) { ((x * scale) as i32, (y * scale) as i32) };

    let mut last = Instant::now();
    while window.is_open() && !window.is_key_down(Key::Escape) {
        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32().min(0.1);
        last = now;
        engine.tick(read_intents(&window), dt);

        sw.begin_frame(WIDTH, HEIGHT);
        sw.fill_rect(&Rect::new(0, 0, WIDTH as i32, HEIGHT as i32, FLOOR));

        /* cells */
        let grid = engine.grid();
        for y in 0..grid.height() as i32 {
            for x in 0..grid.width() as i32 {
                let colour = match grid.wall(x, y) {
                    Cell::Solid(id) => {
                        let tex = engine.textures().texture(id)?;
                        Rgb::from(tex.texel(tex.w / 2, tex.h / 2)?)
                    }
                    _ => GRID,
                };
                // one-pixel gutter shows the grid lines
                sw.fill_rect(&Rect::new(x * tile, y * tile, tile - 1, tile - 1, colour));
            }
        }

        /* rays */
        let pose = *engine.player();
        let (px, py) = to_screen(pose.pos.x, pose.pos.y);
        for i in 0..FAN {
            let angle = pose.heading() - pose.fov() * 0.5 + i as f32 * pose.fov() / FAN as f32;
            if let Some(hit) = cast_ray(grid, pose.pos, angle) {
                let (hx, hy) = to_screen(hit.point.x, hit.point.y);
                sw.draw_line(px, py, hx, hy, RAY);
            }
        }

        /* actors and player */
        let mut q = engine.actors().query::<(&Position, &Active)>();
        for (_, (pos, active)) in q.iter() {
            if active.0 {
                let (ax, ay) = to_screen(pos.0.x, pos.0.y);
                sw.fill_rect(&Rect::new(ax - 3, ay - 3, 6, 6, ACTOR));
            }
        }
        drop(q);

        sw.fill_rect(&Rect::new(px - 4, py - 4, 8, 8, PLAYER));
        let tip = pose.pos + direction(pose.heading()) * grid.cell_size() * 0.5;
        let (tx, ty) = to_screen(tip.x, tip.y);
        sw.draw_line(px, py, tx, ty, PLAYER);

        let mut presented = Ok(());
        sw.end_frame(|fb, w, h| presented = window.update_with_buffer(fb, w, h));
        presented?;

        if engine.status().game_over {
            window.set_title("yacaster: map (caught!)");
        }
    }
    Ok(())
}
