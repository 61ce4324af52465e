//! First-person software viewer for the built-in level.
//!
//! ```bash
//! RUST_LOG=info cargo run --release --bin view_sw -- --width 960 --height 600
//! ```
//!
//! Arrows / WASD move, Alt+←/→ strafes, Space opens doors, Esc quits.

use clap::Parser;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::time::{Duration, Instant};

use yacaster_rs::{
    config::{Config, DEPTH_SAMPLES},
    engine::Engine,
    renderer::Software,
    sim::Intents,
};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Window width in pixels
    #[arg(long, default_value_t = 960)]
    width: usize,

    /// Window height in pixels
    #[arg(long, default_value_t = 600)]
    height: usize,

    /// Horizontal field of view, degrees
    #[arg(long, default_value_t = 60.0)]
    fov: f32,

    /// Angular samples (rays) per frame
    #[arg(long, default_value_t = DEPTH_SAMPLES)]
    samples: usize,

    /// Walking speed, world units per second
    #[arg(long, default_value_t = 160.0)]
    speed: f32,

    /// Frame-rate cap
    #[arg(long, default_value_t = 60)]
    fps: usize,
}

fn read_intents(win: &Window) -> Intents {
    let mut i = Intents::empty();

    if win.is_key_down(Key::Up) || win.is_key_down(Key::W) {
        i |= Intents::FORWARD;
    }
    if win.is_key_down(Key::Down) || win.is_key_down(Key::S) {
        i |= Intents::BACKWARD;
    }

    let alt = win.is_key_down(Key::LeftAlt) || win.is_key_down(Key::RightAlt);
    let (left, right) = if alt {
        (Intents::STRAFE_LEFT, Intents::STRAFE_RIGHT)
    } else {
        (Intents::TURN_LEFT, Intents::TURN_RIGHT)
    };
    if win.is_key_down(Key::Left) {
        i |= left;
    }
    if win.is_key_down(Key::Right) {
        i |= right;
    }

    /* WASD strafing mirrors arrow-key strafing */
    if win.is_key_down(Key::A) {
        i |= Intents::STRAFE_LEFT;
    }
    if win.is_key_down(Key::D) {
        i |= Intents::STRAFE_RIGHT;
    }

    // edge-trigger
    if win.is_key_pressed(Key::Space, KeyRepeat::No) {
        i |= Intents::INTERACT;
    }
    i
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    let mut cfg = Config::default();
    cfg.view.width = opts.width;
    cfg.view.height = opts.height;
    cfg.view.fov = opts.fov;
    cfg.view.depth_samples = opts.samples;
    cfg.movement.move_speed = opts.speed;

    let mut engine = Engine::from_demo(cfg)?;
    let mut renderer = Software::default();

    let mut win = Window::new(
        "yacaster: software",
        opts.width,
        opts.height,
        WindowOptions::default(),
    )?;
    win.set_target_fps(opts.fps);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();
    let mut last_tick = Instant::now();
    let mut shown = engine.status();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let now = Instant::now();
        let dt = now.duration_since(last_tick).as_secs_f32().min(0.1);
        last_tick = now;

        engine.tick(read_intents(&win), dt);

        let status = engine.status();
        if status != shown {
            let state = if status.game_over { "  CAUGHT!" } else { "" };
            win.set_title(&format!(
                "yacaster: pickups {} collected {}{state}",
                status.pickups, status.collected
            ));
            shown = status;
        }

        let t0 = Instant::now();
        let mut presented = Ok(());
        engine.render_frame(&mut renderer, |fb, w, h| {
            acc_time += t0.elapsed();
            acc_frames += 1;
            presented = win.update_with_buffer(fb, w, h);
        })?;
        presented?;

        if last_print.elapsed() >= Duration::from_secs(3) && acc_frames > 0 {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            log::info!("avg render: {avg_ms:.2} ms  ({:.1} FPS)", 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
