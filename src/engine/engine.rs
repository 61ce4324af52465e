use glam::Vec2;
use hecs::{Entity, World};

use crate::{
    config::{Config, ConfigError},
    defs,
    engine::{
        planes::plane_pass,
        sprites::{VisSprite, collect_sprites, sprite_pass},
        types::{Column, DepthBuffer, Scene, Screen},
        walls::wall_pass,
    },
    renderer::{Rect, Renderer},
    sim::{Event, Events, GameStatus, Intents, actor_think, player_input, spawn_actor},
    world::{
        GridMap, Pose, TextureBank, TextureError, TextureId,
        demo::{DemoError, demo_level},
    },
};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Texture(#[from] TextureError),

    #[error(transparent)]
    Demo(#[from] DemoError),

    #[error("map references texture {id} but only {len} textures are loaded")]
    MissingTexture { id: TextureId, len: usize },

    #[error("unknown actor kind `{0}`")]
    UnknownActor(String),
}

/// Owns every piece of per-level state.
///
/// * `tick` runs gameplay (player, then actors); the grid is only written here.
/// * `render_frame` recomputes the whole view: background, walls, planes,
///   sprites.  The depth buffer is written by the wall pass alone.
pub struct Engine {
    grid: GridMap,
    textures: TextureBank,
    player: Pose,
    actors: World,
    status: GameStatus,
    config: Config,
    screen: Screen,
    depth: DepthBuffer,
    columns: Vec<Column>,
    sprites: Vec<VisSprite>,
}

impl Engine {
    pub fn new(
        grid: GridMap,
        textures: TextureBank,
        player: Pose,
        config: Config,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        let id = grid.max_texture_id();
        if id as usize > textures.len() {
            return Err(EngineError::MissingTexture {
                id,
                len: textures.len(),
            });
        }

        let view = &config.view;
        let screen = Screen::new(view.width, view.height);
        let samples = view.depth_samples;
        let depth = DepthBuffer::new(samples);
        let player = Pose::new(player.pos, player.heading(), view.fov);

        log::info!(
            "engine ready: {}x{} grid, {} textures, {}x{} screen, {} samples",
            grid.width(),
            grid.height(),
            textures.len(),
            screen.w,
            screen.h,
            depth.len()
        );

        Ok(Self {
            grid,
            textures,
            player,
            actors: World::new(),
            status: GameStatus::default(),
            config,
            screen,
            depth,
            columns: Vec::with_capacity(samples),
            sprites: Vec::new(),
        })
    }

    /// Build the built-in level with its actors.  The demo door is used
    /// unless `config` already names one.
    pub fn from_demo(mut config: Config) -> Result<Self, EngineError> {
        let lvl = demo_level()?;
        if config.movement.door.is_none() {
            config.movement.door = Some(lvl.door);
        }

        let mut engine = Self::new(lvl.grid, lvl.textures, lvl.spawn, config)?;
        for (kind, pos, sprite) in lvl.actors {
            engine.spawn(kind, pos, sprite)?;
        }
        Ok(engine)
    }

    /// Add an actor of catalogue kind `kind`.
    pub fn spawn(&mut self, kind: &str, pos: Vec2, sprite: TextureId) -> Result<Entity, EngineError> {
        let info = defs::by_id(kind).ok_or_else(|| EngineError::UnknownActor(kind.to_owned()))?;
        self.textures.texture(sprite)?;
        let ent = spawn_actor(&mut self.actors, info, pos, self.grid.cell_size(), sprite);
        log::debug!("spawned {kind} at ({:.1}, {:.1})", pos.x, pos.y);
        Ok(ent)
    }

    /// Advance gameplay by `dt` seconds.  Frozen once the game is over.
    pub fn tick(&mut self, intents: Intents, dt: f32) -> Events {
        if self.status.game_over {
            return Events::new();
        }

        let mut events = player_input(
            &mut self.player,
            &mut self.grid,
            &self.config.movement,
            intents,
            dt,
        );
        events.extend(actor_think(&mut self.actors, &self.grid, self.player.pos, dt));

        for ev in &events {
            match *ev {
                Event::DoorOpened { .. } => {}
                Event::Collected(e) => {
                    self.status.collected += 1;
                    log::debug!("picked up {e:?}");
                }
                Event::HazardCollected(e) => {
                    self.status.pickups += 1;
                    log::debug!("picked up {e:?}, counter now {}", self.status.pickups);
                }
                Event::Caught(e) => {
                    if !self.status.game_over {
                        log::info!("game over: caught by {e:?}");
                    }
                    self.status.game_over = true;
                }
            }
        }
        events
    }

    /// Draw one frame into `out` and hand the result to `submit`.
    pub fn render_frame<R, F>(&mut self, out: &mut R, submit: F) -> Result<(), EngineError>
    where
        R: Renderer,
        F: FnOnce(&[u32], usize, usize),
    {
        let (w, h) = (self.screen.w, self.screen.h);
        out.begin_frame(w, h);

        let horizon = (h / 2) as i32;
        let view = &self.config.view;
        out.fill_rect(&Rect::new(0, 0, w as i32, horizon, view.sky));
        out.fill_rect(&Rect::new(0, horizon, w as i32, h as i32 - horizon, view.ground));

        let scene = Scene::new(&self.grid, &self.player, &self.textures, self.screen);
        wall_pass(&scene, &mut self.depth, &mut self.columns, out)?;
        debug_assert!(self.depth.is_complete());
        plane_pass(&scene, &self.columns, out)?;

        collect_sprites(&self.actors, self.player.pos, &mut self.sprites);
        let drawn = sprite_pass(&scene, &self.sprites, &self.depth, out)?;
        log::debug!(
            "frame: {} hits / {} samples, {drawn}/{} sprites",
            self.columns.iter().filter(|c| c.hit.is_some()).count(),
            self.depth.len(),
            self.sprites.len()
        );

        out.end_frame(submit);
        Ok(())
    }

    #[inline]
    pub fn grid(&self) -> &GridMap {
        &self.grid
    }

    /// Between-frame edits to the map (whole-cell writes).
    #[inline]
    pub fn grid_mut(&mut self) -> &mut GridMap {
        &mut self.grid
    }

    #[inline]
    pub fn textures(&self) -> &TextureBank {
        &self.textures
    }

    #[inline]
    pub fn player(&self) -> &Pose {
        &self.player
    }

    #[inline]
    pub fn actors(&self) -> &World {
        &self.actors
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Raw wall distances from the most recent frame.
    #[inline]
    pub fn depth(&self) -> &DepthBuffer {
        &self.depth
    }
}
