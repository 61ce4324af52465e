//! Tunables shared by the engine and the viewers.

use crate::renderer::Rgb;
use crate::world::TextureId;

/// Angular samples per frame.  The depth buffer always holds this many
/// entries no matter how wide the screen is, which keeps sprite occlusion
/// independent of the output resolution.
pub const DEPTH_SAMPLES: usize = 241;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("screen size must be non-zero (got {0}x{1})")]
    ZeroScreen(usize, usize),

    #[error("depth sample count must be non-zero")]
    ZeroSamples,

    #[error("field of view must lie in (0, 180) degrees (got {0})")]
    BadFov(f32),

    #[error("{0} must be finite and non-negative")]
    BadSpeed(&'static str),
}

#[derive(Clone, Debug)]
pub struct ViewConfig {
    pub width: usize,
    pub height: usize,
    /// Horizontal field of view, degrees.
    pub fov: f32,
    pub depth_samples: usize,
    /// Background fill above / below the horizon.
    pub sky: Rgb,
    pub ground: Rgb,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 600,
            fov: 60.0,
            depth_samples: DEPTH_SAMPLES,
            sky: Rgb(24, 24, 40),
            ground: Rgb(32, 28, 24),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MoveConfig {
    /// World units per second.
    pub move_speed: f32,
    /// Degrees per second.
    pub turn_speed: f32,
    /// How far ahead of the player the interact check looks, world units.
    pub interact_reach: f32,
    /// Wall texture id that the interact intent opens.
    pub door: Option<TextureId>,
}

impl Default for MoveConfig {
    fn default() -> Self {
        Self {
            move_speed: 160.0,
            turn_speed: 120.0,
            interact_reach: 48.0,
            door: None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Config {
    pub view: ViewConfig,
    pub movement: MoveConfig,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let v = &self.view;
        if v.width == 0 || v.height == 0 {
            return Err(ConfigError::ZeroScreen(v.width, v.height));
        }
        if v.depth_samples == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if !(v.fov > 0.0 && v.fov < 180.0) {
            return Err(ConfigError::BadFov(v.fov));
        }
        let m = &self.movement;
        for (name, value) in [
            ("move_speed", m.move_speed),
            ("turn_speed", m.turn_speed),
            ("interact_reach", m.interact_reach),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::BadSpeed(name));
            }
        }
        Ok(())
    }
}
