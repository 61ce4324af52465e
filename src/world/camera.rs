use glam::{Vec2, vec2};

/// Wrap `deg` into `[0, 360)`.
#[inline]
pub fn normalize_degrees(deg: f32) -> f32 {
    let a = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negatives
    if a >= 360.0 { 0.0 } else { a }
}

/// Unit direction for a heading given in degrees.
///
/// 0° = +X, 90° = +Y (screen-down, matching row-major map layout).
#[inline]
pub fn direction(deg: f32) -> Vec2 {
    let (s, c) = deg.to_radians().sin_cos();
    vec2(c, s)
}

/// Player view-point in world space.
///
/// * Only heading is simulated; there is no pitch.
/// * Angles are kept in **degrees**, heading always in `[0, 360)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub pos: Vec2,
    heading: f32,
    fov: f32,
}

impl Pose {
    /// Create a pose at `pos`, facing `heading`, with horizontal FoV `fov`.
    pub fn new(pos: Vec2, heading: f32, fov: f32) -> Self {
        Self {
            pos,
            heading: normalize_degrees(heading),
            fov,
        }
    }

    #[inline]
    pub fn heading(&self) -> f32 {
        self.heading
    }

    #[inline]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Unit vector pointing where the player looks.
    #[inline(always)]
    pub fn forward(&self) -> Vec2 {
        direction(self.heading)
    }

    /// Unit vector pointing to the player's right.
    #[inline(always)]
    pub fn right(&self) -> Vec2 {
        // heading + 90° in a y-down world
        self.forward().perp()
    }

    /// Rotate by `delta` degrees (positive = towards +Y).
    pub fn turn(&mut self, delta: f32) {
        self.heading = normalize_degrees(self.heading + delta);
    }

    /// Transform world point `p` into camera-local coords by rotating
    /// through `-heading`:
    ///  .x = lateral offset (+ right)
    ///  .y = depth along forward axis
    #[inline]
    pub fn to_cam(&self, p: Vec2) -> Vec2 {
        let d = p - self.pos;
        vec2(d.dot(self.right()), d.dot(self.forward()))
    }

    /// Pixel-per-world-unit scale: `half_h / tan(fov / 2)`.
    #[inline]
    pub fn focal(&self, half_h: f32) -> f32 {
        half_h / (self.fov.to_radians() * 0.5).tan()
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
