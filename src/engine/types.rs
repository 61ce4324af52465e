use glam::Vec2;

use crate::world::{GridMap, Pose, TextureBank, TextureId};

/// Distance reported for a ray that never hit a wall.
pub const NO_HIT: f32 = f32::MAX;

/// Constants that depend on the *frame-buffer*, not on the map.
#[derive(Clone, Copy, Debug)]
pub struct Screen {
    pub w: usize,
    pub h: usize,
    pub half_w: f32, // pre-derived for speed
    pub half_h: f32, // pre-derived for speed
}

impl Screen {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            half_w: w as f32 * 0.5,
            half_h: h as f32 * 0.5,
        }
    }
}

/// Camera state reused by every raster unit.
#[derive(Clone, Copy, Debug)]
pub struct Viewer {
    /// `half_h / tan(fov / 2)`, pixels per world unit at depth 1.
    pub focal: f32,
    /// Eye height above the floor (half a cell: walls span the horizon).
    pub eye_z: f32,
}

/// Read-only inputs shared by every pass of one frame.
#[derive(Clone, Copy)]
pub struct Scene<'a> {
    pub grid: &'a GridMap,
    pub pose: &'a Pose,
    pub bank: &'a TextureBank,
    pub screen: Screen,
    pub view: Viewer,
}

impl<'a> Scene<'a> {
    pub fn new(grid: &'a GridMap, pose: &'a Pose, bank: &'a TextureBank, screen: Screen) -> Self {
        Self {
            grid,
            pose,
            bank,
            screen,
            view: Viewer {
                focal: pose.focal(screen.half_h),
                eye_z: grid.cell_size() * 0.5,
            },
        }
    }
}

/// Grid lines a DDA pass steps across.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Lines of constant y.
    Horizontal,
    /// Lines of constant x.
    Vertical,
}

impl Axis {
    /// `(major, minor)`: major is the coordinate the pass steps along.
    #[inline]
    pub fn split(self, v: Vec2) -> (f32, f32) {
        match self {
            Axis::Horizontal => (v.y, v.x),
            Axis::Vertical => (v.x, v.y),
        }
    }

    #[inline]
    pub fn join(self, major: f32, minor: f32) -> Vec2 {
        match self {
            Axis::Horizontal => Vec2::new(minor, major),
            Axis::Vertical => Vec2::new(major, minor),
        }
    }

    /// Grid `(x, y)` for a `(major, minor)` cell pair.
    #[inline]
    pub fn cell(self, major: i32, minor: i32) -> (i32, i32) {
        match self {
            Axis::Horizontal => (minor, major),
            Axis::Vertical => (major, minor),
        }
    }
}

/// Nearest wall along one ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallHit {
    /// Euclidean distance from the eye (uncorrected).
    pub distance: f32,
    pub point: Vec2,
    pub texture: TextureId,
    /// Offset along the struck face in world units, `[0, cell_size)`.
    pub u: f32,
    pub axis: Axis,
}

/// Per-sample output of the wall pass, consumed by the plane pass.
#[derive(Clone, Copy, Debug)]
pub struct Column {
    /// Screen span `[x, x + w)`; `w` is 0 when the screen is narrower than
    /// the sample count.
    pub x: i32,
    pub w: i32,
    /// Ray angle, degrees.
    pub angle: f32,
    pub hit: Option<WallHit>,
    /// Perpendicular distance used for projection; `NO_HIT` without a hit.
    pub corrected: f32,
    /// Wall slice extents in screen rows (both `half_h` when nothing was hit).
    pub top: f32,
    pub bottom: f32,
}

/// Screen span owned by angular sample `i` of `n` on a `width`-pixel screen.
///
/// Column `i` covers every pixel `x` with `x * n / width == i`, so
/// [`DepthBuffer::sample_for_x`] is its exact inverse.
#[inline]
pub fn column_span(i: usize, n: usize, width: usize) -> (i32, i32) {
    let x0 = (i * width).div_ceil(n);
    let x1 = ((i + 1) * width).div_ceil(n);
    (x0 as i32, (x1 - x0) as i32)
}

/// Per-sample wall distances for one frame.
///
/// Written once per sample by the wall pass and read-only afterwards.
/// `reset` invalidates the previous frame so stale entries can't be mistaken
/// for fresh ones.
#[derive(Clone, Debug)]
pub struct DepthBuffer {
    data: Vec<f32>,
    written: usize,
}

impl DepthBuffer {
    pub fn new(samples: usize) -> Self {
        Self {
            data: vec![NO_HIT; samples],
            written: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn reset(&mut self) {
        self.data.fill(NO_HIT);
        self.written = 0;
    }

    #[inline]
    pub fn write(&mut self, i: usize, distance: f32) {
        self.data[i] = distance;
        self.written += 1;
    }

    /// True once every sample has been written since the last `reset`.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.written >= self.data.len()
    }

    #[inline]
    pub fn get(&self, i: usize) -> f32 {
        self.data[i]
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Sample index covering screen column `x` on a `width`-pixel screen.
    #[inline]
    pub fn sample_for_x(&self, x: i32, width: usize) -> usize {
        let n = self.data.len();
        let x = x.clamp(0, width as i32 - 1) as usize;
        (x * n / width).min(n - 1)
    }
}
