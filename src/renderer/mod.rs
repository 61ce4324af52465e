//! Rendering abstraction layer.
//!
//! *The engine never touches a pixel buffer directly.*
//! It emits a stream of axis-aligned [`Rect`]s (background, walls,
//! floors/ceilings, sprites, in that order) into a type implementing
//! [`Renderer`].
//!
//! * Back-ends are pluggable: [`Software`] rasterises into a `u32`
//!   frame-buffer, [`Recorder`] just keeps the list.
//! * A blanket impl [`RendererExt`] replays a recorded list so call-sites
//!   stay short.

use crate::world::Rgba;

/// Opaque output colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Pack as `0x00RRGGBB`.
    #[inline]
    pub fn packed(self) -> u32 {
        (self.0 as u32) << 16 | (self.1 as u32) << 8 | self.2 as u32
    }
}

impl From<Rgba> for Rgb {
    #[inline]
    fn from(c: Rgba) -> Self {
        Rgb(c.r, c.g, c.b)
    }
}

/// One filled screen rectangle.  May extend past the screen; back-ends clip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub colour: Rgb,
}

impl Rect {
    #[inline]
    pub fn new(x: i32, y: i32, w: i32, h: i32, colour: Rgb) -> Self {
        Self { x, y, w, h, colour }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// True if the rectangle covers screen pixel `(px, py)`.
    #[inline]
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }
}

/// A pixel sink that owns whatever scratch it needs for one frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
/// Software callers forward it to their window manager; back-ends without
/// a CPU buffer call the closure with an empty slice.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Fill one rectangle.
    fn fill_rect(&mut self, rect: &Rect);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[u32], usize, usize);
}

/// Convenience blanket-impl with a one-liner `draw_rects` adaptor.
pub trait RendererExt: Renderer {
    fn draw_rects<F>(&mut self, width: usize, height: usize, rects: &[Rect], submit: F)
    where
        F: FnOnce(&[u32], usize, usize),
    {
        self.begin_frame(width, height);
        for r in rects {
            self.fill_rect(r);
        }
        self.end_frame(submit);
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

mod recorder;
mod software;

pub use recorder::Recorder;
pub use software::Software;
