use crate::renderer::{Rect, Renderer};

/// Back-end that keeps the emitted rectangles instead of rasterising them.
///
/// Handy for tests and for presentation layers with their own blitter.
#[derive(Default, Debug)]
pub struct Recorder {
    pub rects: Vec<Rect>,
    pub width: usize,
    pub height: usize,
}

impl Renderer for Recorder {
    fn begin_frame(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.rects.clear();
    }

    fn fill_rect(&mut self, rect: &Rect) {
        if !rect.is_empty() {
            self.rects.push(*rect);
        }
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[u32], usize, usize),
    {
        submit(&[], self.width, self.height);
    }
}

impl Recorder {
    /// Colour of the last rect covering `(x, y)`, i.e. what a rasteriser
    /// would leave there.
    pub fn top_at(&self, x: i32, y: i32) -> Option<&Rect> {
        self.rects.iter().rev().find(|r| r.contains(x, y))
    }
}
