//! ---------------------------------------------------------------------------
//! Classic software (CPU) rect renderer
//!
//! * Fills a `Vec<u32>` frame-buffer in **0x00RRGGBB** format, the layout
//!   `minifb` expects.
//! * Relies on the engine to feed rects in painter's order, so no depth test
//!   happens here.
//! ---------------------------------------------------------------------------

use crate::renderer::{Rect, Renderer, Rgb};

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

#[derive(Default)]
pub struct Software {
    scratch: Vec<u32>,
    width: usize,
    height: usize,
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
        }
        self.scratch.fill(0);
    }

    fn fill_rect(&mut self, r: &Rect) {
        if r.is_empty() {
            return;
        }
        /* clip to the frame */
        let x0 = r.x.max(0) as usize;
        let y0 = r.y.max(0) as usize;
        let x1 = (r.x.saturating_add(r.w)).clamp(0, self.width as i32) as usize;
        let y1 = (r.y.saturating_add(r.h)).clamp(0, self.height as i32) as usize;
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let px = r.colour.packed();
        for y in y0..y1 {
            let row = y * self.width;
            self.scratch[row + x0..row + x1].fill(px);
        }
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[u32], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}

impl Software {
    #[cfg(test)]
    pub(crate) fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.scratch[y * self.width + x])
    }

    /// Integer Bresenham line, clipped per pixel.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, col: Rgb) {
        let col = col.packed();
        let mut x0 = x0;
        let mut y0 = y0;
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            if (0..self.width as i32).contains(&x0) && (0..self.height as i32).contains(&y0) {
                self.scratch[y0 as usize * self.width + x0 as usize] = col;
            }
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
