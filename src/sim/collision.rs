//! Grid-cell occupancy tests.
//!
//! Collision here is point-vs-cell: a move is legal when the destination
//! falls inside the grid on an empty wall cell.  Anything outside the grid
//! counts as solid.

use glam::Vec2;

use crate::world::GridMap;

/// Outcome of a per-axis move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slide {
    pub moved_x: bool,
    pub moved_y: bool,
}

impl Slide {
    #[cfg(test)]
    pub(crate) fn moved(self) -> bool {
        self.moved_x || self.moved_y
    }
}

/// Move `pos` by `delta` only if the whole destination cell is empty.
/// Returns `true` when the move was accepted.
pub fn try_move(grid: &GridMap, pos: &mut Vec2, delta: Vec2) -> bool {
    let dest = *pos + delta;
    if grid.is_walkable(dest) {
        *pos = dest;
        true
    } else {
        false
    }
}

/// Move along x and y independently so an actor slides along walls
/// instead of stopping dead on diagonal contact.
pub fn try_move_with_slide(grid: &GridMap, pos: &mut Vec2, delta: Vec2) -> Slide {
    let mut out = Slide::default();

    let nx = Vec2::new(pos.x + delta.x, pos.y);
    if delta.x != 0.0 && grid.is_walkable(nx) {
        pos.x = nx.x;
        out.moved_x = true;
    }

    let ny = Vec2::new(pos.x, pos.y + delta.y);
    if delta.y != 0.0 && grid.is_walkable(ny) {
        pos.y = ny.y;
        out.moved_y = true;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::GridMap;
    use glam::vec2;

    fn room() -> GridMap {
        #[rustfmt::skip]
        let walls = vec![
            1, 1, 1, 1,
            1, 0, 0, 1,
            1, 0, 1, 1,
            1, 1, 1, 1,
        ];
        GridMap::with_walls(4, 4, 10.0, walls).unwrap()
    }

    #[test]
    fn whole_move_is_rejected_into_solid() {
        let g = room();
        let mut p = vec2(15.0, 15.0);
        assert!(!try_move(&g, &mut p, vec2(10.0, 10.0)));
        assert_eq!(p, vec2(15.0, 15.0));
        assert!(try_move(&g, &mut p, vec2(10.0, 0.0)));
        assert_eq!(p, vec2(25.0, 15.0));
    }

    #[test]
    fn slide_keeps_the_free_axis() {
        let g = room();
        let mut p = vec2(15.0, 15.0);
        let s = try_move_with_slide(&g, &mut p, vec2(8.0, 0.0));
        assert!(s.moved_x && !s.moved_y);

        // diagonal into the (2,2) block: y is blocked, x is free
        let mut p = vec2(25.0, 15.0);
        let s = try_move_with_slide(&g, &mut p, vec2(-3.0, 8.0));
        assert_eq!(s, Slide { moved_x: true, moved_y: false });
        assert_eq!(p, vec2(22.0, 15.0));
    }

    #[test]
    fn outside_counts_as_solid() {
        let g = GridMap::with_walls(1, 1, 10.0, vec![0]).unwrap();
        let mut p = vec2(5.0, 5.0);
        let s = try_move_with_slide(&g, &mut p, vec2(-6.0, 6.0));
        assert!(!s.moved());
        assert_eq!(p, vec2(5.0, 5.0));
    }
}
