use glam::Vec2;

use crate::world::texture::TextureId;

/// Layer value meaning "no surface here".
pub const EMPTY: TextureId = 0;

/// Things that can go wrong when building a grid.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GridError {
    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    ZeroSize { width: usize, height: usize },

    #[error("cell size must be positive (got {0})")]
    BadCellSize(f32),

    #[error("{layer} layer has {got} cells, expected {expected}")]
    LayerLength {
        layer: &'static str,
        got: usize,
        expected: usize,
    },
}

/// Which of the three parallel layers a query addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    Walls,
    Floors,
    Ceilings,
}

/// Result of a cell query.  `Outside` is the "no cell" sentinel; callers
/// treat it as opaque so nothing can leave the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Outside,
    Empty,
    Solid(TextureId),
}

impl Cell {
    #[inline]
    pub fn is_open(self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[inline]
    pub fn texture(self) -> Option<TextureId> {
        match self {
            Cell::Solid(id) => Some(id),
            _ => None,
        }
    }
}

/// Runtime map: three same-shaped layers in row-major order.
///
/// * `walls` drives raycasting and collision.
/// * `floors` / `ceilings` are only sampled by the plane caster.
/// * Gameplay may overwrite whole cells between frames (doors).
#[derive(Clone, Debug)]
pub struct GridMap {
    width: usize,
    height: usize,
    cell_size: f32,
    max_depth: usize,
    walls: Vec<TextureId>,
    floors: Vec<TextureId>,
    ceilings: Vec<TextureId>,
}

impl GridMap {
    pub fn new(
        width: usize,
        height: usize,
        cell_size: f32,
        walls: Vec<TextureId>,
        floors: Vec<TextureId>,
        ceilings: Vec<TextureId>,
    ) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroSize { width, height });
        }
        if !(cell_size > 0.0) || !cell_size.is_finite() {
            return Err(GridError::BadCellSize(cell_size));
        }
        let expected = width * height;
        for (layer, data) in [
            ("walls", &walls),
            ("floors", &floors),
            ("ceilings", &ceilings),
        ] {
            if data.len() != expected {
                return Err(GridError::LayerLength {
                    layer,
                    got: data.len(),
                    expected,
                });
            }
        }

        Ok(Self {
            width,
            height,
            cell_size,
            max_depth: width.max(height),
            walls,
            floors,
            ceilings,
        })
    }

    /// A map with only `walls` set; floors and ceilings stay bare.
    pub fn with_walls(
        width: usize,
        height: usize,
        cell_size: f32,
        walls: Vec<TextureId>,
    ) -> Result<Self, GridError> {
        let n = width * height;
        Self::new(width, height, cell_size, walls, vec![EMPTY; n], vec![EMPTY; n])
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Traversal bound for one DDA pass: `max(width, height)`.
    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Row-major index of `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Grid coordinates of the cell containing world point `p`.
    #[inline]
    pub fn cell_coords(&self, p: Vec2) -> (i32, i32) {
        (
            (p.x / self.cell_size).floor() as i32,
            (p.y / self.cell_size).floor() as i32,
        )
    }

    pub fn cell(&self, layer: Layer, x: i32, y: i32) -> Cell {
        match self.index(x, y) {
            None => Cell::Outside,
            Some(i) => match self.layer(layer)[i] {
                EMPTY => Cell::Empty,
                id => Cell::Solid(id),
            },
        }
    }

    #[inline]
    pub fn wall(&self, x: i32, y: i32) -> Cell {
        self.cell(Layer::Walls, x, y)
    }

    /// Wall cell under world point `p`.
    #[inline]
    pub fn wall_at(&self, p: Vec2) -> Cell {
        let (x, y) = self.cell_coords(p);
        self.wall(x, y)
    }

    /// True if world point `p` lies inside the grid on an empty wall cell.
    #[inline]
    pub fn is_walkable(&self, p: Vec2) -> bool {
        self.wall_at(p).is_open()
    }

    /// Overwrite one whole cell.  Returns the previous value, or `None`
    /// when `(x, y)` is outside the grid (nothing is written).
    pub fn set(&mut self, layer: Layer, x: i32, y: i32, value: TextureId) -> Option<TextureId> {
        let i = self.index(x, y)?;
        let slot = &mut self.layer_mut(layer)[i];
        Some(std::mem::replace(slot, value))
    }

    pub fn layer(&self, layer: Layer) -> &[TextureId] {
        match layer {
            Layer::Walls => &self.walls,
            Layer::Floors => &self.floors,
            Layer::Ceilings => &self.ceilings,
        }
    }

    fn layer_mut(&mut self, layer: Layer) -> &mut [TextureId] {
        match layer {
            Layer::Walls => &mut self.walls,
            Layer::Floors => &mut self.floors,
            Layer::Ceilings => &mut self.ceilings,
        }
    }

    /// Largest texture id referenced by any layer (0 for a bare map).
    pub fn max_texture_id(&self) -> TextureId {
        self.walls
            .iter()
            .chain(&self.floors)
            .chain(&self.ceilings)
            .copied()
            .max()
            .unwrap_or(EMPTY)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
