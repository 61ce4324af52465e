// Format-agnostic repository of textures handed over by the asset loader.
// The renderer and world logic interact through `TextureId` only.

use std::collections::HashMap;

/// Runtime handle for a texture in this bank.
///
/// Ids are **1-based** so that a grid layer value can be used directly:
/// `0` means "no surface" and never names a texture.
pub type TextureId = u16;

/// One RGBA texel.  `a == 0` is fully transparent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    #[inline]
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}

/// CPU-side raster in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub name: String,
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<Rgba>,
}

impl Texture {
    pub fn new<S: Into<String>>(
        name: S,
        w: usize,
        h: usize,
        pixels: Vec<Rgba>,
    ) -> Result<Self, TextureError> {
        let name = name.into();
        if w == 0 || h == 0 {
            return Err(TextureError::Empty(name));
        }
        if pixels.len() != w * h {
            return Err(TextureError::RasterLength {
                name,
                got: pixels.len(),
                expected: w * h,
            });
        }
        Ok(Self { name, w, h, pixels })
    }

    /// Uniformly coloured raster.
    pub fn solid<S: Into<String>>(name: S, w: usize, h: usize, colour: Rgba) -> Self {
        Self {
            name: name.into(),
            w: w.max(1),
            h: h.max(1),
            pixels: vec![colour; w.max(1) * h.max(1)],
        }
    }

    /// Two-colour checkerboard with `cell`-sized squares.
    pub fn checker<S: Into<String>>(name: S, size: usize, cell: usize, a: Rgba, b: Rgba) -> Self {
        let size = size.max(1);
        let cell = cell.max(1);
        let mut pixels = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                pixels.push(if (x / cell + y / cell) % 2 == 0 { a } else { b });
            }
        }
        Self {
            name: name.into(),
            w: size,
            h: size,
            pixels,
        }
    }

    /// Texel at `(x, y)`.  Coordinates must already be wrapped into range.
    #[inline]
    pub fn texel(&self, x: usize, y: usize) -> Result<Rgba, TextureError> {
        if x >= self.w || y >= self.h {
            return Err(TextureError::TexelOutOfRange {
                x,
                y,
                w: self.w,
                h: self.h,
            });
        }
        Ok(self.pixels[y * self.w + x])
    }

    /// Wrap a signed texel coordinate into `[0, w)`.
    #[inline]
    pub fn wrap_u(&self, u: i32) -> usize {
        u.rem_euclid(self.w as i32) as usize
    }

    /// Wrap a signed texel coordinate into `[0, h)`.
    #[inline]
    pub fn wrap_v(&self, v: i32) -> usize {
        v.rem_euclid(self.h as i32) as usize
    }
}

/// Things that can go wrong when using the bank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Attempted to insert a second texture with an existing name.
    #[error("texture name `{0}` already present in bank")]
    Duplicate(String),

    /// Requested id is 0 or past the last texture.
    #[error("texture id {0} out of range")]
    BadId(TextureId),

    #[error("texel ({x}, {y}) outside {w}x{h} raster")]
    TexelOutOfRange { x: usize, y: usize, w: usize, h: usize },

    #[error("texture `{0}` has no pixels")]
    Empty(String),

    #[error("texture `{name}` has {got} pixels, expected {expected}")]
    RasterLength {
        name: String,
        got: usize,
        expected: usize,
    },
}

/// Ordered collection of rasters addressed by 1-based [`TextureId`].
///
/// * Does **not** know about PNG or any file format; loading is done elsewhere.
/// * Stores exactly one copy of every name.
///
/// **Thread-safety:** access `TextureBank` from a single thread; the
/// renderer only ever borrows it immutably during a frame.
#[derive(Default)]
pub struct TextureBank {
    by_name: HashMap<String, TextureId>,
    data: Vec<Texture>,
}

impl TextureBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of textures stored.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Obtain the id for a loaded texture by name.
    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    /// Borrow a texture by id, with bounds-checking.
    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        if id == 0 {
            return Err(TextureError::BadId(id));
        }
        self.data
            .get(id as usize - 1)
            .ok_or(TextureError::BadId(id))
    }

    /// Sample texture `id` at already-wrapped texel coordinates.
    #[cfg(test)]
    pub(crate) fn sample(&self, id: TextureId, x: usize, y: usize) -> Result<Rgba, TextureError> {
        self.texture(id)?.texel(x, y)
    }

    /// Insert a texture under `name`.
    ///
    /// * Returns the newly assigned `TextureId` (first insert gets `1`).
    /// * Fails if the name already exists (`Duplicate`).
    pub fn insert<S: Into<String>>(
        &mut self,
        name: S,
        tex: Texture,
    ) -> Result<TextureId, TextureError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TextureError::Duplicate(name));
        }
        self.data.push(tex);
        let id = self.data.len() as TextureId;
        self.by_name.insert(name, id);
        Ok(id)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::opaque(255, 0, 0);
    const BLUE: Rgba = Rgba::opaque(0, 0, 255);

    #[test]
    fn ids_are_one_based() {
        let mut bank = TextureBank::new();
        let red = bank.insert("RED", Texture::solid("RED", 2, 2, RED)).unwrap();
        let blue = bank.insert("BLUE", Texture::solid("BLUE", 2, 2, BLUE)).unwrap();

        assert_eq!(red, 1);
        assert_eq!(blue, 2);
        assert_eq!(bank.id("BLUE"), Some(blue));
        assert_eq!(bank.id("NOPE"), None);
        assert_eq!(bank.sample(red, 1, 1).unwrap(), RED);
        assert_eq!(bank.sample(blue, 0, 0).unwrap(), BLUE);
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut bank = TextureBank::new();
        bank.insert("WOOD", Texture::solid("WOOD", 1, 1, RED)).unwrap();
        let err = bank
            .insert("WOOD", Texture::solid("WOOD", 1, 1, BLUE))
            .unwrap_err();
        assert_eq!(err, TextureError::Duplicate("WOOD".into()));
        assert_eq!(bank.len(), 1);
    }

    #[test]
    fn bad_id_guard() {
        let mut bank = TextureBank::new();
        bank.insert("RED", Texture::solid("RED", 1, 1, RED)).unwrap();
        assert_eq!(bank.texture(0).unwrap_err(), TextureError::BadId(0));
        assert_eq!(bank.texture(2).unwrap_err(), TextureError::BadId(2));
        assert_eq!(
            bank.sample(1, 1, 0).unwrap_err(),
            TextureError::TexelOutOfRange { x: 1, y: 0, w: 1, h: 1 }
        );
    }

    #[test]
    fn wrapping_is_euclidean() {
        let tex = Texture::checker("C", 4, 1, RED, BLUE);
        assert_eq!(tex.wrap_u(-1), 3);
        assert_eq!(tex.wrap_u(9), 1);
        assert_eq!(tex.texel(1, 0).unwrap(), BLUE);
        assert_eq!(tex.texel(1, 1).unwrap(), RED);
    }

    #[test]
    fn raster_length_validated() {
        let err = Texture::new("X", 2, 2, vec![RED; 3]).unwrap_err();
        assert!(matches!(err, TextureError::RasterLength { got: 3, .. }));
        assert_eq!(
            Texture::new("Z", 0, 2, vec![]).unwrap_err(),
            TextureError::Empty("Z".into())
        );
    }
}
