pub use kurbo::{Point, Vec2};

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_array(px: [u8; 4]) -> Self {
        Self::rgba(px[0], px[1], px[2], px[3])
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Color {
    fn from(px: [u8; 4]) -> Self {
        Self::from_array(px)
    }
}

impl From<Color> for [u8; 4] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

/// Axis-aligned integer rectangle in pixel space. `w`/`h` may be zero or negative, in which
/// case the rectangle is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct IRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl IRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_empty(self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Exclusive right edge.
    pub fn right(self) -> i64 {
        i64::from(self.x) + i64::from(self.w)
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> i64 {
        i64::from(self.y) + i64::from(self.h)
    }

    /// Return `true` when the rectangle lies fully inside `[0, width) x [0, height)`.
    pub fn is_within(self, width: u32, height: u32) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.right() <= i64::from(width)
            && self.bottom() <= i64::from(height)
    }
}

/// Identity of a live pixel store, unique per [`crate::Graphics`] context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(pub(crate) u64);

impl SurfaceId {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
