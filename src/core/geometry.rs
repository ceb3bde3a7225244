//=========================================================================
// Geometry
//=========================================================================
//
// Plain size types shared by the director, renderers and scenes.
//
//=========================================================================

//=== Size2 ===============================================================

/// A two-dimensional extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Size2<T> {
    pub width: T,
    pub height: T,
}

/// Size in whole pixels (surfaces, virtual resolutions).
pub type Size2u = Size2<u32>;

/// Size in floating point units (cached surface size for remapping).
pub type Size2f = Size2<f32>;

impl<T> Size2<T> {
    pub const fn new(width: T, height: T) -> Self {
        Self { width, height }
    }
}

impl Size2u {
    /// True when either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn to_f32(self) -> Size2f {
        Size2f::new(self.width as f32, self.height as f32)
    }
}

impl Size2f {
    /// True when either side is zero or negative.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
