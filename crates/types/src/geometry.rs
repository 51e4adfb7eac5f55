use serde::{Deserialize, Serialize};

/// An axis-aligned box in font design units (1/1000 em for AFM fonts).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
    pub top: i32,
}

impl BoundingBox {
    pub fn new(left: i32, bottom: i32, right: i32, top: i32) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.top - self.bottom
    }

    /// True for the zero-area box AFM files use for blank glyphs such as `space`.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(self, other: Self) -> Self {
        Self {
            left: self.left.min(other.left),
            bottom: self.bottom.min(other.bottom),
            right: self.right.max(other.right),
            top: self.top.max(other.top),
        }
    }
}

impl From<[i32; 4]> for BoundingBox {
    fn from([left, bottom, right, top]: [i32; 4]) -> Self {
        Self::new(left, bottom, right, top)
    }
}
