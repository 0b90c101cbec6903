use super::Vec2;

/// Axis-aligned rectangle in normalized device coordinates.
///
/// `origin` is the **top-left** corner of the footprint. Because NDC is +Y up,
/// the rectangle spans `[origin.x, origin.x + size.x]` horizontally and
/// `[origin.y - size.y, origin.y]` vertically. The top edge is the anchor:
/// changing the height moves only the bottom edge.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct NdcRect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl NdcRect {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn right(self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn top(self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn bottom(self) -> f32 {
        self.origin.y - self.size.y
    }

    #[inline]
    pub fn bottom_left(self) -> Vec2 {
        Vec2::new(self.left(), self.bottom())
    }

    #[inline]
    pub fn top_left(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn top_right(self) -> Vec2 {
        Vec2::new(self.right(), self.top())
    }

    #[inline]
    pub fn bottom_right(self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    /// Returns `true` unless both dimensions are strictly positive and finite.
    #[inline]
    pub fn is_degenerate(self) -> bool {
        !(self.size.x > 0.0 && self.size.y > 0.0 && self.size.is_finite() && self.origin.is_finite())
    }

    /// Same rectangle with a new height; the top edge does not move.
    #[inline]
    pub fn with_height(self, height: f32) -> Self {
        Self::new(self.origin.x, self.origin.y, self.size.x, height)
    }

    /// Open containment: points on an edge are outside.
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        self.left() < p.x && self.top() > p.y && self.right() > p.x && self.bottom() < p.y
    }
}
