use super::Vec2;

/// Viewport size in screen pixels.
///
/// Used to map pointer positions into the NDC space widgets live in.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Width over height; `1.0` for an invalid viewport.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_valid() { self.width / self.height } else { 1.0 }
    }

    /// Maps a screen pixel (top-left origin, +Y down) to NDC (+Y up).
    #[inline]
    pub fn screen_to_ndc(self, screen_x: f32, screen_y: f32) -> Vec2 {
        Vec2::new(
            2.0 * screen_x / self.width - 1.0,
            -2.0 * screen_y / self.height + 1.0,
        )
    }
}
