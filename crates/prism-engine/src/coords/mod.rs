//! Coordinate and geometry types shared by the frame ring, renderers and UI.
//!
//! Canonical GUI space is normalized device coordinates:
//! - `[-1, 1] x [-1, 1]`
//! - origin at the viewport centre
//! - +X right, +Y up
//!
//! Pointer input arrives in screen pixels (top-left origin, +Y down) and is
//! mapped into NDC through [`Viewport::screen_to_ndc`].

mod color;
mod ndc;
mod vec2;
mod viewport;

pub use color::ColorRgba;
pub use ndc::NdcRect;
pub use vec2::Vec2;
pub use viewport::Viewport;
