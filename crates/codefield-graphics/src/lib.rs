//! Pure math/data for drawing a code field
//!
//! Color definitions, density-independent units and the handful of geometry
//! primitives the field layout produces.

mod color;
mod geometry;
mod unit;

pub use color::*;
pub use geometry::*;
pub use unit::*;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::unit::Dp;
}
