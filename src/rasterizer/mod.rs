//! Software rasterizer for the CRT display
//!
//! Features:
//! - RGBA canvas with clipped writes and alpha blending
//! - Bresenham lines, thick lines, filled circles
//! - Three-axis rotation and perspective projection
//! - 5x7 bitmap font with integer scaling

mod canvas;
mod font;
mod math;
mod types;

pub use canvas::*;
pub use font::*;
pub use math::*;
pub use types::*;

/// Default canvas dimensions
pub const WIDTH: usize = 800;
pub const HEIGHT: usize = 600;
