//! Wireframe decoration
//!
//! A fixed 3D point-and-edge model, rotated and projected every frame.

mod model;
mod projector;

pub use model::*;
pub use projector::*;
