//! ASCII sprites
//!
//! A keyed catalog of multi-frame drawings and the animator that cycles them.
//! The compositor only ever sees the lines of one frame.

mod animation;
mod catalog;

pub use animation::*;
pub use catalog::*;
