//! CRT display pipeline
//!
//! Compositor, its effect timers, and construction-time configuration.

mod compositor;
mod config;
mod timers;

pub use compositor::*;
pub use config::*;
pub use timers::*;
