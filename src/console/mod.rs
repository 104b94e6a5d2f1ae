//! Text console
//!
//! The scrolling message log and the command line beneath it.

mod input;
mod log;

pub use input::*;
pub use log::*;
