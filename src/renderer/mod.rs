//! Terminal rendering
//!
//! Scenes are drawn in screen units onto a [`Canvas`], which the
//! [`TerminalRenderer`] then writes out cell by cell.

pub mod canvas;
pub mod palette;
pub mod scene;
pub mod sprites;
pub mod terminal;

pub use canvas::{Anchor, Canvas};
pub use terminal::TerminalRenderer;
