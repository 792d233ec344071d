//! Platform layer
//!
//! Terminal setup and event delivery, plus optional gamepad discovery.

pub mod gamepad;
pub mod terminal;

pub use gamepad::Gamepads;
pub use terminal::{KeyRouter, TerminalGuard, map_key, spawn_event_reader};
