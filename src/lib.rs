//! Balloon Shooter - a small terminal arcade game
//!
//! Core modules:
//! - `sim`: Simulation (player, shots, balloons, physics world, tick)
//! - `view`: Intro / Game / GameOver screen controller
//! - `input`: Logical keys, input snapshots, gamepad events
//! - `renderer`: Logical canvas and terminal presentation
//! - `platform`: Terminal and gamepad plumbing
//! - `settings`: Data-driven game configuration

pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod view;

pub use settings::Settings;
pub use view::{View, ViewController};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the physics world's native rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Logical screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Player ship image size in pixels (before sprite scaling)
    pub const SHIP_IMAGE_SIZE: (f32, f32) = (99.0, 75.0);
    /// Laser image size in pixels, already rotated to point up
    pub const LASER_IMAGE_SIZE: (f32, f32) = (9.0, 54.0);

    /// Top row of balloons sits here; each further row is lower
    pub const BALLOON_TOP_Y: f32 = 550.0;
    pub const BALLOON_ROW_SPACING: f32 = 50.0;
    pub const BALLOON_MASS: f32 = 1000.0;

    pub const SHOT_MASS: f32 = 0.001;
}

/// Horizontal direction for a balloon row: even rows move left, odd rows right
#[inline]
pub fn row_direction(row: usize) -> f32 {
    if row % 2 == 0 { -1.0 } else { 1.0 }
}
