//! Colors for game elements

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const YELLOW: Rgb = Rgb(255, 255, 0);
pub const BLUE: Rgb = Rgb(0, 0, 255);
pub const RED: Rgb = Rgb(255, 0, 0);

// Backgrounds, one per view
pub const DARK_BLUE: Rgb = Rgb(0, 0, 139);
pub const DARK_SLATE_BLUE: Rgb = Rgb(72, 61, 139);
pub const DARK_GOLDENROD: Rgb = Rgb(184, 134, 11);

// Sprites
pub const SHIP_HULL: Rgb = Rgb(204, 51, 51);
pub const SHIP_COCKPIT: Rgb = Rgb(255, 140, 120);
pub const LASER_BLUE: Rgb = Rgb(90, 180, 255);

/// Balloon colors cycle through these by row
pub const BALLOON_ROW_COLORS: [Rgb; 3] = [YELLOW, BLUE, RED];

pub fn balloon_color(row: usize) -> Rgb {
    BALLOON_ROW_COLORS[row % BALLOON_ROW_COLORS.len()]
}
