//! Sprite shapes for game entities

use glam::Vec2;

use super::canvas::Canvas;
use super::palette::{LASER_BLUE, SHIP_COCKPIT, SHIP_HULL, balloon_color};
use crate::sim::{Balloon, Player, Shot};

/// Ship: full-width hull with a narrower cockpit on its upper half
pub fn draw_ship(canvas: &mut Canvas, player: &Player) {
    canvas.fill_rect(
        player.pos - Vec2::new(0.0, player.half_size.y * 0.25),
        Vec2::new(player.half_size.x, player.half_size.y * 0.75),
        SHIP_HULL,
    );
    canvas.fill_rect(
        player.pos + Vec2::new(0.0, player.half_size.y * 0.5),
        Vec2::new(player.half_size.x * 0.3, player.half_size.y * 0.5),
        SHIP_COCKPIT,
    );
}

pub fn draw_shot(canvas: &mut Canvas, shot: &Shot) {
    canvas.fill_rect(shot.pos, shot.half_size, LASER_BLUE);
}

pub fn draw_balloon(canvas: &mut Canvas, balloon: &Balloon) {
    let half = balloon.size / 2.0;
    canvas.fill_rect(balloon.pos, Vec2::splat(half), balloon_color(balloon.row));
}
