//! Per-entity update rules, composed by `tick`

use crate::input::TickInput;

use super::state::{Balloon, Player, Shot};

/// Horizontal player velocity for this tick.
///
/// A connected joystick overrides the keyboard; holding both arrows cancels out.
pub fn player_velocity(input: &TickInput, speed: f32) -> f32 {
    if let Some(x) = input.joystick_x {
        return x.clamp(-1.0, 1.0) * speed;
    }
    match (input.left, input.right) {
        (true, false) => -speed,
        (false, true) => speed,
        _ => 0.0,
    }
}

/// Integrate the ship and keep its edges inside the bounds (no bounce)
pub fn move_player(player: &mut Player, dt: f32) {
    player.pos.x += player.vel_x * dt.max(0.0);

    if player.left() < player.min_x {
        player.pos.x = player.min_x + player.half_size.x;
    } else if player.right() > player.max_x {
        player.pos.x = player.max_x - player.half_size.x;
    }
}

/// Past the top of the screen
pub fn shot_expired(shot: &Shot) -> bool {
    shot.pos.y > shot.max_y
}

/// Teleport a balloon that left the screen to the opposite edge.
/// Returns true when it wrapped.
pub fn wrap_balloon(balloon: &mut Balloon, screen_width: f32) -> bool {
    if balloon.pos.x > screen_width + balloon.size {
        balloon.pos.x = -balloon.size;
        true
    } else if balloon.pos.x < -balloon.size {
        balloon.pos.x = screen_width + balloon.size;
        true
    } else {
        false
    }
}
