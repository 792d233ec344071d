//! Per-view scene drawing

use super::canvas::{Anchor, Canvas};
use super::palette::{DARK_BLUE, DARK_GOLDENROD, DARK_SLATE_BLUE, Rgb, WHITE};
use super::sprites::{draw_balloon, draw_ship, draw_shot};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::GameState;
use crate::view::View;

/// Gap between a title and the line under it
const SUBTITLE_OFFSET: f32 = 75.0;

/// Redraw the whole canvas for the active view
pub fn draw(canvas: &mut Canvas, view: &View) {
    match view {
        View::Intro => draw_titled(
            canvas,
            DARK_SLATE_BLUE,
            "Instructions Screen",
            "Press any key to start the game",
        ),
        View::Game(game) => draw_game(canvas, &game.state),
        View::GameOver { score } => draw_titled(
            canvas,
            DARK_GOLDENROD,
            "Game over!",
            &format!("Your score: {}", score),
        ),
    }
}

fn draw_titled(canvas: &mut Canvas, bg: Rgb, title: &str, subtitle: &str) {
    canvas.clear(bg);
    let center_x = SCREEN_WIDTH / 2.0;
    let center_y = SCREEN_HEIGHT / 2.0;
    canvas.draw_text(center_x, center_y, title, WHITE, Anchor::Center);
    canvas.draw_text(
        center_x,
        center_y - SUBTITLE_OFFSET,
        subtitle,
        WHITE,
        Anchor::Center,
    );
}

fn draw_game(canvas: &mut Canvas, state: &GameState) {
    canvas.clear(DARK_BLUE);

    for shot in &state.shots {
        draw_shot(canvas, shot);
    }
    draw_ship(canvas, &state.player);
    for balloon in &state.balloons {
        draw_balloon(canvas, balloon);
    }

    // HUD
    canvas.draw_text(
        10.0,
        SCREEN_HEIGHT - 20.0,
        &format!("SCORE: {}", state.score),
        WHITE,
        Anchor::Left,
    );
    canvas.draw_text(
        10.0,
        SCREEN_HEIGHT - 40.0,
        &format!("LIVES: {}", state.lives),
        WHITE,
        Anchor::Left,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::settings::Settings;
    use crate::view::ViewController;

    // 10 units per column, 20 per row
    fn canvas() -> Canvas {
        Canvas::new(80, 30)
    }

    #[test]
    fn intro_screen() {
        let mut canvas = canvas();
        draw(&mut canvas, &View::Intro);

        assert_eq!(canvas.row_text(15).trim(), "Instructions Screen");
        assert_eq!(canvas.row_text(18).trim(), "Press any key to start the game");
        assert_eq!(canvas.cell(0, 0).unwrap().bg, DARK_SLATE_BLUE);
    }

    #[test]
    fn game_over_shows_score() {
        let mut canvas = canvas();
        draw(&mut canvas, &View::GameOver { score: 1010 });

        assert_eq!(canvas.row_text(15).trim(), "Game over!");
        assert_eq!(canvas.row_text(18).trim(), "Your score: 1010");
        assert_eq!(canvas.cell(79, 29).unwrap().bg, DARK_GOLDENROD);
    }

    #[test]
    fn game_hud_tracks_state() {
        let mut ctrl = ViewController::new(Settings::default(), false);
        ctrl.on_key_press(Key::Enter);
        ctrl.on_key_press(Key::Space);
        ctrl.update(crate::consts::SIM_DT);

        let mut canvas = canvas();
        draw(&mut canvas, ctrl.view());

        assert!(canvas.row_text(1).starts_with(" SCORE: 10 "));
        assert!(canvas.row_text(2).starts_with(" LIVES: 3 "));
        // Bottom row, away from the ship, is plain background
        assert_eq!(canvas.cell(0, 29).unwrap().bg, DARK_BLUE);
    }
}
