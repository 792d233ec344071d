//! Screen controller
//!
//! Exactly one view is active at a time. Intro and GameOver advance on any
//! key; Game ends on Escape or when the score threshold is reached.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::input::{InputState, Key, PadEvent};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, tick};

/// A running game plus the input gathered for its next tick
#[derive(Debug, Clone)]
pub struct GameView {
    pub state: GameState,
    pub input: InputState,
}

impl GameView {
    fn new(settings: &Settings, joystick_connected: bool) -> Self {
        Self {
            state: GameState::new(settings),
            input: InputState::new(settings.fire_key, joystick_connected),
        }
    }
}

/// The active screen
#[derive(Debug, Clone)]
pub enum View {
    Intro,
    Game(Box<GameView>),
    GameOver { score: u32 },
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Intro => "Intro",
            View::Game(_) => "Game",
            View::GameOver { .. } => "GameOver",
        }
    }
}

/// Holds the active view and swaps it on triggers
#[derive(Debug)]
pub struct ViewController {
    settings: Settings,
    view: View,
    joystick_connected: bool,
    /// Unsimulated time carried between frames
    accumulator: f32,
}

impl ViewController {
    pub fn new(settings: Settings, joystick_connected: bool) -> Self {
        Self {
            settings,
            view: View::Intro,
            joystick_connected,
            accumulator: 0.0,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn on_key_press(&mut self, key: Key) {
        match &mut self.view {
            View::Intro => self.start_game(),
            View::Game(game) => {
                if key == Key::Escape {
                    let score = game.state.score;
                    self.game_over(score);
                } else {
                    game.input.key_press(key);
                }
            }
            View::GameOver { .. } => self.show_intro(),
        }
    }

    pub fn on_key_release(&mut self, key: Key) {
        if let View::Game(game) = &mut self.view {
            game.input.key_release(key);
        }
    }

    /// Gamepad buttons act as "any key" outside of a game
    pub fn on_pad_event(&mut self, event: PadEvent) {
        match &mut self.view {
            View::Game(game) => game.input.pad_event(event),
            View::Intro => {
                if matches!(event, PadEvent::ButtonPressed(_)) {
                    self.start_game();
                }
            }
            View::GameOver { .. } => {
                if matches!(event, PadEvent::ButtonPressed(_)) {
                    self.show_intro();
                }
            }
        }
    }

    pub fn set_joystick_connected(&mut self, connected: bool) {
        if connected != self.joystick_connected {
            log::info!(
                "Joystick {}",
                if connected { "connected" } else { "disconnected" }
            );
        }
        self.joystick_connected = connected;
        if let View::Game(game) = &mut self.view {
            game.input.set_joystick_connected(connected);
        }
    }

    /// Run fixed-size simulation ticks covering `frame_dt` seconds.
    /// Returns the number of ticks run.
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        let View::Game(game) = &mut self.view else {
            return 0;
        };

        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = game.input.snapshot();
            tick(&mut game.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            game.input.consume_one_shots();

            for event in game.state.drain_events() {
                match event {
                    GameEvent::BalloonPopped { row } => log::debug!("Popped balloon in row {}", row),
                    GameEvent::ScoreThresholdReached { score } => {
                        log::info!("Score threshold reached with {} points", score)
                    }
                    GameEvent::ShotFired { .. } | GameEvent::ShotExpired => {}
                }
            }

            if game.state.finished {
                break;
            }
        }

        if game.state.finished {
            let score = game.state.score;
            self.game_over(score);
        }
        substeps
    }

    fn start_game(&mut self) {
        self.accumulator = 0.0;
        self.switch_to(View::Game(Box::new(GameView::new(
            &self.settings,
            self.joystick_connected,
        ))));
    }

    fn game_over(&mut self, score: u32) {
        log::info!("Game over with score {}", score);
        self.switch_to(View::GameOver { score });
    }

    fn show_intro(&mut self) {
        self.switch_to(View::Intro);
    }

    fn switch_to(&mut self, view: View) {
        log::info!("View: {} -> {}", self.view.name(), view.name());
        self.view = view;
    }
}
