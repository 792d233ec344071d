//! Terminal session and keyboard events

use std::io::{self, Write};
use std::sync::mpsc;
use std::thread;

use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
};

use crate::input::{DEFAULT_HOLD_WINDOW, HoldTracker, Key};
use crate::view::ViewController;

/// Raw mode plus alternate screen for as long as the guard lives
pub struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // From here on Drop restores whatever was set up
        let mut guard = Self {
            keyboard_enhanced: false,
        };

        let mut out = io::stdout();
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;

        // Release events need the kitty keyboard protocol
        if matches!(terminal::supports_keyboard_enhancement(), Ok(true)) {
            guard.keyboard_enhanced = out
                .execute(PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
                ))
                .is_ok();
        }
        log::info!(
            "Terminal ready (key release events: {})",
            if guard.keyboard_enhanced { "yes" } else { "no" }
        );
        Ok(guard)
    }

    /// Whether the terminal reports key releases
    pub fn keyboard_enhanced(&self) -> bool {
        self.keyboard_enhanced
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        if self.keyboard_enhanced {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = out.flush();
    }
}

/// Read terminal events on a dedicated thread so the frame loop never blocks
pub fn spawn_event_reader() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    log::error!("Terminal event read failed: {}", err);
                    break;
                }
            }
        }
    });
    rx
}

pub fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Esc => Key::Escape,
        KeyCode::Enter => Key::Enter,
        KeyCode::Char(c) => Key::Char(c).normalized(),
        _ => Key::Other,
    }
}

/// Turns terminal key events into controller presses and releases.
///
/// With key release reporting, presses and releases pass straight through
/// and repeats are dropped. Classic terminals report auto-repeat as more
/// presses and never report releases: a press within the hold window of the
/// previous one is a repeat, and a key not refreshed within the window is
/// released at the end of the frame.
pub struct KeyRouter {
    holds: HoldTracker,
    keyboard_enhanced: bool,
}

impl KeyRouter {
    pub fn new(keyboard_enhanced: bool) -> Self {
        Self {
            holds: HoldTracker::new(DEFAULT_HOLD_WINDOW),
            keyboard_enhanced,
        }
    }

    /// Route one key event. Returns false when the player asked to quit.
    pub fn key_event(&mut self, ctrl: &mut ViewController, event: KeyEvent, frame: u64) -> bool {
        if event.code == KeyCode::Char('c')
            && event.modifiers.contains(KeyModifiers::CONTROL)
            && event.kind != KeyEventKind::Release
        {
            log::info!("Quit requested");
            return false;
        }

        let key = map_key(event.code);
        match event.kind {
            KeyEventKind::Press => {
                let fresh = self.holds.press(key, frame);
                if self.keyboard_enhanced || fresh {
                    ctrl.on_key_press(key);
                }
            }
            KeyEventKind::Repeat => {
                self.holds.press(key, frame);
            }
            KeyEventKind::Release => {
                if self.holds.release(key) {
                    ctrl.on_key_release(key);
                }
            }
        }
        true
    }

    /// Release keys the terminal stopped repeating
    pub fn end_frame(&mut self, ctrl: &mut ViewController, frame: u64) {
        if self.keyboard_enhanced {
            return;
        }
        for key in self.holds.expire(frame) {
            ctrl.on_key_release(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::Settings;
    use crate::view::View;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    fn repeat(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Repeat)
    }

    /// Frame loop without a terminal: events for a frame, then expiry and one tick
    fn frame(router: &mut KeyRouter, ctrl: &mut ViewController, n: u64, events: &[KeyEvent]) {
        for event in events {
            assert!(router.key_event(ctrl, *event, n));
        }
        router.end_frame(ctrl, n);
        ctrl.update(SIM_DT);
    }

    fn score(ctrl: &ViewController) -> u32 {
        match ctrl.view() {
            View::Game(game) => game.state.score,
            View::GameOver { score } => *score,
            View::Intro => 0,
        }
    }

    fn tap_space(enhanced: bool) -> u32 {
        let mut ctrl = ViewController::new(Settings::default(), false);
        let mut router = KeyRouter::new(enhanced);
        frame(&mut router, &mut ctrl, 0, &[press(KeyCode::Enter)]);
        for n in 1..=60 {
            let mut events = Vec::new();
            if n % 12 == 0 {
                events.push(press(KeyCode::Char(' ')));
                if enhanced {
                    events.push(release(KeyCode::Char(' ')));
                }
            }
            frame(&mut router, &mut ctrl, n, &events);
        }
        score(&ctrl)
    }

    #[test]
    fn every_tap_fires_on_classic_terminals() {
        assert_eq!(tap_space(false), 50);
    }

    #[test]
    fn every_tap_fires_with_release_events() {
        assert_eq!(tap_space(true), 50);
    }

    #[test]
    fn auto_repeat_is_not_a_tap() {
        let mut ctrl = ViewController::new(Settings::default(), false);
        let mut router = KeyRouter::new(false);
        frame(&mut router, &mut ctrl, 0, &[press(KeyCode::Enter)]);
        // Space held: the terminal repeats it every other frame
        for n in (10..40).step_by(2) {
            frame(&mut router, &mut ctrl, n, &[press(KeyCode::Char(' '))]);
            frame(&mut router, &mut ctrl, n + 1, &[]);
        }
        assert_eq!(score(&ctrl), 10);

        let mut ctrl = ViewController::new(Settings::default(), false);
        let mut router = KeyRouter::new(true);
        frame(&mut router, &mut ctrl, 0, &[press(KeyCode::Enter)]);
        frame(&mut router, &mut ctrl, 1, &[press(KeyCode::Char(' '))]);
        for n in 2..10 {
            frame(&mut router, &mut ctrl, n, &[repeat(KeyCode::Char(' '))]);
        }
        assert_eq!(score(&ctrl), 10);
    }

    #[test]
    fn tap_after_game_over_returns_to_intro() {
        for enhanced in [false, true] {
            let settings = Settings {
                win_score: 20,
                ..Settings::default()
            };
            let mut ctrl = ViewController::new(settings, false);
            let mut router = KeyRouter::new(enhanced);
            frame(&mut router, &mut ctrl, 0, &[press(KeyCode::Enter)]);
            frame(&mut router, &mut ctrl, 6, &[press(KeyCode::Char(' '))]);
            frame(&mut router, &mut ctrl, 12, &[press(KeyCode::Char(' '))]);
            assert!(matches!(ctrl.view(), View::GameOver { score: 20 }));

            frame(&mut router, &mut ctrl, 18, &[press(KeyCode::Char(' '))]);
            assert!(matches!(ctrl.view(), View::Intro));
        }
    }

    #[test]
    fn classic_terminal_releases_unrepeated_keys() {
        let mut ctrl = ViewController::new(Settings::default(), false);
        let mut router = KeyRouter::new(false);
        frame(&mut router, &mut ctrl, 0, &[press(KeyCode::Enter)]);
        frame(&mut router, &mut ctrl, 1, &[press(KeyCode::Right)]);
        let x = |ctrl: &ViewController| match ctrl.view() {
            View::Game(game) => game.state.player.pos.x,
            _ => panic!("expected Game"),
        };

        let mut last = x(&ctrl);
        for n in 2..=5 {
            frame(&mut router, &mut ctrl, n, &[]);
            assert!(x(&ctrl) > last);
            last = x(&ctrl);
        }
        // Window passed with no repeat
        frame(&mut router, &mut ctrl, 6, &[]);
        frame(&mut router, &mut ctrl, 7, &[]);
        assert_eq!(x(&ctrl), last);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut ctrl = ViewController::new(Settings::default(), false);
        let mut router = KeyRouter::new(false);
        let event = KeyEvent::new_with_kind(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        );
        assert!(!router.key_event(&mut ctrl, event, 0));
        assert!(router.key_event(&mut ctrl, press(KeyCode::Char('c')), 0));
    }

    #[test]
    fn maps_game_keys() {
        assert_eq!(map_key(KeyCode::Left), Key::Left);
        assert_eq!(map_key(KeyCode::Esc), Key::Escape);
        assert_eq!(map_key(KeyCode::Char(' ')), Key::Space);
        assert_eq!(map_key(KeyCode::Char('F')), Key::Char('f'));
        assert_eq!(map_key(KeyCode::F(5)), Key::Other);
        assert_eq!(map_key(KeyCode::Tab), Key::Other);
    }
}
