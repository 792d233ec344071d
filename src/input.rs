//! Input handling
//!
//! Key and gamepad events mutate an `InputState` between frames; the
//! simulation only ever sees the `TickInput` snapshot taken at tick time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Frames a key stays held without a fresh press/repeat (~67 ms at 60 FPS).
/// OS auto-repeat runs at 15 Hz or faster, so a held key refreshes in time.
pub const DEFAULT_HOLD_WINDOW: u64 = 4;

/// Logical keys, independent of the terminal backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Escape,
    Enter,
    Space,
    Char(char),
    Other,
}

impl Key {
    /// Letters compare case-insensitively; a literal space is `Space`
    pub fn normalized(self) -> Self {
        match self {
            Key::Char(' ') => Key::Space,
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            other => other,
        }
    }
}

/// Gamepad events, already reduced to what the game cares about
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PadEvent {
    ButtonPressed(u32),
    ButtonReleased(u32),
    /// Left stick horizontal axis, -1.0 (left) ..= 1.0 (right)
    AxisX(f32),
    /// D-pad / hat horizontal direction: -1, 0 or 1
    HatX(i8),
}

/// Current joystick deflection
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JoystickState {
    pub axis_x: f32,
    pub hat_x: i8,
}

impl JoystickState {
    /// Horizontal deflection in [-1, 1]; the hat wins over the stick while pressed
    pub fn x(&self) -> f32 {
        if self.hat_x != 0 {
            self.hat_x.signum() as f32
        } else if self.axis_x.is_finite() {
            self.axis_x.clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Move left held
    pub left: bool,
    /// Move right held
    pub right: bool,
    /// Joystick deflection; `Some` whenever a joystick is connected
    pub joystick_x: Option<f32>,
    /// Shots requested since the last tick
    pub fire: u32,
}

/// Accumulated input between ticks
#[derive(Debug, Clone)]
pub struct InputState {
    fire_key: Key,
    left: bool,
    right: bool,
    fire_requests: u32,
    joystick: Option<JoystickState>,
}

impl InputState {
    pub fn new(fire_key: Key, joystick_connected: bool) -> Self {
        Self {
            fire_key: fire_key.normalized(),
            left: false,
            right: false,
            fire_requests: 0,
            joystick: joystick_connected.then(JoystickState::default),
        }
    }

    pub fn key_press(&mut self, key: Key) {
        match key {
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            _ => {}
        }
        if key == self.fire_key {
            self.fire_requests += 1;
        }
    }

    pub fn key_release(&mut self, key: Key) {
        match key {
            Key::Left => self.left = false,
            Key::Right => self.right = false,
            _ => {}
        }
    }

    pub fn pad_event(&mut self, event: PadEvent) {
        let joystick = self.joystick.get_or_insert_with(JoystickState::default);
        match event {
            PadEvent::ButtonPressed(button) => {
                log::debug!("Button pressed: {}", button);
                self.fire_requests += 1;
            }
            PadEvent::ButtonReleased(button) => log::debug!("Button released: {}", button),
            PadEvent::AxisX(value) => joystick.axis_x = value,
            PadEvent::HatX(x) => joystick.hat_x = x,
        }
    }

    /// Mark whether a joystick is plugged in (keeps deflection while connected)
    pub fn set_joystick_connected(&mut self, connected: bool) {
        if !connected {
            self.joystick = None;
        } else if self.joystick.is_none() {
            self.joystick = Some(JoystickState::default());
        }
    }

    /// Snapshot for the next tick
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            joystick_x: self.joystick.map(|j| j.x()),
            fire: self.fire_requests,
        }
    }

    /// Clear one-shot inputs once a tick has processed them
    pub fn consume_one_shots(&mut self) {
        self.fire_requests = 0;
    }
}

/// Tracks held keys for terminals that never report key releases.
///
/// A key counts as held while presses or repeats keep arriving within
/// `window` frames of each other.
#[derive(Debug, Clone)]
pub struct HoldTracker {
    window: u64,
    last_seen: HashMap<Key, u64>,
}

impl HoldTracker {
    pub fn new(window: u64) -> Self {
        Self {
            window,
            last_seen: HashMap::new(),
        }
    }

    /// Record a press or repeat. Returns true unless the key was already
    /// seen within the window (an auto-repeat).
    pub fn press(&mut self, key: Key, frame: u64) -> bool {
        match self.last_seen.insert(key, frame) {
            Some(last) => frame.saturating_sub(last) > self.window,
            None => true,
        }
    }

    /// Record an explicit release. Returns true if the key was held.
    pub fn release(&mut self, key: Key) -> bool {
        self.last_seen.remove(&key).is_some()
    }

    /// Drop keys not refreshed within the window; returns them in key order
    pub fn expire(&mut self, frame: u64) -> Vec<Key> {
        let window = self.window;
        let mut expired: Vec<Key> = self
            .last_seen
            .iter()
            .filter(|(_, last)| frame.saturating_sub(**last) > window)
            .map(|(key, _)| *key)
            .collect();
        expired.sort();
        for key in &expired {
            self.last_seen.remove(key);
        }
        expired
    }
}
