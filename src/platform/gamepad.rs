//! Joystick discovery and events
//!
//! Real devices are read through gilrs when the `gamepad` feature is on.
//! Without it, or with nothing plugged in, the game runs on the keyboard.

use crate::input::PadEvent;

#[cfg(feature = "gamepad")]
use gilrs::{Axis, Button, EventType, Gilrs};

pub struct Gamepads {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,
}

impl Gamepads {
    #[cfg(feature = "gamepad")]
    pub fn open() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => Some(gilrs),
            Err(err) => {
                log::warn!("Gamepad backend unavailable: {}", err);
                None
            }
        };
        let pads = Self { gilrs };
        pads.log_discovery();
        pads
    }

    #[cfg(not(feature = "gamepad"))]
    pub fn open() -> Self {
        let pads = Self {};
        pads.log_discovery();
        pads
    }

    fn log_discovery(&self) {
        match self.count() {
            0 => log::info!("No joysticks found"),
            n => log::info!("Found {} joystick(s)", n),
        }
    }

    /// Number of connected joysticks
    #[cfg(feature = "gamepad")]
    pub fn count(&self) -> usize {
        self.gilrs
            .as_ref()
            .map_or(0, |gilrs| gilrs.gamepads().count())
    }

    #[cfg(not(feature = "gamepad"))]
    pub fn count(&self) -> usize {
        0
    }

    pub fn connected(&self) -> bool {
        self.count() > 0
    }

    /// Drain pending device events
    #[cfg(feature = "gamepad")]
    pub fn poll(&mut self) -> Vec<PadEvent> {
        let Some(gilrs) = self.gilrs.as_mut() else {
            return Vec::new();
        };
        let mut events = Vec::new();
        while let Some(ev) = gilrs.next_event() {
            if let Some(pad) = map_event(ev.event) {
                events.push(pad);
            }
        }
        events
    }

    #[cfg(not(feature = "gamepad"))]
    pub fn poll(&mut self) -> Vec<PadEvent> {
        Vec::new()
    }
}

/// Reduce a gilrs event to what the game uses; the d-pad drives the hat
#[cfg(feature = "gamepad")]
fn map_event(event: EventType) -> Option<PadEvent> {
    match event {
        EventType::ButtonPressed(Button::DPadLeft, _) => Some(PadEvent::HatX(-1)),
        EventType::ButtonPressed(Button::DPadRight, _) => Some(PadEvent::HatX(1)),
        EventType::ButtonReleased(Button::DPadLeft | Button::DPadRight, _) => {
            Some(PadEvent::HatX(0))
        }
        EventType::ButtonPressed(_, code) => Some(PadEvent::ButtonPressed(code.into_u32())),
        EventType::ButtonReleased(_, code) => Some(PadEvent::ButtonReleased(code.into_u32())),
        EventType::AxisChanged(Axis::LeftStickX, value, _) => Some(PadEvent::AxisX(value)),
        EventType::AxisChanged(Axis::DPadX, value, _) => {
            Some(PadEvent::HatX(value.round().clamp(-1.0, 1.0) as i8))
        }
        EventType::Connected => {
            log::info!("Joystick connected");
            None
        }
        EventType::Disconnected => {
            log::info!("Joystick disconnected");
            None
        }
        _ => None,
    }
}
