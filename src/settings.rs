//! Game settings
//!
//! Loaded from an optional JSON file. Every field has a default, so a file
//! only needs to list what it overrides.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::input::Key;

/// Tunable game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Scale applied to the ship and laser images
    pub sprite_scale: f32,

    // === Player ===
    /// Lives at the start of a game
    pub player_lives: u32,
    /// Horizontal speed (units/sec) at full deflection
    pub player_speed: f32,
    /// Ship centre height above the bottom edge
    pub player_start_y: f32,
    /// Upward shot speed (units/sec)
    pub shot_speed: f32,
    /// Key that fires a shot
    pub fire_key: Key,

    // === Balloons ===
    pub balloons_per_row: usize,
    pub balloon_rows: usize,
    /// Horizontal balloon speed (units/sec)
    pub balloon_speed: f32,
    /// Balloon edge length
    pub balloon_size: f32,
    /// Remove balloon and shot when they touch
    pub pop_balloons_on_hit: bool,

    // === Scoring ===
    /// Points awarded for every shot fired
    pub score_per_shot: u32,
    /// Reaching this score ends the game
    pub win_score: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sprite_scale: 0.5,

            player_lives: 3,
            player_speed: 200.0,
            player_start_y: 50.0,
            shot_speed: 300.0,
            fire_key: Key::Space,

            balloons_per_row: 12,
            balloon_rows: 3,
            balloon_speed: 250.0,
            balloon_size: 20.0,
            pop_balloons_on_hit: true,

            score_per_shot: 10,
            win_score: 1000,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults for missing fields
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let mut settings: Settings = serde_json::from_str(&json)
            .with_context(|| format!("parsing settings in {}", path.display()))?;
        // Terminal keys arrive lowercased
        settings.fire_key = settings.fire_key.normalized();
        settings
            .validate()
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Reject settings the game cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.balloon_rows == 0 || self.balloons_per_row == 0 {
            bail!("balloon_rows and balloons_per_row must be at least 1");
        }
        if !(self.balloon_size > 0.0) {
            bail!("balloon_size must be positive, got {}", self.balloon_size);
        }
        if !(self.sprite_scale > 0.0) {
            bail!("sprite_scale must be positive, got {}", self.sprite_scale);
        }
        if self.fire_key == Key::Other {
            bail!("fire_key must name a key");
        }
        if self.win_score == 0 {
            bail!("win_score must be at least 1");
        }
        if self.player_speed < 0.0 || self.shot_speed < 0.0 || self.balloon_speed < 0.0 {
            bail!("speeds must not be negative");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.score_per_shot, 10);
        assert_eq!(settings.win_score, 1000);
        assert_eq!(settings.fire_key, Key::Space);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "win_score": 200, "fire_key": {{ "char": "f" }} }}"#).unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.win_score, 200);
        assert_eq!(settings.fire_key, Key::Char('f'));
        assert_eq!(settings.balloon_rows, 3);
        assert_eq!(settings.player_speed, 200.0);
    }

    #[test]
    fn uppercase_fire_key_matches_terminal_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "fire_key": {{ "char": "F" }} }}"#).unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.fire_key, Key::Char('f'));

        let mut input = crate::input::InputState::new(settings.fire_key, false);
        input.key_press(crate::platform::map_key(crossterm::event::KeyCode::Char('F')));
        assert_eq!(input.snapshot().fire, 1);
    }

    #[test]
    fn fire_key_must_be_a_real_key() {
        let settings = Settings {
            fire_key: Key::Other,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn invalid_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "balloon_rows": 0 }}"#).unwrap();
        let err = Settings::load(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("balloon_rows"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Settings::load(Path::new("/nonexistent/settings.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/settings.json"));
    }
}
