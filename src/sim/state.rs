//! Game state and core simulation types
//!
//! Everything a running game owns lives here: the player, the live shots and
//! balloons, the score and the physics world that moves shots and balloons.

use glam::Vec2;

use super::physics::{BodyDesc, BodyHandle, ContactResponse, PhysicsWorld};
use crate::consts::*;
use crate::row_direction;
use crate::settings::Settings;

/// Collision kinds registered with the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    Balloon,
    PlayerShot,
}

/// Things that happened during a tick, drained by the view layer
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ShotFired { pos: Vec2 },
    ShotExpired,
    BalloonPopped { row: usize },
    ScoreThresholdReached { score: u32 },
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    /// Horizontal velocity (units/sec)
    pub vel_x: f32,
    pub half_size: Vec2,
    pub min_x: f32,
    pub max_x: f32,
}

impl Player {
    pub fn left(&self) -> f32 {
        self.pos.x - self.half_size.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.half_size.x
    }
}

/// A shot fired by the player
#[derive(Debug, Clone)]
pub struct Shot {
    pub body: BodyHandle,
    pub pos: Vec2,
    pub half_size: Vec2,
    /// Removed once its y passes this
    pub max_y: f32,
}

/// A balloon target
#[derive(Debug, Clone)]
pub struct Balloon {
    pub body: BodyHandle,
    pub pos: Vec2,
    /// -1.0 (left) or 1.0 (right), from row parity
    pub direction: f32,
    pub row: usize,
    /// Edge length of the balloon square
    pub size: f32,
}

/// Complete state of one game
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub player: Player,
    /// Live shots in firing order
    pub shots: Vec<Shot>,
    /// Live balloons, row by row
    pub balloons: Vec<Balloon>,
    pub score: u32,
    /// Shown on the HUD; nothing takes lives away
    pub lives: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Set once the score threshold is reached; no further ticks run
    pub finished: bool,
    pub physics: PhysicsWorld<CollisionKind>,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh game: score 0, lives reset, balloons in their starting rows
    pub fn new(settings: &Settings) -> Self {
        let scale = settings.sprite_scale;
        let player = Player {
            pos: Vec2::new(SCREEN_WIDTH / 2.0, settings.player_start_y),
            vel_x: 0.0,
            half_size: Vec2::new(SHIP_IMAGE_SIZE.0, SHIP_IMAGE_SIZE.1) * scale / 2.0,
            min_x: 0.0,
            max_x: SCREEN_WIDTH,
        };

        let mut physics = PhysicsWorld::new(Vec2::ZERO);
        physics.add_collision_handler(
            CollisionKind::Balloon,
            CollisionKind::PlayerShot,
            ContactResponse::Sensor,
        );

        let mut state = Self {
            settings: settings.clone(),
            player,
            shots: Vec::new(),
            balloons: Vec::new(),
            score: 0,
            lives: settings.player_lives,
            time_ticks: 0,
            finished: false,
            physics,
            events: Vec::new(),
        };
        state.spawn_balloons();
        state
    }

    fn spawn_balloons(&mut self) {
        let size = self.settings.balloon_size;
        let per_row = self.settings.balloons_per_row;
        let spacing = (SCREEN_WIDTH + size * 2.0) / per_row as f32;

        for row in 0..self.settings.balloon_rows {
            let direction = row_direction(row);
            let y = BALLOON_TOP_Y - BALLOON_ROW_SPACING * row as f32;
            for i in 0..per_row {
                let pos = Vec2::new(spacing * i as f32, y);
                let body = self.physics.add_body(BodyDesc {
                    position: pos,
                    radius: size / 2.0,
                    mass: BALLOON_MASS,
                    kind: CollisionKind::Balloon,
                });
                let speed = self.settings.balloon_speed;
                self.physics
                    .set_velocity(body, Vec2::new(direction * speed, 0.0));
                self.balloons.push(Balloon {
                    body,
                    pos,
                    direction,
                    row,
                    size,
                });
            }
        }
    }

    /// Spawn a shot at the player and award the per-shot score
    pub fn fire_shot(&mut self) {
        let scale = self.settings.sprite_scale;
        let half_size = Vec2::new(LASER_IMAGE_SIZE.0, LASER_IMAGE_SIZE.1) * scale / 2.0;
        let pos = self.player.pos;
        let vel = Vec2::new(0.0, self.settings.shot_speed);

        let body = self.physics.add_body(BodyDesc {
            position: pos,
            radius: half_size.x,
            mass: SHOT_MASS,
            kind: CollisionKind::PlayerShot,
        });
        self.physics.set_velocity(body, vel);

        self.shots.push(Shot {
            body,
            pos,
            half_size,
            max_y: SCREEN_HEIGHT,
        });
        self.score = self.score.saturating_add(self.settings.score_per_shot);
        self.events.push(GameEvent::ShotFired { pos });
    }

    /// Remove a shot from the active list and the physics world
    pub fn remove_shot(&mut self, body: BodyHandle) -> bool {
        let before = self.shots.len();
        self.shots.retain(|s| s.body != body);
        self.physics.remove_body(body);
        self.shots.len() != before
    }

    /// Remove a balloon; returns its row if it was still alive
    pub fn remove_balloon(&mut self, body: BodyHandle) -> Option<usize> {
        let index = self.balloons.iter().position(|b| b.body == body)?;
        let balloon = self.balloons.remove(index);
        self.physics.remove_body(body);
        Some(balloon.row)
    }

    /// Copy positions back from the physics world
    pub fn sync_from_physics(&mut self) {
        for shot in &mut self.shots {
            if let Some(pos) = self.physics.position(shot.body) {
                shot.pos = pos;
            }
        }
        for balloon in &mut self.balloons {
            if let Some(pos) = self.physics.position(balloon.body) {
                balloon.pos = pos;
            }
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
