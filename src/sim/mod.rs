//! Simulation module
//!
//! All gameplay logic lives here, free of rendering and platform code:
//! - `tick` advances a game by one timestep from an input snapshot
//! - `physics` moves shots and balloons and reports their contacts
//! - `behavior` holds the per-entity update rules

pub mod behavior;
pub mod collision;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, circle_circle_collision, sd_circle};
pub use physics::{BodyDesc, BodyHandle, Contact, ContactResponse, PhysicsWorld};
pub use state::{Balloon, CollisionKind, GameEvent, GameState, Player, Shot};
pub use tick::tick;
