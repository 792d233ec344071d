//! Simulation tick
//!
//! One update pass of a running game: player, shots, physics world, balloon
//! wraparound, contacts and the score threshold.

use std::collections::HashSet;

use super::behavior::{move_player, player_velocity, shot_expired, wrap_balloon};
use super::physics::{BodyHandle, Contact};
use super::state::{CollisionKind, GameEvent, GameState};
use crate::consts::SCREEN_WIDTH;
use crate::input::TickInput;

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Nothing moves once the game has been won
    if state.finished {
        return;
    }
    let dt = dt.max(0.0);
    state.time_ticks += 1;

    // Player
    state.player.vel_x = player_velocity(input, state.settings.player_speed);
    move_player(&mut state.player, dt);

    for _ in 0..input.fire {
        state.fire_shot();
    }

    // Shots that left the screen last tick
    let expired: Vec<BodyHandle> = state
        .shots
        .iter()
        .filter(|s| shot_expired(s))
        .map(|s| s.body)
        .collect();
    for body in expired {
        state.remove_shot(body);
        state.push_event(GameEvent::ShotExpired);
    }

    // The physics world moves shots and balloons
    let contacts = state.physics.step(dt);
    state.sync_from_physics();

    for balloon in &mut state.balloons {
        if wrap_balloon(balloon, SCREEN_WIDTH) {
            state.physics.set_position(balloon.body, balloon.pos);
        }
    }

    if state.settings.pop_balloons_on_hit {
        handle_contacts(state, &contacts);
    }

    if state.score >= state.settings.win_score {
        state.finished = true;
        let score = state.score;
        state.push_event(GameEvent::ScoreThresholdReached { score });
    }
}

/// Pop balloons hit by shots; each body is consumed by at most one contact
fn handle_contacts(state: &mut GameState, contacts: &[Contact<CollisionKind>]) {
    let mut consumed: HashSet<BodyHandle> = HashSet::new();
    for contact in contacts {
        if contact.first_kind != CollisionKind::Balloon
            || contact.second_kind != CollisionKind::PlayerShot
        {
            continue;
        }
        if consumed.contains(&contact.first) || consumed.contains(&contact.second) {
            continue;
        }
        consumed.insert(contact.first);
        consumed.insert(contact.second);

        state.remove_shot(contact.second);
        if let Some(row) = state.remove_balloon(contact.first) {
            log::debug!("Balloon popped in row {}", row);
            state.push_event(GameEvent::BalloonPopped { row });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::Settings;
    use glam::Vec2;
    use proptest::prelude::*;

    fn fire(n: u32) -> TickInput {
        TickInput {
            fire: n,
            ..Default::default()
        }
    }

    /// Move a shot in both the entity list and the physics world
    fn place_shot(state: &mut GameState, index: usize, pos: Vec2) {
        let body = state.shots[index].body;
        state.shots[index].pos = pos;
        state.physics.set_position(body, pos);
    }

    #[test]
    fn fire_scores_regardless_of_hits() {
        let mut state = GameState::new(&Settings::default());
        tick(&mut state, &fire(3), SIM_DT);
        assert_eq!(state.score, 30);
        assert_eq!(state.shots.len(), 3);

        // Run until every shot has either hit a balloon or left the screen
        for _ in 0..240 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.shots.is_empty());
        assert_eq!(state.score, 30);
    }

    #[test]
    fn shot_above_screen_removed_next_update() {
        let mut state = GameState::new(&Settings::default());
        tick(&mut state, &fire(1), SIM_DT);
        place_shot(&mut state, 0, Vec2::new(400.0, 600.5));
        let body = state.shots[0].body;
        state.drain_events();

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.shots.is_empty());
        assert!(!state.physics.contains(body));
        assert_eq!(state.drain_events(), vec![GameEvent::ShotExpired]);
    }

    #[test]
    fn shots_travel_up_at_shot_speed() {
        let mut settings = Settings::default();
        settings.balloon_rows = 1;
        settings.balloons_per_row = 1;
        let mut state = GameState::new(&settings);
        state.player.pos.x = 400.0;

        tick(&mut state, &fire(1), SIM_DT);
        let y = state.shots[0].pos.y;
        assert!((y - (50.0 + 300.0 * SIM_DT)).abs() < 1e-3);
        assert_eq!(state.shots[0].pos.x, 400.0);
    }

    #[test]
    fn hit_pops_balloon_and_shot() {
        let mut state = GameState::new(&Settings::default());
        tick(&mut state, &fire(1), SIM_DT);
        let target = state.balloons[3].clone();
        place_shot(&mut state, 0, target.pos - Vec2::new(0.0, 4.0));
        state.drain_events();

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.shots.is_empty());
        assert!(!state.balloons.iter().any(|b| b.body == target.body));
        assert_eq!(state.balloons.len(), 35);
        assert_eq!(state.score, 10);
        assert_eq!(state.drain_events(), vec![GameEvent::BalloonPopped { row: 0 }]);
    }

    #[test]
    fn hits_ignored_when_popping_disabled() {
        let mut settings = Settings::default();
        settings.pop_balloons_on_hit = false;
        let mut state = GameState::new(&settings);
        tick(&mut state, &fire(1), SIM_DT);
        let target = state.balloons[3].clone();
        place_shot(&mut state, 0, target.pos - Vec2::new(0.0, 4.0));

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.shots.len(), 1);
        assert_eq!(state.balloons.len(), 36);
    }

    #[test]
    fn threshold_reached_exactly_once() {
        let mut settings = Settings::default();
        settings.win_score = 30;
        let mut state = GameState::new(&settings);

        tick(&mut state, &fire(2), SIM_DT);
        assert!(!state.finished);
        tick(&mut state, &fire(2), SIM_DT);
        assert!(state.finished);
        assert_eq!(state.score, 40);

        let reached: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::ScoreThresholdReached { .. }))
            .collect();
        assert_eq!(reached, vec![GameEvent::ScoreThresholdReached { score: 40 }]);

        // Finished games ignore further input
        let ticks = state.time_ticks;
        tick(&mut state, &fire(5), SIM_DT);
        assert_eq!(state.score, 40);
        assert_eq!(state.time_ticks, ticks);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn balloons_stay_in_wrap_range() {
        let mut state = GameState::new(&Settings::default());
        for _ in 0..600 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            for balloon in &state.balloons {
                assert!(balloon.pos.x >= -balloon.size);
                assert!(balloon.pos.x <= SCREEN_WIDTH + balloon.size);
                assert_eq!(state.physics.position(balloon.body), Some(balloon.pos));
            }
        }
    }

    #[test]
    fn determinism() {
        let mut a = GameState::new(&Settings::default());
        let mut b = GameState::new(&Settings::default());
        let inputs = [
            TickInput {
                left: true,
                ..Default::default()
            },
            fire(1),
            TickInput {
                joystick_x: Some(0.7),
                fire: 2,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for _ in 0..50 {
            for input in &inputs {
                tick(&mut a, input, SIM_DT);
                tick(&mut b, input, SIM_DT);
            }
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.shots.len(), b.shots.len());
        assert_eq!(a.balloons.len(), b.balloons.len());
        assert_eq!(a.player.pos, b.player.pos);
    }

    proptest! {
        #[test]
        fn player_in_bounds_after_any_tick(
            dt in 0.0f32..2.0,
            left: bool,
            right: bool,
            joystick in proptest::option::of(-3.0f32..3.0),
            start in 0.0f32..=800.0,
        ) {
            let mut state = GameState::new(&Settings::default());
            state.player.pos.x = start;
            let input = TickInput { left, right, joystick_x: joystick, fire: 0 };
            tick(&mut state, &input, dt);
            prop_assert!(state.player.pos.x >= state.player.min_x);
            prop_assert!(state.player.pos.x <= state.player.max_x);
        }
    }
}
