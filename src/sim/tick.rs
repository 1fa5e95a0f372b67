//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::autopilot;
use super::blocks::BucketColor;
use super::control::{self, PointerInput};
use super::state::{GameOverReason, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
///
/// Held directions are -1, 0 or 1; presses are one-shot.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Rotate the barrel (positive = counter-clockwise)
    pub cannon_rotate: i8,
    /// Slide the cannon along the wall
    pub cannon_shift: i8,
    /// Move each bucket, indexed by `BucketColor::index`
    pub bucket_move: [i8; 2],
    /// Fire the cannon (ignored while charging)
    pub fire: bool,
    /// Raise the fall speed one step
    pub faster: bool,
    /// Lower the fall speed one step
    pub slower: bool,
    /// Positive widens the view
    pub zoom: i8,
    pub pan_x: i8,
    pub pan_y: i8,
    /// Mouse/touch state
    pub pointer: Option<PointerInput>,
    /// End the run
    pub quit: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.is_over() {
        return;
    }

    let mut input = input.clone();
    if input.idle_mode {
        autopilot::steer(state, &mut input);
    }

    if input.quit {
        state.end_game(GameOverReason::Quit);
        return;
    }

    state.time_ticks += 1;
    state.elapsed_secs += dt as f64;

    if input.faster {
        state.adjust_fall_rate(1);
    }
    if input.slower {
        state.adjust_fall_rate(-1);
    }

    // Fire against where the blocks are at the start of the tick
    if input.fire {
        state.fire();
    }

    state.cannon.rotate(input.cannon_rotate, dt);
    state.cannon.slide(input.cannon_shift, dt);
    for color in BucketColor::ALL {
        state.buckets.slide(color, input.bucket_move[color.index()], dt);
    }
    state.viewport.zoom_by(input.zoom);
    state.viewport.pan_by(input.pan_x, input.pan_y);
    control::apply_pointer(state, input.pointer);

    // Fall rate is distance per SIM_DT
    state.blocks.advance_all(state.fall_rate * dt / SIM_DT);
    let outcome = state
        .blocks
        .resolve_exits(state.buckets.offsets, state.settings.bucket_tolerance, state.fall_rate);
    state.apply_exits(&outcome);
    if state.is_over() {
        return;
    }

    state.spawn_timer += dt;
    if state.spawn_timer >= state.spawn_period() {
        state.spawn_timer = 0.0;
        state.spawn_block();
    }

    if let Some(beam) = &mut state.beam {
        beam.age += dt;
    }
    let display = state.settings.beam_display_seconds;
    if state.beam.as_ref().is_some_and(|beam| beam.age >= display) {
        state.beam = None;
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::blocks::BlockCategory;
    use crate::sim::mirror::MirrorRegistry;
    use crate::sim::state::GamePhase;

    /// No mirrors, cannon charged
    fn open_field() -> GameState {
        let mut state = GameState::new(12345);
        state.mirrors = MirrorRegistry::default();
        state.elapsed_secs = 10.0;
        state
    }

    fn fire_input() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(42);
        let mut state2 = GameState::new(42);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        for _ in 0..1500 {
            tick(&mut state1, &input, SIM_DT);
            tick(&mut state2, &input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.stats, state2.stats);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.blocks.len(), state2.blocks.len());
        for (a, b) in state1.blocks.iter().zip(state2.blocks.iter()) {
            assert_eq!(a, b);
        }
        assert_eq!(state1.cannon, state2.cannon);
    }

    #[test]
    fn test_spawns_on_schedule() {
        let mut state = GameState::new(7);
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.blocks.is_empty());
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.blocks.len(), 1);
        let block = state.blocks.iter().next().unwrap();
        assert!(block.pos.y < SPAWN_Y);
        assert!(block.pos.x.abs() <= SPAWN_X_RANGE);
    }

    #[test]
    fn test_block_at_floor_can_still_be_shot() {
        let mut state = open_field();
        let y = FLOOR_Y + 0.01;
        state.cannon.set_shift(y);
        // Above the green bucket: landing would end the game
        state.blocks.insert_at(Vec2::new(1.0, y), BlockCategory::BlackA);

        tick(&mut state, &fire_input(), SIM_DT);
        assert_eq!(state.stats.black_hits, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 60);
    }

    #[test]
    fn test_forbidden_landing_ends_game() {
        let mut state = open_field();
        state.blocks.insert_at(Vec2::new(1.2, FLOOR_Y + 0.02), BlockCategory::BlackB);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.game_over_reason, Some(GameOverReason::ForbiddenLanding));

        // Nothing moves once the game is over
        let ticks = state.time_ticks;
        tick(&mut state, &fire_input(), SIM_DT);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.stats.black_hits, 0);
    }

    #[test]
    fn test_black_between_buckets_is_harmless() {
        let mut state = open_field();
        state.blocks.insert_at(Vec2::new(0.0, FLOOR_Y + 0.02), BlockCategory::BlackA);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.blocks.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_catch_scores() {
        let mut state = open_field();
        state.blocks.insert_at(Vec2::new(1.3, FLOOR_Y + 0.02), BlockCategory::Green);
        state.blocks.insert_at(Vec2::new(1.0, FLOOR_Y + 0.02), BlockCategory::Red);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.stats.collected, [0, 1]);
        assert_eq!(state.score, 30);
        assert!(state.blocks.is_empty());
    }

    #[test]
    fn test_held_fire_shoots_once() {
        let mut state = open_field();
        state.blocks.insert_at(Vec2::new(0.0, 2.0), BlockCategory::BlackA);
        state.blocks.insert_at(Vec2::new(2.0, 2.0), BlockCategory::BlackB);
        state.cannon.set_shift(2.0);

        // The second press lands while the cannon is recharging
        tick(&mut state, &fire_input(), SIM_DT);
        tick(&mut state, &fire_input(), SIM_DT);
        assert_eq!(state.stats.black_hits, 1);
        assert_eq!(state.blocks.len(), 1);
    }

    #[test]
    fn test_beam_stays_then_fades() {
        let mut state = open_field();
        tick(&mut state, &fire_input(), SIM_DT);
        assert!(state.beam.is_some());
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.beam.is_some());
        for _ in 0..20 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.beam.is_none());
    }

    #[test]
    fn test_fall_speed_keys() {
        let mut state = GameState::new(1);
        let faster = TickInput {
            faster: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &faster, SIM_DT);
        }
        assert_eq!(state.fall_rate, 0.05);

        let slower = TickInput {
            slower: true,
            ..Default::default()
        };
        tick(&mut state, &slower, SIM_DT);
        assert!((state.fall_rate - 0.045).abs() < 1e-6);
    }

    #[test]
    fn test_held_keys_move_cannon_and_buckets() {
        let mut state = GameState::new(1);
        let input = TickInput {
            cannon_rotate: 1,
            cannon_shift: -1,
            bucket_move: [-1, 1],
            ..Default::default()
        };
        for _ in 0..100 {
            tick(&mut state, &input, SIM_DT);
        }
        assert!((state.cannon.angle_deg - 12.0).abs() < 0.01);
        assert!((state.cannon.shift + 1.2).abs() < 0.01);
        assert!((state.buckets.offset(BucketColor::Red) + 2.2).abs() < 0.01);
        assert!((state.buckets.offset(BucketColor::Green) - 2.2).abs() < 0.01);
    }

    #[test]
    fn test_quit() {
        let mut state = GameState::new(1);
        let input = TickInput {
            quit: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!(state.is_over());
        assert_eq!(state.report().reason, Some(GameOverReason::Quit));
        assert_eq!(state.time_ticks, 0);
    }
}
