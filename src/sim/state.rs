//! Game state and core simulation types
//!
//! One `GameState` owns everything a run needs; subsystems receive it (or the
//! parts they need) by reference.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::beam::{BeamTrace, BeamTracer};
use super::blocks::{BlockRegistry, BucketColor, ExitOutcome};
use super::control::Grab;
use super::geometry::BeamSegment;
use super::mirror::MirrorRegistry;
use super::rng::SimRng;
use crate::consts::*;
use crate::{Settings, clamp_to_range, direction_from_degrees, unit_from_degrees};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Run ended; nothing advances any more
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    /// A black block reached a bucket
    ForbiddenLanding,
    /// The player quit
    Quit,
}

/// The laser cannon on the left wall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cannon {
    /// Vertical position of the pivot
    pub shift: f32,
    /// Barrel angle in degrees, 0 = pointing right
    pub angle_deg: f32,
}

impl Default for Cannon {
    fn default() -> Self {
        Self {
            shift: 0.0,
            angle_deg: 0.0,
        }
    }
}

impl Cannon {
    pub fn pivot(&self) -> Vec2 {
        Vec2::new(CANNON_X, self.shift)
    }

    /// Where a fired beam starts
    pub fn muzzle(&self) -> Vec2 {
        self.pivot() + unit_from_degrees(self.angle_deg) * CANNON_BARREL_LENGTH
    }

    pub fn set_angle(&mut self, angle_deg: f32) {
        self.angle_deg = clamp_to_range(angle_deg, -CANNON_ANGLE_LIMIT, CANNON_ANGLE_LIMIT);
    }

    pub fn set_shift(&mut self, shift: f32) {
        self.shift = clamp_to_range(shift, CANNON_SHIFT_MIN, CANNON_SHIFT_MAX);
    }

    /// Apply a held rotate input (-1, 0, 1) for `dt` seconds
    pub fn rotate(&mut self, held: i8, dt: f32) {
        if held != 0 {
            self.set_angle(self.angle_deg + held.signum() as f32 * CANNON_ROT_SPEED * dt);
        }
    }

    /// Apply a held shift input (-1, 0, 1) for `dt` seconds
    pub fn slide(&mut self, held: i8, dt: f32) {
        if held != 0 {
            self.set_shift(self.shift + held.signum() as f32 * CANNON_SHIFT_SPEED * dt);
        }
    }
}

/// Horizontal positions of the red and green buckets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Buckets {
    pub offsets: [f32; 2],
}

impl Default for Buckets {
    fn default() -> Self {
        Self {
            offsets: BUCKET_START_OFFSETS,
        }
    }
}

impl Buckets {
    pub fn offset(&self, color: BucketColor) -> f32 {
        self.offsets[color.index()]
    }

    pub fn set(&mut self, color: BucketColor, x: f32) {
        self.offsets[color.index()] = clamp_to_range(x, BUCKET_MIN, BUCKET_MAX);
    }

    /// Apply a held move input (-1, 0, 1) for `dt` seconds
    pub fn slide(&mut self, color: BucketColor, held: i8, dt: f32) {
        if held != 0 {
            self.set(color, self.offset(color) + held.signum() as f32 * BUCKET_SPEED * dt);
        }
    }
}

/// Visible window into the field, for the renderer's projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Half-extent of the visible square
    pub zoom: f32,
    pub pan: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: ZOOM_MAX,
            pan: Vec2::ZERO,
        }
    }
}

impl Viewport {
    /// Positive steps widen the view, negative steps zoom in
    pub fn zoom_by(&mut self, steps: i8) {
        if steps == 0 {
            return;
        }
        self.zoom = clamp_to_range(self.zoom + steps as f32 * ZOOM_STEP, ZOOM_MIN, ZOOM_MAX);
        let room = FIELD_HALF_EXTENT - self.zoom;
        self.pan = Vec2::new(
            clamp_to_range(self.pan.x, -room, room),
            clamp_to_range(self.pan.y, -room, room),
        );
    }

    /// Pan one step per axis; a step that would show past the field is dropped
    pub fn pan_by(&mut self, x: i8, y: i8) {
        let room = FIELD_HALF_EXTENT - self.zoom + 1e-4;
        let next_x = self.pan.x + x.signum() as f32 * PAN_STEP;
        if next_x.abs() <= room {
            self.pan.x = next_x;
        }
        let next_y = self.pan.y + y.signum() as f32 * PAN_STEP;
        if next_y.abs() <= room {
            self.pan.y = next_y;
        }
    }

    /// (min, max) corners of the visible area
    pub fn bounds(&self) -> (Vec2, Vec2) {
        (self.pan - Vec2::splat(self.zoom), self.pan + Vec2::splat(self.zoom))
    }
}

/// Running tallies for the final report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub black_hits: u32,
    pub wrong_hits: u32,
    /// Catches per bucket, indexed by `BucketColor::index`
    pub collected: [u32; 2],
}

/// A fired beam still on screen
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveBeam {
    pub segments: Vec<BeamSegment>,
    /// Seconds since it was fired
    pub age: f32,
}

/// Read-only summary printed when a run ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalReport {
    pub score: i64,
    pub red_collected: u32,
    pub green_collected: u32,
    pub black_hits: u32,
    pub wrong_hits: u32,
    pub seconds: f64,
    pub seed: u64,
    pub reason: Option<GameOverReason>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub rng: SimRng,
    pub phase: GamePhase,
    pub game_over_reason: Option<GameOverReason>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulated seconds since start
    pub elapsed_secs: f64,
    pub score: i64,
    pub stats: Stats,
    /// Current fall per tick
    pub fall_rate: f32,
    pub cannon: Cannon,
    pub buckets: Buckets,
    pub viewport: Viewport,
    pub mirrors: MirrorRegistry,
    pub blocks: BlockRegistry,
    pub beam: Option<ActiveBeam>,
    /// When the cannon last fired
    pub last_shot_secs: f64,
    /// Seconds since the last spawn
    pub spawn_timer: f32,
    /// Object held by the pointer, if any
    pub grab: Option<Grab>,
}

impl GameState {
    /// New game with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, Settings::default())
    }

    /// New game; settings are clamped into range first
    pub fn with_settings(seed: u64, settings: Settings) -> Self {
        let settings = settings.sanitized();
        let mut rng = SimRng::new(seed);
        let mirrors = MirrorRegistry::generate(&settings, &mut rng);
        log::info!("New game: seed {}, {} mirror(s), fall rate {}", seed, mirrors.len(), settings.fall_rate);

        Self {
            fall_rate: settings.fall_rate,
            settings,
            rng,
            phase: GamePhase::Playing,
            game_over_reason: None,
            time_ticks: 0,
            elapsed_secs: 0.0,
            score: 0,
            stats: Stats::default(),
            cannon: Cannon::default(),
            buckets: Buckets::default(),
            viewport: Viewport::default(),
            mirrors,
            blocks: BlockRegistry::new(),
            beam: None,
            last_shot_secs: 0.0,
            spawn_timer: 0.0,
            grab: None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Charge of the cannon in [0, 1]; 1 means ready to fire
    pub fn charge_level(&self) -> f32 {
        let since = (self.elapsed_secs - self.last_shot_secs).max(0.0) as f32;
        (since / self.settings.charge_seconds).min(1.0)
    }

    /// Fire the cannon if it is fully charged
    ///
    /// Returns `None` (and changes nothing) while charging or after game over.
    pub fn fire(&mut self) -> Option<BeamTrace> {
        if self.is_over() || self.charge_level() < 1.0 {
            return None;
        }

        let tracer = BeamTracer::new(
            &self.mirrors,
            self.settings.mirror_exclusion,
            self.settings.block_hit_tolerance,
            self.fall_rate,
        );
        let angle = self.cannon.angle_deg;
        let trace = tracer.fire(&mut self.blocks, self.cannon.muzzle(), angle, direction_from_degrees(angle));

        self.score += trace.score_delta;
        if let Some(struck) = trace.struck {
            if struck.category.is_black() {
                self.stats.black_hits += 1;
            } else {
                self.stats.wrong_hits += 1;
            }
        }
        self.last_shot_secs = self.elapsed_secs;
        self.beam = Some(ActiveBeam {
            segments: trace.segments.clone(),
            age: 0.0,
        });
        Some(trace)
    }

    /// Set the fall rate, clamped to the configured bounds
    pub fn set_fall_rate(&mut self, rate: f32) {
        let clamped = clamp_to_range(rate, self.settings.fall_rate_min, self.settings.fall_rate_max);
        if clamped != self.fall_rate {
            log::info!("Fall rate {} -> {}", self.fall_rate, clamped);
        }
        self.fall_rate = clamped;
    }

    /// Step the fall rate up (positive) or down (negative)
    pub fn adjust_fall_rate(&mut self, steps: i32) {
        self.set_fall_rate(self.fall_rate + steps as f32 * self.settings.fall_rate_step);
    }

    /// Seconds between block spawns at the current fall rate
    pub fn spawn_period(&self) -> f32 {
        SPAWN_PERIOD_FACTOR / self.fall_rate
    }

    /// Spawn a randomly drawn block at the top of the field
    pub fn spawn_block(&mut self) -> u32 {
        self.blocks.spawn_random(self.settings.black_chance, &mut self.rng)
    }

    /// Fold the floor outcome of one tick into score and stats
    pub fn apply_exits(&mut self, outcome: &ExitOutcome) {
        self.score += outcome.score_delta;
        for (total, caught) in self.stats.collected.iter_mut().zip(outcome.caught) {
            *total += caught;
        }
        if outcome.forbidden_landing {
            self.end_game(GameOverReason::ForbiddenLanding);
        }
    }

    /// Terminal transition; the first reason sticks
    pub fn end_game(&mut self, reason: GameOverReason) {
        if self.is_over() {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.game_over_reason = Some(reason);
        log::info!("Game over ({:?}) after {:.1}s, score {}", reason, self.elapsed_secs, self.score);
    }

    pub fn report(&self) -> FinalReport {
        FinalReport {
            score: self.score,
            red_collected: self.stats.collected[BucketColor::Red.index()],
            green_collected: self.stats.collected[BucketColor::Green.index()],
            black_hits: self.stats.black_hits,
            wrong_hits: self.stats.wrong_hits,
            seconds: self.elapsed_secs,
            seed: self.rng.seed(),
            reason: self.game_over_reason,
        }
    }
}
