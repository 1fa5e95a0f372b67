//! Mirror Shot - a laser arcade game on a square playfield
//!
//! Core modules:
//! - `sim`: Deterministic simulation (beam tracing, falling blocks, game state)
//! - `renderer`: Read-only scene snapshot and vertex generation for a renderer
//! - `settings`: Data-driven game balance

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{MirrorExclusion, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (100 Hz, blocks fall once per tick)
    pub const SIM_DT: f32 = 1.0 / 100.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield is the square [-FIELD_HALF_EXTENT, FIELD_HALF_EXTENT]²
    pub const FIELD_HALF_EXTENT: f32 = 4.0;

    /// Cannon pivot sits on the left wall
    pub const CANNON_X: f32 = -4.0;
    /// Beam leaves the barrel this far from the pivot
    pub const CANNON_BARREL_LENGTH: f32 = 0.5;
    pub const CANNON_SHIFT_MIN: f32 = -3.4;
    pub const CANNON_SHIFT_MAX: f32 = 4.0;
    /// Degrees either side of horizontal
    pub const CANNON_ANGLE_LIMIT: f32 = 90.0;
    /// Held rotation speed (degrees/s)
    pub const CANNON_ROT_SPEED: f32 = 12.0;
    /// Held vertical shift speed (units/s)
    pub const CANNON_SHIFT_SPEED: f32 = 1.2;

    /// Red bucket first, green second
    pub const BUCKET_START_OFFSETS: [f32; 2] = [-1.0, 1.0];
    pub const BUCKET_SPEED: f32 = 1.2;
    pub const BUCKET_MIN: f32 = -4.0;
    pub const BUCKET_MAX: f32 = 4.0;
    /// Pointer presses below this height may grab a bucket
    pub const BUCKET_GRAB_HEIGHT: f32 = -3.6;
    /// Pointer presses left of this may grab the cannon
    pub const CANNON_GRAB_X: f32 = -3.4;
    pub const CANNON_GRAB_TOLERANCE: f32 = 0.5;

    /// Blocks at or below this height are resolved against the buckets
    pub const FLOOR_Y: f32 = -3.4;
    pub const SPAWN_Y: f32 = 3.9;
    /// Spawn x is drawn from [-SPAWN_X_RANGE, SPAWN_X_RANGE]
    pub const SPAWN_X_RANGE: f32 = 3.5;
    /// Seconds between spawns is SPAWN_PERIOD_FACTOR / fall_rate
    pub const SPAWN_PERIOD_FACTOR: f32 = 0.02;
    pub const BLOCK_HALF_SIZE: f32 = 0.1;

    pub const MIRROR_LENGTH: f32 = 1.5;
    pub const MIRROR_SLOTS: usize = 5;
    /// Anchor points of the mirror slots; the first three are the classic layout
    pub const MIRROR_ANCHORS: [Vec2; MIRROR_SLOTS] = [
        Vec2::new(-2.0, 0.0),
        Vec2::new(2.5, -2.0),
        Vec2::new(-0.5, -3.0),
        Vec2::new(1.0, 1.5),
        Vec2::new(-1.5, 2.5),
    ];

    /// Viewport zoom (half-extent of the visible square)
    pub const ZOOM_MIN: f32 = 1.0;
    pub const ZOOM_MAX: f32 = 4.0;
    pub const ZOOM_STEP: f32 = 0.05;
    pub const PAN_STEP: f32 = 0.05;
}

/// Bound `value` to `[low, high]`. Total: NaN maps to `low`.
#[inline]
pub fn clamp_to_range(value: f32, low: f32, high: f32) -> f32 {
    if value > high {
        high
    } else if value >= low {
        value
    } else {
        low
    }
}

/// Slope of a line at `angle_deg` degrees from the +x axis
#[inline]
pub fn slope_from_degrees(angle_deg: f32) -> f32 {
    angle_deg.to_radians().tan()
}

/// Horizontal travel direction (+1 or -1) of a ray at `angle_deg`
#[inline]
pub fn direction_from_degrees(angle_deg: f32) -> f32 {
    if angle_deg.to_radians().cos() >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Unit vector pointing along `angle_deg`
#[inline]
pub fn unit_from_degrees(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}
