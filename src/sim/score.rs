//! Point values. Every award scales with the fall speed, so faster play pays more.

use super::blocks::BlockCategory;

/// Beam strikes a black target
pub const BLACK_HIT_POINTS: i64 = 20;
/// Beam strikes a red or green block
pub const WRONG_HIT_POINTS: i64 = -10;
/// Coloured block lands in its own bucket
pub const CATCH_POINTS: i64 = 10;
/// Multiplier applied together with the fall rate
pub const SCORE_SCALE: f32 = 100.0;

/// Points scaled by the current fall rate, rounded to whole score
#[inline]
pub fn scaled(points: i64, fall_rate: f32) -> i64 {
    (points as f32 * SCORE_SCALE * fall_rate).round() as i64
}

/// Score change when a beam destroys a block of `category`
pub fn beam_hit_delta(category: BlockCategory, fall_rate: f32) -> i64 {
    if category.is_black() {
        scaled(BLACK_HIT_POINTS, fall_rate)
    } else {
        scaled(WRONG_HIT_POINTS, fall_rate)
    }
}

/// Score change for a bucket catch
pub fn catch_delta(fall_rate: f32) -> i64 {
    scaled(CATCH_POINTS, fall_rate)
}
