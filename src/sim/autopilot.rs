//! Demo player
//!
//! Fills in a `TickInput` the way a player would: the pointer aims the
//! barrel at the lowest black block, the cannon fires when the beam would
//! connect, and the buckets chase blocks of their own colour while dodging
//! black ones on their way down.

use std::cmp::Ordering;

use super::blocks::{BucketColor, FallingBlock};
use super::control::{Grab, PointerInput};
use super::geometry::Ray;
use super::state::GameState;
use super::tick::TickInput;

/// Black blocks below this height make buckets step aside
const DODGE_HEIGHT: f32 = 0.0;
/// Extra clearance kept from a black block when dodging
const DODGE_MARGIN: f32 = 0.15;
/// Buckets stop chasing inside this distance
const BUCKET_DEADBAND: f32 = 0.02;

fn lowest<'a>(blocks: impl Iterator<Item = &'a FallingBlock>) -> Option<&'a FallingBlock> {
    blocks.min_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(Ordering::Equal))
}

/// Overwrite `input` with the autopilot's choices for this tick
pub fn steer(state: &GameState, input: &mut TickInput) {
    let target = lowest(state.blocks.iter().filter(|b| b.category.is_black()));

    match (target, state.grab) {
        // Holding something other than the aim: let go for a tick
        (_, Some(grab)) if grab != Grab::Aim => input.pointer = None,
        (Some(block), _) => {
            input.pointer = Some(PointerInput {
                pos: block.pos,
                pressed: true,
            });
        }
        (None, _) => input.pointer = None,
    }

    input.fire = match target {
        Some(block) if state.grab == Some(Grab::Aim) && state.charge_level() >= 1.0 => {
            let ray = Ray::from_angle(state.cannon.muzzle(), state.cannon.angle_deg);
            let y = ray.y_at(block.pos.x);
            y.is_finite() && (y - block.pos.y).abs() < state.settings.block_hit_tolerance * 0.5
        }
        _ => false,
    };

    let dodge_limit = state.settings.bucket_tolerance + DODGE_MARGIN;
    for color in BucketColor::ALL {
        let current = state.buckets.offset(color);
        let mut desired = lowest(state.blocks.iter().filter(|b| b.category.bucket() == Some(color)))
            .map_or(current, |b| b.pos.x);

        let threat = state
            .blocks
            .iter()
            .filter(|b| b.category.is_black() && b.pos.y < DODGE_HEIGHT)
            .find(|b| (b.pos.x - current).abs() < dodge_limit);
        if let Some(black) = threat {
            desired = if current >= black.pos.x {
                black.pos.x + dodge_limit
            } else {
                black.pos.x - dodge_limit
            };
        }

        let diff = desired - current;
        input.bucket_move[color.index()] = if diff.abs() <= BUCKET_DEADBAND { 0 } else { diff.signum() as i8 };
    }
}
