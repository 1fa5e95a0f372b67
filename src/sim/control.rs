//! Pointer grabbing and dragging
//!
//! A press picks one object by where it lands; while held, moving the pointer
//! drags that object. Everything dragged stays inside its clamps.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::blocks::BucketColor;
use super::state::GameState;
use crate::consts::*;

/// Below this horizontal distance from the pivot, aim snaps to straight up/down
const AIM_MIN_DX: f32 = 1e-4;

/// What the pointer is holding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grab {
    Bucket(BucketColor),
    /// Slide the cannon along the wall
    Cannon,
    /// Point the barrel at the pointer
    Aim,
}

/// Pointer state for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    /// Position in field coordinates
    pub pos: Vec2,
    pub pressed: bool,
}

/// Pick the object under a fresh press
pub fn find_object(state: &GameState, pos: Vec2) -> Grab {
    if pos.y < BUCKET_GRAB_HEIGHT {
        for color in BucketColor::ALL {
            if (pos.x - state.buckets.offset(color)).abs() < state.settings.bucket_tolerance {
                return Grab::Bucket(color);
            }
        }
    }
    if pos.x < CANNON_GRAB_X && (pos.y - state.cannon.shift).abs() <= CANNON_GRAB_TOLERANCE {
        return Grab::Cannon;
    }
    Grab::Aim
}

/// Barrel angle that points from the pivot at `shift` toward `pos`
pub fn aim_angle(shift: f32, pos: Vec2) -> f32 {
    let dx = pos.x - CANNON_X;
    let dy = pos.y - shift;
    if dx.abs() < AIM_MIN_DX {
        return if dy >= 0.0 { CANNON_ANGLE_LIMIT } else { -CANNON_ANGLE_LIMIT };
    }
    (dy / dx).atan().to_degrees()
}

/// Move the grabbed object to follow the pointer
pub fn drag_to(state: &mut GameState, grab: Grab, pos: Vec2) {
    match grab {
        Grab::Bucket(color) => state.buckets.set(color, pos.x),
        Grab::Cannon => state.cannon.set_shift(pos.y),
        Grab::Aim => {
            let angle = aim_angle(state.cannon.shift, pos);
            state.cannon.set_angle(angle);
        }
    }
}

/// Feed one tick of pointer state into the game
///
/// The press that starts a grab only selects; dragging starts next tick.
pub fn apply_pointer(state: &mut GameState, pointer: Option<PointerInput>) {
    match pointer {
        Some(PointerInput { pos, pressed: true }) => match state.grab {
            None => {
                let grab = find_object(state, pos);
                log::debug!("Pointer grabbed {:?} at ({:.2}, {:.2})", grab, pos.x, pos.y);
                state.grab = Some(grab);
            }
            Some(grab) => drag_to(state, grab, pos),
        },
        _ => state.grab = None,
    }
}
