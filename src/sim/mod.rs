//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by block ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod beam;
pub mod blocks;
pub mod control;
pub mod geometry;
pub mod mirror;
pub mod rng;
pub mod score;
pub mod state;
pub mod tick;

pub use beam::{BeamTrace, BeamTracer, StruckBlock};
pub use blocks::{BlockCategory, BlockHit, BlockRegistry, BucketColor, ExitOutcome, FallingBlock};
pub use control::{Grab, PointerInput};
pub use geometry::{BeamSegment, Ray, is_closer_along_direction, reflect_angle, segment_reaches_boundary};
pub use mirror::{Mirror, MirrorHit, MirrorRegistry};
pub use rng::{RandomSource, ScriptedRng, SimRng};
pub use state::{ActiveBeam, Buckets, Cannon, FinalReport, GameOverReason, GamePhase, GameState, Stats, Viewport};
pub use tick::{TickInput, tick};
