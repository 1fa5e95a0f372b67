//! Seedable randomness for spawns and mirror layout
//!
//! Everything random in a run flows through [`RandomSource`], so a seed
//! reproduces a game exactly and tests can script the draws.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of the game's random draws
pub trait RandomSource {
    /// Uniform float in `[low, high]`
    fn range_f32(&mut self, low: f32, high: f32) -> f32;

    /// True with probability `p`
    fn chance(&mut self, p: f32) -> bool;

    /// Whole number of degrees in `[low, high]`
    fn whole_degrees(&mut self, low: f32, high: f32) -> f32 {
        self.range_f32(low, high).round()
    }
}

/// The game's PCG-backed random source
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    rng: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SimRng {
    fn range_f32(&mut self, low: f32, high: f32) -> f32 {
        if high <= low {
            return low;
        }
        self.rng.random_range(low..=high)
    }

    fn chance(&mut self, p: f32) -> bool {
        self.rng.random::<f32>() < p
    }

    fn whole_degrees(&mut self, low: f32, high: f32) -> f32 {
        let lo = low.round() as i32;
        let hi = (high.round() as i32).max(lo);
        self.rng.random_range(lo..=hi) as f32
    }
}

/// Replays fixed draws, cycling when exhausted (for tests and demos)
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    /// Unit values in [0, 1]; each float draw maps one onto the requested range
    pub values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }

    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.5;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v.clamp(0.0, 1.0)
    }
}

impl RandomSource for ScriptedRng {
    fn range_f32(&mut self, low: f32, high: f32) -> f32 {
        low + (high - low) * self.next_unit()
    }

    fn chance(&mut self, p: f32) -> bool {
        self.next_unit() < p
    }
}
