//! Game settings and balance tunables
//!
//! Loaded from an optional JSON file; missing fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MIRROR_SLOTS;

/// Which mirrors a beam may not reflect off on its next segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MirrorExclusion {
    /// Only the mirror just reflected off
    #[default]
    Previous,
    /// Every mirror already used by this shot
    Visited,
}

/// Gameplay tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Fall speed ===
    /// Initial fall per tick (field units per 10 ms)
    pub fall_rate: f32,
    pub fall_rate_min: f32,
    pub fall_rate_max: f32,
    /// Change per speed-up / slow-down press
    pub fall_rate_step: f32,

    // === Mirrors ===
    /// Active mirror slots (1..=5)
    pub mirror_count: usize,
    /// Random mirror angle range, whole degrees
    pub mirror_angle_min: f32,
    pub mirror_angle_max: f32,
    pub mirror_exclusion: MirrorExclusion,

    // === Blocks ===
    /// Probability a spawned block is a black target
    pub black_chance: f32,
    /// Vertical slack when testing a beam against a block
    pub block_hit_tolerance: f32,
    /// Half-width of a bucket's catch window
    pub bucket_tolerance: f32,

    // === Cannon ===
    /// Seconds from a shot until the cannon is fully charged
    pub charge_seconds: f32,
    /// Seconds a fired beam stays on screen
    pub beam_display_seconds: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fall_rate: 0.03,
            fall_rate_min: 0.01,
            fall_rate_max: 0.05,
            fall_rate_step: 0.005,

            mirror_count: 3,
            mirror_angle_min: 1.0,
            mirror_angle_max: 89.0,
            mirror_exclusion: MirrorExclusion::Previous,

            black_chance: 1.0 / 3.0,
            block_hit_tolerance: 0.2,
            bucket_tolerance: 0.5,

            charge_seconds: 1.0,
            beam_display_seconds: 0.25,
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings.sanitized()
                }
                Err(e) => {
                    log::warn!("Ignoring invalid settings file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp every field into a playable range
    pub fn sanitized(mut self) -> Self {
        let before = self.clone();
        let defaults = Self::default();

        if !(self.fall_rate_min > 0.0) {
            self.fall_rate_min = defaults.fall_rate_min;
        }
        if !(self.fall_rate_max >= self.fall_rate_min) {
            self.fall_rate_max = self.fall_rate_min.max(defaults.fall_rate_max);
        }
        self.fall_rate = crate::clamp_to_range(self.fall_rate, self.fall_rate_min, self.fall_rate_max);
        if !(self.fall_rate_step > 0.0) {
            self.fall_rate_step = defaults.fall_rate_step;
        }

        self.mirror_count = self.mirror_count.clamp(1, MIRROR_SLOTS);
        self.mirror_angle_min = crate::clamp_to_range(self.mirror_angle_min.round(), 1.0, 89.0);
        self.mirror_angle_max =
            crate::clamp_to_range(self.mirror_angle_max.round(), self.mirror_angle_min, 89.0);

        self.black_chance = crate::clamp_to_range(self.black_chance, 0.0, 1.0);
        if !(self.block_hit_tolerance > 0.0) {
            self.block_hit_tolerance = defaults.block_hit_tolerance;
        }
        if !(self.bucket_tolerance > 0.0) {
            self.bucket_tolerance = defaults.bucket_tolerance;
        }
        if !(self.charge_seconds > 0.0) {
            self.charge_seconds = defaults.charge_seconds;
        }
        if !(self.beam_display_seconds >= 0.0) {
            self.beam_display_seconds = defaults.beam_display_seconds;
        }

        if self != before {
            log::warn!("Some settings were out of range and have been clamped");
        }
        self
    }
}
