//! Fixed angled mirrors and ray/mirror intersection
//!
//! A mirror is a finite segment starting at its anchor and running
//! `MIRROR_LENGTH` units along its angle. Intersections are solved from the
//! two line equations; parallel lines simply never hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Ray, is_closer_along_direction};
use super::rng::RandomSource;
use crate::consts::{MIRROR_ANCHORS, MIRROR_LENGTH, MIRROR_SLOTS};
use crate::{Settings, slope_from_degrees, unit_from_degrees};

/// Slack when deciding whether a hit lies on the mirror's extent
const EXTENT_EPSILON: f32 = 1e-4;
/// Slope differences below this are treated as parallel
const PARALLEL_EPSILON: f32 = 1e-6;

/// A fixed reflector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mirror {
    pub anchor: Vec2,
    /// Orientation in degrees from +x
    pub angle_deg: f32,
    pub length: f32,
}

impl Mirror {
    pub fn new(anchor: Vec2, angle_deg: f32) -> Self {
        Self {
            anchor,
            angle_deg,
            length: MIRROR_LENGTH,
        }
    }

    /// Far end of the segment
    pub fn end(&self) -> Vec2 {
        self.anchor + unit_from_degrees(self.angle_deg) * self.length
    }

    /// Where the ray's supporting line crosses this mirror's segment
    pub fn intersect(&self, ray: &Ray) -> Option<Vec2> {
        let mirror_slope = slope_from_degrees(self.angle_deg);
        let (x0, y0) = (ray.origin.x, ray.origin.y);
        let (mx, my) = (self.anchor.x, self.anchor.y);

        // Only hand-built rays carry an infinite slope; `tan` of an f32 angle is finite
        let point = if !ray.slope.is_finite() {
            Vec2::new(x0, mirror_slope * (x0 - mx) + my)
        } else {
            let denom = ray.slope - mirror_slope;
            if !denom.is_finite() || denom.abs() < PARALLEL_EPSILON {
                return None;
            }
            let x = (ray.slope * x0 - mirror_slope * mx - y0 + my) / denom;
            // Evaluate y on the shallower line; steep beams lose precision
            let y = if ray.slope.abs() <= mirror_slope.abs() {
                ray.y_at(x)
            } else {
                mirror_slope * (x - mx) + my
            };
            Vec2::new(x, y)
        };
        if !point.is_finite() {
            return None;
        }

        // Position along the mirror, 0 at the anchor
        let along = (point - self.anchor).dot(unit_from_degrees(self.angle_deg));
        if along < -EXTENT_EPSILON || along > self.length + EXTENT_EPSILON {
            return None;
        }
        Some(point)
    }
}

/// A ray striking a mirror
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MirrorHit {
    pub point: Vec2,
    pub index: usize,
}

/// The session's mirrors, fixed after game start
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MirrorRegistry {
    mirrors: Vec<Mirror>,
}

impl MirrorRegistry {
    /// Registry holding exactly these mirrors (at most `MIRROR_SLOTS`)
    pub fn from_mirrors(mut mirrors: Vec<Mirror>) -> Self {
        mirrors.truncate(MIRROR_SLOTS);
        Self { mirrors }
    }

    /// Fill the active slots with randomly angled mirrors
    pub fn generate(settings: &Settings, rng: &mut impl RandomSource) -> Self {
        let count = settings.mirror_count.clamp(1, MIRROR_SLOTS);
        let mirrors = MIRROR_ANCHORS[..count]
            .iter()
            .map(|&anchor| {
                let angle = rng.whole_degrees(settings.mirror_angle_min, settings.mirror_angle_max);
                Mirror::new(anchor, angle)
            })
            .collect::<Vec<_>>();

        for (i, m) in mirrors.iter().enumerate() {
            log::info!("Mirror {} at ({:.2}, {:.2}) angled {}°", i, m.anchor.x, m.anchor.y, m.angle_deg);
        }
        Self { mirrors }
    }

    pub fn len(&self) -> usize {
        self.mirrors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mirrors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Mirror> {
        self.mirrors.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mirror> {
        self.mirrors.iter()
    }

    /// Nearest mirror the ray strikes, skipping the `excluded` indices
    pub fn intersect_ray(&self, ray: &Ray, excluded: &[usize]) -> Option<MirrorHit> {
        let heading = ray.heading();
        let mut best: Option<MirrorHit> = None;

        for (index, mirror) in self.mirrors.iter().enumerate() {
            if excluded.contains(&index) {
                continue;
            }
            let Some(point) = mirror.intersect(ray) else {
                continue;
            };
            let current = best.map_or(Vec2::splat(f32::INFINITY), |b| b.point);
            if is_closer_along_direction(point, current, ray.origin, heading) {
                best = Some(MirrorHit { point, index });
            }
        }
        best
    }
}
