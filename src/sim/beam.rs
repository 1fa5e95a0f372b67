//! Beam tracing through mirrors to blocks or the field edge
//!
//! Each leg of the beam runs from its origin to the nearest of: a block on
//! its path, a mirror, or the playfield wall. A block ends the whole shot;
//! a mirror bends the beam by the angle-doubling law and starts a new leg.

use glam::Vec2;

use super::blocks::{BlockCategory, BlockRegistry};
use super::geometry::{BeamSegment, Ray, reflect_angle, segment_reaches_boundary};
use super::mirror::MirrorRegistry;
use super::score;
use crate::consts::FIELD_HALF_EXTENT;
use crate::{MirrorExclusion, direction_from_degrees};

/// Block destroyed by a shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StruckBlock {
    pub id: u32,
    pub category: BlockCategory,
    pub point: Vec2,
}

/// Full result of one shot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeamTrace {
    /// Ordered legs of the beam, at least one
    pub segments: Vec<BeamSegment>,
    /// The block the beam ended on, already removed from the registry
    pub struck: Option<StruckBlock>,
    pub score_delta: i64,
    /// Mirrors reflected off, in order
    pub reflections: Vec<usize>,
}

impl BeamTrace {
    /// Where the beam finally stopped
    pub fn end_point(&self) -> Option<Vec2> {
        self.segments.last().map(|s| s.end)
    }
}

/// Traces shots against a fixed mirror layout
#[derive(Debug, Clone, Copy)]
pub struct BeamTracer<'a> {
    pub mirrors: &'a MirrorRegistry,
    pub exclusion: MirrorExclusion,
    /// Vertical slack when testing the beam against blocks
    pub block_tolerance: f32,
    /// Current fall rate, which scales hit scores
    pub fall_rate: f32,
}

impl<'a> BeamTracer<'a> {
    pub fn new(mirrors: &'a MirrorRegistry, exclusion: MirrorExclusion, block_tolerance: f32, fall_rate: f32) -> Self {
        Self {
            mirrors,
            exclusion,
            block_tolerance,
            fall_rate,
        }
    }

    /// Upper bound on reflections in one shot
    pub fn max_reflections(&self) -> usize {
        self.mirrors.len() * 2
    }

    /// Fire a beam and resolve it against the current blocks
    ///
    /// At most one block is removed from `blocks`. The returned chain always
    /// has at least one segment.
    pub fn fire(&self, blocks: &mut BlockRegistry, origin: Vec2, angle_deg: f32, direction: f32) -> BeamTrace {
        let mut trace = BeamTrace::default();
        let mut ray = Ray::new(origin, angle_deg, direction);
        let mut excluded: Vec<usize> = Vec::new();

        loop {
            let boundary = segment_reaches_boundary(ray.origin, ray.slope, ray.direction, FIELD_HALF_EXTENT);
            let boundary_dist = ray.origin.distance(boundary);

            let mirror_hit = if trace.reflections.len() < self.max_reflections() {
                self.mirrors
                    .intersect_ray(&ray, &excluded)
                    .filter(|hit| ray.origin.distance(hit.point) < boundary_dist)
            } else {
                None
            };
            let limit_dist = mirror_hit.map_or(boundary_dist, |hit| ray.origin.distance(hit.point));

            // A block on the path wins over a mirror at the same distance or beyond
            if let Some(hit) = blocks
                .query_near_intercept(&ray, self.block_tolerance)
                .filter(|hit| ray.origin.distance(hit.point) <= limit_dist)
            {
                blocks.remove(hit.id);
                trace.segments.push(BeamSegment::new(ray.origin, hit.point));
                trace.score_delta = score::beam_hit_delta(hit.category, self.fall_rate);
                trace.struck = Some(StruckBlock {
                    id: hit.id,
                    category: hit.category,
                    point: hit.point,
                });
                break;
            }

            let Some(hit) = mirror_hit else {
                trace.segments.push(BeamSegment::new(ray.origin, boundary));
                break;
            };

            trace.segments.push(BeamSegment::new(ray.origin, hit.point));
            trace.reflections.push(hit.index);

            let Some(mirror) = self.mirrors.get(hit.index) else {
                break;
            };
            let angle = reflect_angle(mirror.angle_deg, ray.angle_deg);
            ray = Ray::new(hit.point, angle, direction_from_degrees(angle));

            match self.exclusion {
                MirrorExclusion::Previous => {
                    excluded.clear();
                    excluded.push(hit.index);
                }
                MirrorExclusion::Visited => excluded.push(hit.index),
            }
        }

        log::debug!(
            "Beam: {} segment(s), reflections {:?}, struck {:?}, score {:+}",
            trace.segments.len(),
            trace.reflections,
            trace.struck.map(|s| s.category),
            trace.score_delta
        );
        trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::mirror::Mirror;

    const RATE: f32 = 0.03;
    const TOL: f32 = 0.2;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    fn tracer(mirrors: &MirrorRegistry) -> BeamTracer<'_> {
        BeamTracer::new(mirrors, MirrorExclusion::Previous, TOL, RATE)
    }

    #[test]
    fn test_clean_miss_ends_at_boundary() {
        let mirrors = MirrorRegistry::default();
        let mut blocks = BlockRegistry::new();
        let origin = Vec2::new(-3.5, 0.5);

        for angle in [-60.0f32, -10.0, 0.0, 25.0, 70.0] {
            let trace = tracer(&mirrors).fire(&mut blocks, origin, angle, 1.0);
            let expected = segment_reaches_boundary(origin, crate::slope_from_degrees(angle), 1.0, FIELD_HALF_EXTENT);
            assert_eq!(trace.segments.len(), 1);
            assert!(approx(trace.end_point().unwrap(), expected), "angle {angle}");
            assert_eq!(trace.score_delta, 0);
            assert!(trace.struck.is_none());
        }
    }

    #[test]
    fn test_mirror_bends_beam_straight_up() {
        let mirrors = MirrorRegistry::from_mirrors(vec![Mirror::new(Vec2::new(-2.0, 0.0), 45.0)]);
        let mut blocks = BlockRegistry::new();

        let trace = tracer(&mirrors).fire(&mut blocks, Vec2::new(-4.0, 0.0), 0.0, 1.0);
        assert_eq!(trace.segments.len(), 2);
        assert_eq!(trace.reflections, vec![0]);
        assert!(approx(trace.segments[0].end, Vec2::new(-2.0, 0.0)));
        assert!(approx(trace.segments[1].start, Vec2::new(-2.0, 0.0)));
        assert!(approx(trace.segments[1].end, Vec2::new(-2.0, 4.0)));
        assert_eq!(trace.score_delta, 0);
    }

    #[test]
    fn test_black_hit_scores_and_removes() {
        let mirrors = MirrorRegistry::default();
        let mut blocks = BlockRegistry::new();
        let target = blocks.insert_at(Vec2::new(1.0, 0.05), BlockCategory::BlackA);
        blocks.insert_at(Vec2::new(3.0, 0.0), BlockCategory::Red);

        let trace = tracer(&mirrors).fire(&mut blocks, Vec2::new(-3.5, 0.0), 0.0, 1.0);
        assert_eq!(trace.struck.unwrap().id, target);
        assert!(trace.score_delta > 0);
        assert_eq!(blocks.len(), 1);
        assert!(blocks.get(target).is_none());
        assert!(approx(trace.end_point().unwrap(), Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn test_wrong_hit_penalised_and_removed() {
        let mirrors = MirrorRegistry::default();
        let mut blocks = BlockRegistry::new();
        let target = blocks.insert_at(Vec2::new(0.0, 0.0), BlockCategory::Green);

        let trace = tracer(&mirrors).fire(&mut blocks, Vec2::new(-3.5, 0.0), 0.0, 1.0);
        assert_eq!(trace.struck.unwrap().id, target);
        assert!(trace.score_delta < 0);
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_block_before_mirror_wins() {
        let mirrors = MirrorRegistry::from_mirrors(vec![Mirror::new(Vec2::new(1.0, 0.0), 45.0)]);
        let mut blocks = BlockRegistry::new();
        let target = blocks.insert_at(Vec2::new(0.0, 0.0), BlockCategory::BlackB);

        let trace = tracer(&mirrors).fire(&mut blocks, Vec2::new(-3.5, 0.0), 0.0, 1.0);
        assert_eq!(trace.segments.len(), 1);
        assert!(trace.reflections.is_empty());
        assert_eq!(trace.struck.unwrap().id, target);
    }

    #[test]
    fn test_block_behind_mirror_is_shielded() {
        let mirrors = MirrorRegistry::from_mirrors(vec![Mirror::new(Vec2::new(-1.0, 0.0), 45.0)]);
        let mut blocks = BlockRegistry::new();
        blocks.insert_at(Vec2::new(2.0, 0.0), BlockCategory::BlackA);

        let trace = tracer(&mirrors).fire(&mut blocks, Vec2::new(-3.5, 0.0), 0.0, 1.0);
        assert_eq!(trace.reflections, vec![0]);
        assert!(trace.struck.is_none());
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn test_hit_after_reflection() {
        // 30° mirror turns a rightward beam up to 60°
        let mirrors = MirrorRegistry::from_mirrors(vec![Mirror::new(Vec2::new(0.0, -1.0), 30.0)]);
        let mut blocks = BlockRegistry::new();
        let target = blocks.insert_at(Vec2::new(1.5, 0.6), BlockCategory::BlackA);

        let trace = tracer(&mirrors).fire(&mut blocks, Vec2::new(-3.5, -0.5), 0.0, 1.0);
        assert_eq!(trace.reflections, vec![0]);
        assert_eq!(trace.segments.len(), 2);
        assert!(approx(trace.segments[0].end, Vec2::new(0.866, -0.5)));
        assert_eq!(trace.struck.unwrap().id, target);
        assert_eq!(trace.score_delta, score::beam_hit_delta(BlockCategory::BlackA, RATE));
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_reflection_chain_is_bounded() {
        // Two facing mirrors; the previous-only exclusion lets the beam bounce
        // back and forth until the cap stops it
        let mirrors = MirrorRegistry::from_mirrors(vec![
            Mirror::new(Vec2::new(-1.0, -0.5), 89.0),
            Mirror::new(Vec2::new(1.0, -0.5), 89.0),
        ]);
        let mut blocks = BlockRegistry::new();
        let t = tracer(&mirrors);
        let trace = t.fire(&mut blocks, Vec2::new(0.0, 0.0), 0.0, 1.0);
        assert!(trace.reflections.len() <= t.max_reflections());
        assert_eq!(trace.segments.len(), trace.reflections.len() + 1);
    }

    #[test]
    fn test_visited_exclusion_never_revisits() {
        let mirrors = MirrorRegistry::from_mirrors(vec![
            Mirror::new(Vec2::new(-1.0, -0.5), 89.0),
            Mirror::new(Vec2::new(1.0, -0.5), 89.0),
        ]);
        let mut blocks = BlockRegistry::new();
        let t = BeamTracer::new(&mirrors, MirrorExclusion::Visited, TOL, RATE);
        let trace = t.fire(&mut blocks, Vec2::new(0.0, 0.0), 0.0, 1.0);
        let mut seen = trace.reflections.clone();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), trace.reflections.len());
    }

    #[test]
    fn test_segments_are_connected() {
        let mirrors = MirrorRegistry::from_mirrors(vec![
            Mirror::new(Vec2::new(-2.0, 0.0), 30.0),
            Mirror::new(Vec2::new(2.5, -2.0), 60.0),
            Mirror::new(Vec2::new(-0.5, -3.0), 10.0),
        ]);
        let mut blocks = BlockRegistry::new();
        for angle in [-40.0f32, -20.0, 0.0, 15.0, 35.0] {
            let trace = tracer(&mirrors).fire(&mut blocks, Vec2::new(-3.5, 0.0), angle, 1.0);
            for pair in trace.segments.windows(2) {
                assert!(approx(pair[0].end, pair[1].start));
            }
            let end = trace.end_point().unwrap();
            assert!(end.x.abs() <= FIELD_HALF_EXTENT + 1e-3 && end.y.abs() <= FIELD_HALF_EXTENT + 1e-3);
        }
    }
}
