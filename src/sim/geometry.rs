//! Straight-line geometry for beams on the square playfield
//!
//! A beam segment is described the way the game aims it: an angle in degrees,
//! the slope derived from it, and a horizontal travel direction (+1 / -1).
//! Intercept comparisons use the full heading so near-vertical beams still
//! order their intercepts correctly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{direction_from_degrees, slope_from_degrees};

/// Points closer than this along the heading count as "at the origin"
pub const FORWARD_EPSILON: f32 = 1e-4;

/// One leg of a beam, from its origin outward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec2,
    /// Direction in degrees from +x
    pub angle_deg: f32,
    /// dy/dx of the supporting line
    pub slope: f32,
    /// +1 travelling right, -1 travelling left
    pub direction: f32,
}

impl Ray {
    /// Ray at `angle_deg`, travelling in the given horizontal direction
    pub fn new(origin: Vec2, angle_deg: f32, direction: f32) -> Self {
        Self {
            origin,
            angle_deg,
            slope: slope_from_degrees(angle_deg),
            direction: if direction < 0.0 { -1.0 } else { 1.0 },
        }
    }

    /// Ray whose horizontal direction follows from the angle itself
    pub fn from_angle(origin: Vec2, angle_deg: f32) -> Self {
        Self::new(origin, angle_deg, direction_from_degrees(angle_deg))
    }

    /// Unit vector of travel
    pub fn heading(&self) -> Vec2 {
        heading_of(self.slope, self.direction)
    }

    /// y of the supporting line at `x`
    #[inline]
    pub fn y_at(&self, x: f32) -> f32 {
        self.slope * (x - self.origin.x) + self.origin.y
    }
}

/// Unit travel vector for a slope walked in `direction`
pub fn heading_of(slope: f32, direction: f32) -> Vec2 {
    if slope.is_finite() {
        Vec2::new(direction, direction * slope).normalize_or_zero()
    } else {
        Vec2::new(0.0, (direction * slope).signum())
    }
}

/// A straight piece of a fired beam
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamSegment {
    pub start: Vec2,
    pub end: Vec2,
}

impl BeamSegment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }
}

/// Point where a ray leaves the square field of the given half-extent
///
/// The ray starts at `start`, follows `slope` and moves in `direction`
/// horizontally. Whichever wall is met first wins.
pub fn segment_reaches_boundary(start: Vec2, slope: f32, direction: f32, half_extent: f32) -> Vec2 {
    let direction = if direction < 0.0 { -1.0 } else { 1.0 };
    if !slope.is_finite() {
        let up = (direction * slope).signum();
        return Vec2::new(start.x, half_extent * up);
    }

    // Walk parameter t along (direction, direction * slope)
    let t_x = (direction * half_extent - start.x) * direction;
    let dy = direction * slope;
    let t_y = if dy > 0.0 {
        (half_extent - start.y) / dy
    } else if dy < 0.0 {
        (-half_extent - start.y) / dy
    } else {
        f32::INFINITY
    };

    // A near-vertical ray starting on a side wall leaves through the top or bottom
    if t_y < t_x || (t_x <= 0.0 && t_y.is_finite()) {
        let wall = if dy > 0.0 { half_extent } else { -half_extent };
        Vec2::new(start.x + direction * t_y, wall)
    } else {
        Vec2::new(direction * half_extent, start.y + dy * t_x)
    }
}

/// Whether `candidate` is a better intercept than `current_best`
///
/// False when the candidate is not in front of `origin` along `heading`;
/// otherwise true only if it is strictly nearer to the origin.
pub fn is_closer_along_direction(candidate: Vec2, current_best: Vec2, origin: Vec2, heading: Vec2) -> bool {
    if (candidate - origin).dot(heading) <= FORWARD_EPSILON {
        return false;
    }
    candidate.distance_squared(origin) < current_best.distance_squared(origin)
}

/// Angle-doubling reflection: a beam at `incoming_deg` bouncing off a
/// mirror oriented at `mirror_deg`
#[inline]
pub fn reflect_angle(mirror_deg: f32, incoming_deg: f32) -> f32 {
    2.0 * mirror_deg - incoming_deg
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const H: f32 = 4.0;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_reflect_angle_pairs() {
        assert_eq!(reflect_angle(45.0, 0.0), 90.0);
        assert_eq!(reflect_angle(30.0, 10.0), 50.0);
        assert_eq!(reflect_angle(60.0, -20.0), 140.0);
        assert_eq!(reflect_angle(1.0, 89.0), -87.0);
    }

    #[test]
    fn test_boundary_horizontal() {
        assert!(approx(segment_reaches_boundary(Vec2::new(-3.5, 1.0), 0.0, 1.0, H), Vec2::new(4.0, 1.0)));
        assert!(approx(segment_reaches_boundary(Vec2::new(2.0, -1.0), 0.0, -1.0, H), Vec2::new(-4.0, -1.0)));
    }

    #[test]
    fn test_boundary_hits_top_and_bottom() {
        // 45° up from the origin reaches the top-right corner
        assert!(approx(segment_reaches_boundary(Vec2::ZERO, 1.0, 1.0, H), Vec2::new(4.0, 4.0)));
        // Steep slope reaches the top before the right wall
        assert!(approx(segment_reaches_boundary(Vec2::ZERO, 2.0, 1.0, H), Vec2::new(2.0, 4.0)));
        // Going left with positive slope means going down
        assert!(approx(segment_reaches_boundary(Vec2::ZERO, 2.0, -1.0, H), Vec2::new(-2.0, -4.0)));
    }

    #[test]
    fn test_boundary_vertical() {
        let ray = Ray::from_angle(Vec2::new(-2.0, 0.0), 90.0);
        let end = segment_reaches_boundary(ray.origin, ray.slope, ray.direction, H);
        assert!(approx(end, Vec2::new(-2.0, 4.0)));

        let end = segment_reaches_boundary(Vec2::new(1.0, 0.0), f32::INFINITY, 1.0, H);
        assert_eq!(end, Vec2::new(1.0, 4.0));
    }

    #[test]
    fn test_boundary_from_side_wall() {
        // Straight up and down from a muzzle sitting on the left wall
        for (angle, wall) in [(90.0f32, 4.0f32), (-90.0, -4.0)] {
            let ray = Ray::from_angle(Vec2::new(-4.0, 0.5), angle);
            let end = segment_reaches_boundary(ray.origin, ray.slope, ray.direction, H);
            assert!(approx(end, Vec2::new(-4.0, wall)), "angle {angle}: {end:?}");
        }
    }

    #[test]
    fn test_heading_matches_angle() {
        for angle in [-80.0f32, -30.0, 0.0, 30.0, 90.0, 135.0, 200.0] {
            let ray = Ray::from_angle(Vec2::ZERO, angle);
            assert!(approx(ray.heading(), crate::unit_from_degrees(angle)), "angle {angle}");
        }
    }

    #[test]
    fn test_closer_rejects_behind() {
        let heading = Vec2::X;
        let origin = Vec2::ZERO;
        let far = Vec2::new(4.0, 0.0);
        assert!(is_closer_along_direction(Vec2::new(1.0, 0.0), far, origin, heading));
        assert!(!is_closer_along_direction(Vec2::new(-1.0, 0.0), far, origin, heading));
        // Sitting on the origin is not in front of it
        assert!(!is_closer_along_direction(origin, far, origin, heading));
        // Equal distance is not strictly closer
        assert!(!is_closer_along_direction(far, far, origin, heading));
    }

    #[test]
    fn test_closer_vertical_heading() {
        let origin = Vec2::new(-2.0, 0.0);
        let up = Ray::from_angle(origin, 90.0).heading();
        let top = Vec2::new(-2.0, 4.0);
        assert!(is_closer_along_direction(Vec2::new(-2.0, 1.0), top, origin, up));
        assert!(!is_closer_along_direction(Vec2::new(-2.0, -1.0), top, origin, up));
    }

    proptest! {
        #[test]
        fn prop_reflection_is_angle_doubling(mirror in 1f32..89.0, incoming in -180f32..180.0) {
            let out = reflect_angle(mirror, incoming);
            prop_assert!((out - (2.0 * mirror - incoming)).abs() < 1e-4);
            // Reflecting twice off the same mirror restores the beam
            prop_assert!((reflect_angle(mirror, out) - incoming).abs() < 1e-3);
        }

        #[test]
        fn prop_boundary_lies_on_field_edge(x in -3.9f32..3.9, y in -3.9f32..3.9, angle in -89f32..89.0, dir in prop::bool::ANY) {
            let direction = if dir { 1.0 } else { -1.0 };
            let p = segment_reaches_boundary(Vec2::new(x, y), slope_from_degrees(angle), direction, H);
            let on_edge = (p.x.abs() - H).abs() < 1e-3 || (p.y.abs() - H).abs() < 1e-3;
            prop_assert!(on_edge);
            prop_assert!(p.x.abs() <= H + 1e-3 && p.y.abs() <= H + 1e-3);
        }
    }
}
