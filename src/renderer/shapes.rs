//! Shape generation for 2D primitives
//!
//! Every shape is emitted as a triangle list.

use glam::Vec2;

use super::vertex::Vertex;
use crate::consts::{BLOCK_HALF_SIZE, BUCKET_GRAB_HEIGHT, CANNON_BARREL_LENGTH, FIELD_HALF_EXTENT};
use crate::unit_from_degrees;

/// Half-width of a drawn beam leg
pub const BEAM_HALF_WIDTH: f32 = 0.02;
pub const MIRROR_HALF_WIDTH: f32 = 0.03;
pub const BARREL_HALF_WIDTH: f32 = 0.06;

fn quad(vertices: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) {
    // a-b-c-d in winding order
    vertices.push(Vertex::new(a.x, a.y, color));
    vertices.push(Vertex::new(b.x, b.y, color));
    vertices.push(Vertex::new(c.x, c.y, color));

    vertices.push(Vertex::new(a.x, a.y, color));
    vertices.push(Vertex::new(c.x, c.y, color));
    vertices.push(Vertex::new(d.x, d.y, color));
}

/// Thick line between two points
pub fn line(start: Vec2, end: Vec2, half_width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (end - start).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * half_width;

    let mut vertices = Vec::with_capacity(6);
    quad(&mut vertices, start + perp, start - perp, end - perp, end + perp, color);
    vertices
}

/// Connected beam legs
pub fn beam(points: impl IntoIterator<Item = (Vec2, Vec2)>, color: [f32; 4]) -> Vec<Vertex> {
    points
        .into_iter()
        .flat_map(|(start, end)| line(start, end, BEAM_HALF_WIDTH, color))
        .collect()
}

/// Axis-aligned rectangle
pub fn rect(center: Vec2, half: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    quad(
        &mut vertices,
        center + Vec2::new(-half.x, -half.y),
        center + Vec2::new(half.x, -half.y),
        center + Vec2::new(half.x, half.y),
        center + Vec2::new(-half.x, half.y),
        color,
    );
    vertices
}

/// A falling block
pub fn block(center: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    rect(center, Vec2::splat(BLOCK_HALF_SIZE), color)
}

/// A bucket: trapezoid on the bottom edge, open side up
pub fn bucket(offset: f32, half_width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let bottom = -FIELD_HALF_EXTENT;
    let top = BUCKET_GRAB_HEIGHT;
    let base = half_width * 0.7;

    let mut vertices = Vec::with_capacity(6);
    quad(
        &mut vertices,
        Vec2::new(offset - base, bottom),
        Vec2::new(offset + base, bottom),
        Vec2::new(offset + half_width, top),
        Vec2::new(offset - half_width, top),
        color,
    );
    vertices
}

/// Cannon base on the wall plus its barrel
pub fn cannon(pivot: Vec2, angle_deg: f32, color: [f32; 4]) -> Vec<Vertex> {
    let muzzle = pivot + unit_from_degrees(angle_deg) * CANNON_BARREL_LENGTH;
    let mut vertices = rect(pivot, Vec2::new(0.1, 0.2), color);
    vertices.extend(line(pivot, muzzle, BARREL_HALF_WIDTH, color));
    vertices
}

/// Horizontal bar filled to `level` (0..=1) from the left
pub fn charge_bar(origin: Vec2, size: Vec2, level: f32, track: [f32; 4], fill: [f32; 4]) -> Vec<Vertex> {
    let level = level.clamp(0.0, 1.0);
    let mut vertices = rect(origin + size * 0.5, size * 0.5, track);
    if level > 0.0 {
        let filled = Vec2::new(size.x * level, size.y);
        vertices.extend(rect(origin + filled * 0.5, filled * 0.5, fill));
    }
    vertices
}
