//! CPU-side rendering boundary
//!
//! A frame is a read-only [`SceneSnapshot`] of the game state, turned into a
//! flat triangle list of [`Vertex`] data. Uploading it to a GPU is the job of
//! whatever window layer hosts the game.

pub mod shapes;
pub mod vertex;

use glam::Vec2;
use serde::Serialize;

use crate::sim::{BeamSegment, BlockCategory, BucketColor, GamePhase, GameState};
pub use vertex::{Vertex, colors};

/// Display color of a block category
pub fn category_color(category: BlockCategory) -> [f32; 4] {
    match category {
        BlockCategory::Red => colors::RED_BLOCK,
        BlockCategory::Green => colors::GREEN_BLOCK,
        BlockCategory::BlackA | BlockCategory::BlackB => colors::BLACK_BLOCK,
    }
}

fn bucket_color(color: BucketColor) -> [f32; 4] {
    match color {
        BucketColor::Red => colors::RED_BLOCK,
        BucketColor::Green => colors::GREEN_BLOCK,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MirrorView {
    pub anchor: Vec2,
    pub angle_deg: f32,
    pub end: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockView {
    pub id: u32,
    pub pos: Vec2,
    pub category: BlockCategory,
    pub color: [f32; 4],
}

/// Everything a frame needs, copied out of the game state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSnapshot {
    pub mirrors: Vec<MirrorView>,
    pub beam: Vec<BeamSegment>,
    pub blocks: Vec<BlockView>,
    pub bucket_offsets: [f32; 2],
    pub bucket_half_width: f32,
    pub cannon_pivot: Vec2,
    pub cannon_angle_deg: f32,
    pub charge_level: f32,
    /// (min, max) corners of the visible area
    pub view: (Vec2, Vec2),
    pub score: i64,
    pub game_over: bool,
}

impl SceneSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            mirrors: state
                .mirrors
                .iter()
                .map(|m| MirrorView {
                    anchor: m.anchor,
                    angle_deg: m.angle_deg,
                    end: m.end(),
                })
                .collect(),
            beam: state.beam.as_ref().map(|b| b.segments.clone()).unwrap_or_default(),
            blocks: state
                .blocks
                .iter()
                .map(|b| BlockView {
                    id: b.id,
                    pos: b.pos,
                    category: b.category,
                    color: category_color(b.category),
                })
                .collect(),
            bucket_offsets: state.buckets.offsets,
            bucket_half_width: state.settings.bucket_tolerance,
            cannon_pivot: state.cannon.pivot(),
            cannon_angle_deg: state.cannon.angle_deg,
            charge_level: state.charge_level(),
            view: state.viewport.bounds(),
            score: state.score,
            game_over: state.phase == GamePhase::GameOver,
        }
    }

    /// Triangle list for the whole scene, back to front
    pub fn build_vertices(&self) -> Vec<Vertex> {
        let mut vertices = Vec::new();

        for mirror in &self.mirrors {
            vertices.extend(shapes::line(mirror.anchor, mirror.end, shapes::MIRROR_HALF_WIDTH, colors::MIRROR));
        }
        for color in BucketColor::ALL {
            vertices.extend(shapes::bucket(
                self.bucket_offsets[color.index()],
                self.bucket_half_width,
                bucket_color(color),
            ));
        }
        for block in &self.blocks {
            vertices.extend(shapes::block(block.pos, block.color));
        }
        vertices.extend(shapes::beam(self.beam.iter().map(|s| (s.start, s.end)), colors::BEAM));
        vertices.extend(shapes::cannon(self.cannon_pivot, self.cannon_angle_deg, colors::CANNON));

        // Charge bar pinned to the top-left of the visible area
        let (min, max) = self.view;
        let size = (max - min) * Vec2::new(0.2, 0.02);
        let origin = Vec2::new(min.x, max.y) + Vec2::new(size.y, -2.0 * size.y);
        vertices.extend(shapes::charge_bar(
            origin,
            size,
            self.charge_level,
            colors::CHARGE_TRACK,
            colors::CHARGE_BAR,
        ));

        vertices
    }
}

/// Raw bytes of a vertex list, ready for a GPU buffer upload
pub fn vertex_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}
