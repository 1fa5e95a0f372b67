//! Falling blocks: spawning, descent, floor resolution and beam queries
//!
//! Blocks are keyed by a stable id and kept sorted by it. Position is a plain
//! mutable field; beam queries scan every live block.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Ray, is_closer_along_direction};
use super::rng::RandomSource;
use super::score;
use crate::consts::{FLOOR_Y, SPAWN_X_RANGE, SPAWN_Y};

/// The two catch buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BucketColor {
    Red,
    Green,
}

impl BucketColor {
    pub const ALL: [BucketColor; 2] = [BucketColor::Red, BucketColor::Green];

    /// Slot in per-bucket arrays
    #[inline]
    pub fn index(self) -> usize {
        match self {
            BucketColor::Red => 0,
            BucketColor::Green => 1,
        }
    }
}

/// What a block is, fixed at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockCategory {
    /// Belongs in the red bucket
    Red,
    /// Belongs in the green bucket
    Green,
    /// Beam target; must never land in a bucket
    BlackA,
    /// Beam target; must never land in a bucket
    BlackB,
}

impl BlockCategory {
    pub fn is_black(self) -> bool {
        matches!(self, BlockCategory::BlackA | BlockCategory::BlackB)
    }

    /// The bucket this block should be caught in, if any
    pub fn bucket(self) -> Option<BucketColor> {
        match self {
            BlockCategory::Red => Some(BucketColor::Red),
            BlockCategory::Green => Some(BucketColor::Green),
            BlockCategory::BlackA | BlockCategory::BlackB => None,
        }
    }

    /// Draw a category: black with probability `black_chance`, each half split evenly
    pub fn random(black_chance: f32, rng: &mut impl RandomSource) -> Self {
        let black = rng.chance(black_chance);
        let first = rng.chance(0.5);
        match (black, first) {
            (true, true) => BlockCategory::BlackA,
            (true, false) => BlockCategory::BlackB,
            (false, true) => BlockCategory::Red,
            (false, false) => BlockCategory::Green,
        }
    }
}

/// A live falling block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallingBlock {
    pub id: u32,
    pub pos: Vec2,
    pub category: BlockCategory,
}

/// A beam meeting a block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockHit {
    pub point: Vec2,
    pub id: u32,
    pub category: BlockCategory,
}

/// What happened to the blocks that reached the floor this tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExitOutcome {
    pub score_delta: i64,
    /// Catches per bucket, indexed by `BucketColor::index`
    pub caught: [u32; 2],
    /// A black block landed in a bucket
    pub forbidden_landing: bool,
    /// Blocks removed at the floor, caught or not
    pub removed: usize,
}

/// Owner of every live falling block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockRegistry {
    /// Sorted by id
    blocks: Vec<FallingBlock>,
    next_id: u32,
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            next_id: 1,
        }
    }

    /// Insert a block of `category` at a random x along the top of the field
    pub fn spawn(&mut self, category: BlockCategory, rng: &mut impl RandomSource) -> u32 {
        let x = rng.range_f32(-SPAWN_X_RANGE, SPAWN_X_RANGE);
        let id = self.insert_at(Vec2::new(x, SPAWN_Y), category);
        log::debug!("Spawned block {} ({:?}) at x={:.2}", id, category, x);
        id
    }

    /// Spawn a block with a randomly drawn category
    pub fn spawn_random(&mut self, black_chance: f32, rng: &mut impl RandomSource) -> u32 {
        let category = BlockCategory::random(black_chance, rng);
        self.spawn(category, rng)
    }

    /// Insert a block at an exact position
    pub fn insert_at(&mut self, pos: Vec2, category: BlockCategory) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.blocks.push(FallingBlock { id, pos, category });
        id
    }

    /// Move every block down by `delta_fall`
    pub fn advance_all(&mut self, delta_fall: f32) {
        for block in &mut self.blocks {
            block.pos.y -= delta_fall;
        }
    }

    /// Settle every block at or below the floor against the buckets
    ///
    /// Coloured blocks inside their own bucket's window score a catch; black
    /// blocks inside either window are a forbidden landing. Everything that
    /// reached the floor is removed.
    pub fn resolve_exits(&mut self, bucket_offsets: [f32; 2], tolerance: f32, fall_rate: f32) -> ExitOutcome {
        let mut outcome = ExitOutcome::default();
        let in_bucket = |x: f32, color: BucketColor| (x - bucket_offsets[color.index()]).abs() < tolerance;

        self.blocks.retain(|block| {
            if block.pos.y > FLOOR_Y {
                return true;
            }
            outcome.removed += 1;
            match block.category.bucket() {
                Some(color) => {
                    if in_bucket(block.pos.x, color) {
                        outcome.caught[color.index()] += 1;
                        outcome.score_delta += score::catch_delta(fall_rate);
                        log::debug!("Block {} caught in {:?} bucket", block.id, color);
                    }
                }
                None => {
                    if BucketColor::ALL.iter().any(|&c| in_bucket(block.pos.x, c)) {
                        outcome.forbidden_landing = true;
                        log::info!("Black block {} landed in a bucket", block.id);
                    }
                }
            }
            false
        });
        outcome
    }

    /// Nearest block the ray passes through
    ///
    /// A block matches when the ray's height at the block's x is within
    /// `tolerance` of the block's y. The hit point is on the ray.
    pub fn query_near_intercept(&self, ray: &Ray, tolerance: f32) -> Option<BlockHit> {
        let heading = ray.heading();
        let mut best: Option<BlockHit> = None;

        for block in &self.blocks {
            let y = ray.y_at(block.pos.x);
            if !y.is_finite() || (block.pos.y - y).abs() > tolerance {
                continue;
            }
            let point = Vec2::new(block.pos.x, y);
            let current = best.map_or(Vec2::splat(f32::INFINITY), |b| b.point);
            if is_closer_along_direction(point, current, ray.origin, heading) {
                best = Some(BlockHit {
                    point,
                    id: block.id,
                    category: block.category,
                });
            }
        }
        best
    }

    /// Remove a block by id
    pub fn remove(&mut self, id: u32) -> Option<FallingBlock> {
        let index = self.blocks.binary_search_by_key(&id, |b| b.id).ok()?;
        Some(self.blocks.remove(index))
    }

    pub fn get(&self, id: u32) -> Option<&FallingBlock> {
        let index = self.blocks.binary_search_by_key(&id, |b| b.id).ok()?;
        self.blocks.get(index)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FallingBlock> {
        self.blocks.iter()
    }
}
