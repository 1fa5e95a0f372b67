//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// 2D vertex in field coordinates with an RGBA color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Byte stride of one vertex in a packed buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Colors for game elements
pub mod colors {
    pub const RED_BLOCK: [f32; 4] = [0.9, 0.1, 0.1, 1.0];
    pub const GREEN_BLOCK: [f32; 4] = [0.1, 0.8, 0.2, 1.0];
    pub const BLACK_BLOCK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const BEAM: [f32; 4] = [0.1, 0.3, 1.0, 1.0];
    pub const MIRROR: [f32; 4] = [0.25, 0.25, 0.25, 1.0];
    pub const CANNON: [f32; 4] = [0.35, 0.35, 0.4, 1.0];
    pub const CHARGE_BAR: [f32; 4] = [0.2, 0.9, 0.3, 1.0];
    pub const CHARGE_TRACK: [f32; 4] = [0.2, 0.2, 0.2, 0.6];
}
