//! Per-sprite instance data for instanced quad rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::Entity;

/// One textured quad: rect, rotation, texture layer, depth
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// x, y, width, height
    pub rect: [f32; 4],
    /// Degrees
    pub rot: f32,
    pub tex_idx: f32,
    pub depth: f32,
}

impl SpriteInstance {
    /// Stride of one instance in bytes
    pub const STRIDE: usize = std::mem::size_of::<SpriteInstance>();

    pub fn from_entity(entity: &Entity) -> Self {
        let rect = entity.rect();
        Self {
            rect: [rect.x, rect.y, rect.w, rect.h],
            rot: entity.rot,
            tex_idx: entity.tex_idx as f32,
            depth: entity.depth,
        }
    }
}
