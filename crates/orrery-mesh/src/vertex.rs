//! GPU-ready vertex format for sphere meshes.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// One sphere vertex: position, outward unit normal, and texture coordinate.
///
/// `#[repr(C)]` with no padding so a `&[SphereVertex]` can be uploaded as-is.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SphereVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

static_assertions::assert_eq_size!(SphereVertex, [u8; 32]);

impl SphereVertex {
    /// Byte stride between consecutive vertices.
    pub const STRIDE: usize = std::mem::size_of::<Self>();

    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
        }
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    #[must_use]
    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }

    #[must_use]
    pub fn uv(&self) -> Vec2 {
        Vec2::from_array(self.uv)
    }
}
