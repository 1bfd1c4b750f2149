//! Backend-agnostic description of one frame's draws.

use glam::{Mat4, Vec3};
use orrery_mesh::MeshId;

use crate::body::TextureId;
use crate::clock::AnimationTime;
use crate::graph::Placement;

/// One sphere to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub mesh: MeshId,
    pub world: Mat4,
    pub texture: Option<TextureId>,
    /// Multiplied with the sampled texel. White when textured.
    pub base_color: [f32; 4],
    pub emissive: bool,
}

impl DrawCommand {
    #[must_use]
    pub fn from_placement(p: &Placement<'_>) -> Self {
        let body = p.body;
        let base_color = if body.texture.is_some() {
            [1.0; 4]
        } else {
            body.base_color
        };
        Self {
            mesh: body.mesh,
            world: p.transform,
            texture: body.texture,
            base_color,
            emissive: body.emissive,
        }
    }
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePacket {
    pub time: AnimationTime,
    pub view: Mat4,
    pub projection: Mat4,
    /// World position of the light source (the first emissive body).
    pub light_position: Vec3,
    pub draws: Vec<DrawCommand>,
}

impl FramePacket {
    #[must_use]
    pub fn build(
        time: AnimationTime,
        placements: &[Placement<'_>],
        view: Mat4,
        projection: Mat4,
    ) -> Self {
        let light_position = placements
            .iter()
            .find(|p| p.body.emissive)
            .map_or(Vec3::ZERO, Placement::world_position);
        Self {
            time,
            view,
            projection,
            light_position,
            draws: placements.iter().map(DrawCommand::from_placement).collect(),
        }
    }

    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{Body, MotionRule};
    use crate::graph::OrbitSceneGraph;
    use orrery_mesh::{MeshLibrary, SphereParams};

    #[test]
    fn test_packet_colors_follow_texture() {
        let mesh = MeshLibrary::new()
            .get_or_generate(SphereParams::new(1.0, 4, 4))
            .unwrap();
        let sun = Body::new("sun", 2.0, mesh, MotionRule::Static)
            .with_color([1.0, 1.0, 0.0])
            .with_emissive(true)
            .with_child(
                Body::new(
                    "earth",
                    0.5,
                    mesh,
                    MotionRule::Orbit {
                        orbit_radius: 10.0,
                        orbit_period_sec: 20.0,
                    },
                )
                .with_color([0.2, 0.4, 0.9])
                .with_texture(Some(TextureId::new(1))),
            );
        let graph = OrbitSceneGraph::new(sun).unwrap();
        let placements = graph.compute_frame(AnimationTime::ZERO, true).unwrap();
        let packet = FramePacket::build(
            AnimationTime::ZERO,
            &placements,
            Mat4::IDENTITY,
            Mat4::IDENTITY,
        );

        assert_eq!(packet.draws.len(), 2);
        assert_eq!(packet.draws[0].base_color, [1.0, 1.0, 0.0, 1.0]);
        assert!(packet.draws[0].emissive);
        assert_eq!(packet.draws[1].base_color, [1.0; 4]);
        assert_eq!(packet.draws[1].texture, Some(TextureId::new(1)));
        assert_eq!(packet.light_position, Vec3::ZERO);
    }
}
