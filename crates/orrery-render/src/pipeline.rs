//! Lit, textured sphere pipeline.
//!
//! Group 0: camera (view-projection and light position).
//! Group 1: per-draw uniform at a dynamic offset.
//! Group 2: body texture and sampler.

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::buffer::sphere_vertex_layout;
use crate::depth::DepthBuffer;

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// xyz = light world position, w unused.
    pub light_position: [f32; 4],
}

impl CameraUniform {
    pub fn new(view_proj: Mat4, light_position: Vec3) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            light_position: light_position.extend(1.0).to_array(),
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct DrawUniform {
    pub model: [[f32; 4]; 4],
    pub base_color: [f32; 4],
    /// x = 1.0 for emissive bodies.
    pub flags: [f32; 4],
}

impl DrawUniform {
    pub fn new(model: Mat4, base_color: [f32; 4], emissive: bool) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            base_color,
            flags: [if emissive { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }
}

/// Fraction of albedo visible on the night side.
pub const AMBIENT: f32 = 0.15;

pub struct BodyPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub camera_bind_group_layout: wgpu::BindGroupLayout,
    pub draw_bind_group_layout: wgpu::BindGroupLayout,
}

impl BodyPipeline {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        texture_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("body-camera-bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(size_of::<CameraUniform>() as u64),
                    },
                    count: None,
                }],
            });

        let draw_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("body-draw-bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: NonZeroU64::new(size_of::<DrawUniform>() as u64),
                    },
                    count: None,
                }],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("body-pipeline-layout"),
            bind_group_layouts: &[
                &camera_bind_group_layout,
                &draw_bind_group_layout,
                texture_bind_group_layout,
            ],
            immediate_size: 0,
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("body-shader"),
            source: wgpu::ShaderSource::Wgsl(BODY_SHADER_SOURCE.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("body-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[sphere_vertex_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(DepthBuffer::depth_stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            camera_bind_group_layout,
            draw_bind_group_layout,
        }
    }
}

/// WGSL source for sphere bodies.
///
/// Texture v is flipped: mesh v grows from the south pole while image rows
/// start at the top.
pub const BODY_SHADER_SOURCE: &str = r#"
const AMBIENT: f32 = 0.15;

struct CameraUniform {
    view_proj: mat4x4<f32>,
    light_position: vec4<f32>,
};

struct DrawUniform {
    model: mat4x4<f32>,
    base_color: vec4<f32>,
    flags: vec4<f32>,
};

@group(0) @binding(0) var<uniform> camera: CameraUniform;
@group(1) @binding(0) var<uniform> body: DrawUniform;
@group(2) @binding(0) var t_albedo: texture_2d<f32>;
@group(2) @binding(1) var s_albedo: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    let world = body.model * vec4<f32>(in.position, 1.0);
    var out: VertexOutput;
    out.clip_position = camera.view_proj * world;
    out.world_position = world.xyz;
    // Body transforms are rigid, so the model matrix also transforms normals.
    out.world_normal = (body.model * vec4<f32>(in.normal, 0.0)).xyz;
    out.uv = in.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let texel = textureSample(t_albedo, s_albedo, vec2<f32>(in.uv.x, 1.0 - in.uv.y));
    let albedo = texel * body.base_color;
    if body.flags.x > 0.5 {
        return albedo;
    }
    let n = normalize(in.world_normal);
    let l = normalize(camera.light_position.xyz - in.world_position);
    let diffuse = max(dot(n, l), 0.0);
    return vec4<f32>(albedo.rgb * (AMBIENT + (1.0 - AMBIENT) * diffuse), albedo.a);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::test_device;
    use crate::texture::TextureManager;

    #[test]
    fn test_uniform_sizes() {
        assert_eq!(size_of::<CameraUniform>(), 80);
        assert_eq!(size_of::<DrawUniform>(), 96);
    }

    #[test]
    fn test_draw_uniform_flags() {
        let u = DrawUniform::new(Mat4::IDENTITY, [1.0, 1.0, 0.0, 1.0], true);
        assert_eq!(u.flags[0], 1.0);
        assert_eq!(u.model[3], [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(DrawUniform::new(Mat4::IDENTITY, [1.0; 4], false).flags[0], 0.0);
    }

    #[test]
    fn test_camera_uniform_light() {
        let u = CameraUniform::new(Mat4::IDENTITY, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(u.light_position, [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_shader_ambient_matches_constant() {
        assert!(BODY_SHADER_SOURCE.contains(&format!("const AMBIENT: f32 = {AMBIENT};")));
    }

    #[test]
    fn test_pipeline_builds() {
        let Some((device, queue)) = test_device() else {
            return;
        };
        let textures = TextureManager::new(&device, &queue);
        let _pipeline = BodyPipeline::new(
            &device,
            wgpu::TextureFormat::Bgra8UnormSrgb,
            textures.bind_group_layout(),
        );
    }
}
