//! Draws a [`FramePacket`] to the window surface.

use std::sync::Arc;

use orrery_mesh::MeshLibrary;
use orrery_scene::{FramePacket, TextureId};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::buffer::MeshBuffers;
use crate::depth::DepthBuffer;
use crate::gpu::{RenderContext, RenderContextError, SurfaceError};
use crate::pipeline::{BodyPipeline, CameraUniform, DrawUniform};
use crate::texture::{TextureError, TextureManager};

/// Space is black.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

/// Initial per-draw uniform slots; grows on demand.
const INITIAL_DRAW_CAPACITY: u64 = 8;

pub struct Renderer {
    ctx: RenderContext,
    depth: DepthBuffer,
    pipeline: BodyPipeline,
    textures: TextureManager,
    meshes: MeshBuffers,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    draw_buffer: wgpu::Buffer,
    draw_bind_group: wgpu::BindGroup,
    draw_stride: u64,
    draw_capacity: u64,
}

impl Renderer {
    /// Bring up the GPU for `window` and upload every mesh in `meshes`.
    pub fn new(
        window: Arc<Window>,
        vsync: bool,
        meshes: &MeshLibrary,
    ) -> Result<Self, RenderContextError> {
        let ctx = RenderContext::new_blocking(window, vsync)?;
        let device = &ctx.device;
        let (width, height) = ctx.size();

        let textures = TextureManager::new(device, &ctx.queue);
        let pipeline =
            BodyPipeline::new(device, ctx.surface_format(), textures.bind_group_layout());
        let depth = DepthBuffer::new(device, width, height);
        let mesh_buffers = MeshBuffers::upload_all(device, meshes);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("camera-uniform"),
            contents: bytemuck::bytes_of(&CameraUniform::new(
                glam::Mat4::IDENTITY,
                glam::Vec3::ZERO,
            )),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera-bind-group"),
            layout: &pipeline.camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let draw_stride = aligned_stride(
            size_of::<DrawUniform>() as u64,
            u64::from(device.limits().min_uniform_buffer_offset_alignment),
        );
        let (draw_buffer, draw_bind_group) =
            create_draw_buffer(device, &pipeline, draw_stride, INITIAL_DRAW_CAPACITY);

        Ok(Self {
            ctx,
            depth,
            pipeline,
            textures,
            meshes: mesh_buffers,
            camera_buffer,
            camera_bind_group,
            draw_buffer,
            draw_bind_group,
            draw_stride,
            draw_capacity: INITIAL_DRAW_CAPACITY,
        })
    }

    /// Upload RGBA8 pixels for a body texture.
    pub fn load_texture(
        &mut self,
        name: &str,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> Result<TextureId, TextureError> {
        self.textures
            .upload_rgba(&self.ctx.device, &self.ctx.queue, name, pixels, width, height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.ctx.resize(width, height);
        self.depth.resize(&self.ctx.device, width, height);
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.ctx.size()
    }

    /// Clear, draw every command in order, and present.
    pub fn render(&mut self, packet: &FramePacket) -> Result<(), SurfaceError> {
        let frame = self.ctx.acquire()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.write_uniforms(packet);

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("body-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(self.depth.attachment()),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            pass.set_pipeline(&self.pipeline.pipeline);
            pass.set_bind_group(0, &self.camera_bind_group, &[]);

            for (slot, draw) in packet.draws.iter().enumerate() {
                let Some(mesh) = self.meshes.get(draw.mesh) else {
                    log::warn!("Draw references unknown mesh {:?}", draw.mesh);
                    continue;
                };
                let offset = (slot as u64 * self.draw_stride) as wgpu::DynamicOffset;
                pass.set_bind_group(1, &self.draw_bind_group, &[offset]);
                pass.set_bind_group(2, self.textures.bind_group(draw.texture), &[]);
                mesh.bind(&mut pass);
                mesh.draw(&mut pass);
            }
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn write_uniforms(&mut self, packet: &FramePacket) {
        let camera = CameraUniform::new(packet.view_projection(), packet.light_position);
        self.ctx
            .queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&camera));

        let count = packet.draws.len() as u64;
        if count > self.draw_capacity {
            let capacity = count.next_power_of_two();
            let (buffer, bind_group) =
                create_draw_buffer(&self.ctx.device, &self.pipeline, self.draw_stride, capacity);
            self.draw_buffer = buffer;
            self.draw_bind_group = bind_group;
            self.draw_capacity = capacity;
            log::debug!("Grew draw uniform buffer to {capacity} slots");
        }

        let stride = self.draw_stride as usize;
        let mut staging = vec![0u8; stride * packet.draws.len()];
        for (chunk, draw) in staging.chunks_exact_mut(stride).zip(&packet.draws) {
            let uniform = DrawUniform::new(draw.world, draw.base_color, draw.emissive);
            chunk[..size_of::<DrawUniform>()].copy_from_slice(bytemuck::bytes_of(&uniform));
        }
        if !staging.is_empty() {
            self.ctx.queue.write_buffer(&self.draw_buffer, 0, &staging);
        }
    }
}

/// Round `size` up to a multiple of `alignment`.
fn aligned_stride(size: u64, alignment: u64) -> u64 {
    size.div_ceil(alignment.max(1)) * alignment.max(1)
}

fn create_draw_buffer(
    device: &wgpu::Device,
    pipeline: &BodyPipeline,
    stride: u64,
    capacity: u64,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("draw-uniforms"),
        size: stride * capacity,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("draw-bind-group"),
        layout: &pipeline.draw_bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: wgpu::BufferSize::new(size_of::<DrawUniform>() as u64),
            }),
        }],
    });
    (buffer, bind_group)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligned_stride() {
        assert_eq!(aligned_stride(96, 256), 256);
        assert_eq!(aligned_stride(256, 256), 256);
        assert_eq!(aligned_stride(300, 256), 512);
        assert_eq!(aligned_stride(96, 0), 96);
    }
}
