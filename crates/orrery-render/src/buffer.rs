//! Vertex and index buffers for sphere meshes.

use std::mem::{offset_of, size_of};

use orrery_mesh::{MeshId, MeshLibrary, SphereMesh, SphereVertex};
use wgpu::util::DeviceExt;

/// Vertex buffer layout matching [`SphereVertex`].
pub fn sphere_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] = [
        wgpu::VertexAttribute {
            offset: offset_of!(SphereVertex, position) as wgpu::BufferAddress,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        },
        wgpu::VertexAttribute {
            offset: offset_of!(SphereVertex, normal) as wgpu::BufferAddress,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x3,
        },
        wgpu::VertexAttribute {
            offset: offset_of!(SphereVertex, uv) as wgpu::BufferAddress,
            shader_location: 2,
            format: wgpu::VertexFormat::Float32x2,
        },
    ];
    wgpu::VertexBufferLayout {
        array_stride: size_of::<SphereVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRIBUTES,
    }
}

/// A sphere mesh resident on the GPU, drawn as an indexed triangle list.
pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl MeshBuffer {
    pub fn upload(device: &wgpu::Device, label: &str, mesh: &SphereMesh) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-vertices")),
            contents: bytemuck::cast_slice(mesh.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = mesh.triangle_indices();
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-indices")),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }

    pub fn bind(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// GPU copies of every mesh in a [`MeshLibrary`], indexed by [`MeshId`].
#[derive(Default)]
pub struct MeshBuffers {
    buffers: Vec<MeshBuffer>,
}

impl MeshBuffers {
    /// Upload every mesh in the library. Meshes are immutable, so this runs once.
    pub fn upload_all(device: &wgpu::Device, library: &MeshLibrary) -> Self {
        let buffers: Vec<_> = library
            .iter()
            .map(|(id, mesh)| MeshBuffer::upload(device, &format!("sphere-{}", id.index()), mesh))
            .collect();
        log::info!("Uploaded {} sphere meshes", buffers.len());
        Self { buffers }
    }

    pub fn get(&self, id: MeshId) -> Option<&MeshBuffer> {
        self.buffers.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}
