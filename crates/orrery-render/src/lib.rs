//! wgpu rendering of sphere bodies: device setup, mesh and texture upload,
//! and a lit textured pipeline driven by [`orrery_scene::FramePacket`].

pub mod buffer;
pub mod depth;
pub mod gpu;
pub mod pipeline;
pub mod renderer;
pub mod texture;

pub use buffer::{MeshBuffer, MeshBuffers, sphere_vertex_layout};
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError};
pub use pipeline::{BodyPipeline, CameraUniform, DrawUniform};
pub use renderer::Renderer;
pub use texture::{TextureError, TextureManager};
