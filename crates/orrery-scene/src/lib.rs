//! Orbit hierarchy, transform stack, and frame assembly.
//!
//! [`OrbitSceneGraph::compute_frame`] turns an animation time into world
//! transforms for every body; [`FramePacket::build`] pairs those with the
//! camera to produce a renderer-independent list of draws.

pub mod body;
pub mod clock;
pub mod error;
pub mod frame;
pub mod graph;
pub mod projection;
pub mod solar_system;
pub mod transform_stack;

pub use body::{Body, MotionRule, TextureId, swept_angle_deg};
pub use clock::{AnimationTime, FrameClock};
pub use error::SceneError;
pub use frame::{DrawCommand, FramePacket};
pub use graph::{OrbitSceneGraph, Placement};
pub use projection::Projection;
pub use solar_system::{EARTH, MOON, SUN, build_solar_system};
pub use transform_stack::{TransformScope, TransformStack};
