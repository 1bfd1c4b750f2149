//! Input handling: winit events in, camera pose and tilt toggle out.

pub mod camera_controller;
pub mod event;
pub mod keys;
pub mod winit_bridge;

pub use camera_controller::{CameraController, CameraLimits, CameraState};
pub use event::{InputEvent, InputQueue, PointerButton};
pub use keys::parse_key_code;
pub use winit_bridge::{PIXELS_PER_LINE, WinitBridge};
