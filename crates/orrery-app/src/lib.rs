//! Orrery application: startup, window, and the per-frame loop.

pub mod frame_pacer;
pub mod startup;
pub mod window;

pub use frame_pacer::{FramePacer, LONG_FRAME, MAX_FRAME_SLEEP};
pub use startup::{Startup, StartupError, load_config, prepare, resolve_dirs};
pub use window::{AppError, FrameStep, OrreryApp, run, window_attributes_from_config};
