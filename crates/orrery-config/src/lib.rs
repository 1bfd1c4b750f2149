//! Configuration system for Orrery.
//!
//! Provides runtime-configurable settings that persist to disk as RON files.
//! Supports CLI overrides via clap, hot-reload detection, and forward/backward
//! compatible serialization.

mod app_dirs;
mod cli;
mod config;
mod error;

pub use app_dirs::AppDirs;
pub use cli::CliArgs;
pub use config::{
    AssetConfig, CameraConfig, Config, DebugConfig, EARTH_BODY, FrameConfig, MOON_BODY, MoonConfig,
    PlanetConfig, ProjectionConfig, SUN_BODY, SceneConfig, SunConfig, TextureEntry, WindowConfig,
};
pub use error::ConfigError;
