//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "orrery", about = "Sun, planet and moon in motion")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding the planet and moon textures.
    #[arg(long)]
    pub texture_dir: Option<PathBuf>,

    /// Do not download missing textures.
    #[arg(long)]
    pub no_download: bool,

    /// Start with axial tilt disabled.
    #[arg(long)]
    pub no_tilt: bool,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref dir) = args.texture_dir {
            self.assets.texture_dir = dir.clone();
        }
        if args.no_download {
            self.assets.download_missing = false;
        }
        if args.no_tilt {
            self.scene.tilt_enabled = false;
        }
    }
}
