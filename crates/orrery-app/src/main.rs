//! The `orrery` binary.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use orrery_app::startup::{load_config, prepare, resolve_dirs};
use orrery_config::{AppDirs, CliArgs};
use orrery_scene::FrameClock;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    // Animation time starts at launch, before config loading and downloads.
    let clock = FrameClock::new();
    let args = CliArgs::parse();

    let (dirs, dirs_error) = match resolve_dirs(&args) {
        Ok(dirs) => (dirs, None),
        Err(e) => (AppDirs::resolve_with_root(Path::new(".")), Some(e)),
    };
    let (config, config_error) = load_config(&dirs, &args);

    orrery_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    if let Some(e) = dirs_error {
        warn!("{e}; using {}", dirs.config_dir.display());
    }
    if let Some(e) = config_error {
        warn!("{e}; using default configuration");
    }
    info!(
        config_dir = %dirs.config_dir.display(),
        log_dir = %dirs.log_dir.display(),
        "Orrery starting"
    );

    let startup = match prepare(config) {
        Ok(startup) => startup,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match orrery_app::run(startup, clock) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
