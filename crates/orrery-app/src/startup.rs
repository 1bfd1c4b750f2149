//! Everything that happens before the window opens.

use orrery_assets::{TextureSource, ensure_textures};
use orrery_config::{AppDirs, CliArgs, Config, ConfigError};
use orrery_mesh::MeshLibrary;
use orrery_scene::{OrbitSceneGraph, SceneError, build_solar_system};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("could not build the scene: {0}")]
    Scene(#[from] SceneError),
}

/// Config and log directories, honoring `--config`.
pub fn resolve_dirs(args: &CliArgs) -> Result<AppDirs, ConfigError> {
    match &args.config {
        Some(dir) => Ok(AppDirs::with_config_dir(dir.clone())),
        None => AppDirs::resolve(),
    }
}

/// Load `config.ron` (creating it when absent) and apply CLI overrides.
///
/// A config that cannot be read or parsed is replaced by the defaults; the
/// error is handed back so it can be logged once logging is up.
pub fn load_config(dirs: &AppDirs, args: &CliArgs) -> (Config, Option<ConfigError>) {
    let (mut config, error) = match Config::load_or_create(&dirs.config_dir) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    config.apply_cli_overrides(args);
    (config, error)
}

/// The scene and its assets, ready for a window.
pub struct Startup {
    pub config: Config,
    pub meshes: MeshLibrary,
    pub graph: OrbitSceneGraph,
    pub textures: Vec<TextureSource>,
}

/// Build the scene from `config` and make sure texture files are on disk.
///
/// Texture problems are reported per texture and never fail startup.
///
/// # Errors
///
/// [`StartupError::Scene`] when the configured bodies are invalid.
pub fn prepare(config: Config) -> Result<Startup, StartupError> {
    let mut meshes = MeshLibrary::new();
    let graph = build_solar_system(&config.scene, &mut meshes)?;
    tracing::info!(
        bodies = graph.len(),
        meshes = meshes.len(),
        "Scene built"
    );

    let textures = ensure_textures(&config.assets);
    for source in &textures {
        tracing::debug!(
            body = %source.body,
            path = %source.path.display(),
            status = ?source.status,
            "Texture source"
        );
    }

    Ok(Startup {
        config,
        meshes,
        graph,
        textures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_assets::TextureStatus;
    use orrery_scene::{EARTH, MOON, SUN};

    fn offline_config(texture_dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.assets.texture_dir = texture_dir.to_path_buf();
        config.assets.download_missing = false;
        config
    }

    #[test]
    fn test_prepare_builds_three_bodies() {
        let tmp = tempfile::tempdir().unwrap();
        let startup = prepare(offline_config(tmp.path())).unwrap();
        assert_eq!(startup.graph.len(), 3);
        for name in [SUN, EARTH, MOON] {
            assert!(startup.graph.body(name).is_some(), "missing {name}");
        }
        // Three distinct radii.
        assert_eq!(startup.meshes.len(), 3);
    }

    #[test]
    fn test_prepare_missing_textures_not_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let startup = prepare(offline_config(tmp.path())).unwrap();
        assert_eq!(startup.textures.len(), 2);
        assert!(
            startup
                .textures
                .iter()
                .all(|t| t.status == TextureStatus::Skipped)
        );
    }

    #[test]
    fn test_default_textures_name_scene_bodies() {
        let tmp = tempfile::tempdir().unwrap();
        let startup = prepare(offline_config(tmp.path())).unwrap();
        let bodies: Vec<_> = startup.textures.iter().map(|t| t.body.as_str()).collect();
        assert_eq!(bodies, [EARTH, MOON]);
        for body in bodies {
            assert!(startup.graph.body(body).is_some(), "no body {body}");
        }
    }

    #[test]
    fn test_prepare_rejects_bad_period() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = offline_config(tmp.path());
        config.scene.earth.orbit_period_sec = 0.0;
        assert!(matches!(prepare(config), Err(StartupError::Scene(_))));
    }

    #[test]
    fn test_load_config_creates_default() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = AppDirs::with_config_dir(tmp.path().to_path_buf());
        let args = CliArgs {
            width: Some(1024),
            ..Default::default()
        };
        let (config, error) = load_config(&dirs, &args);
        assert!(error.is_none());
        assert_eq!(config.window.width, 1024);
        assert!(tmp.path().join("config.ron").is_file());
    }

    #[test]
    fn test_load_config_falls_back_on_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("config.ron"), "not ron at all (").unwrap();
        let dirs = AppDirs::with_config_dir(tmp.path().to_path_buf());
        let (config, error) = load_config(&dirs, &CliArgs::default());
        assert!(matches!(error, Some(ConfigError::Parse { .. })));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_resolve_dirs_honors_config_flag() {
        let args = CliArgs {
            config: Some("/tmp/orrery-cfg".into()),
            ..Default::default()
        };
        let dirs = resolve_dirs(&args).unwrap();
        assert_eq!(dirs.config_dir, std::path::PathBuf::from("/tmp/orrery-cfg"));
    }
}
