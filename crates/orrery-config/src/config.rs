//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Body names shared by the scene and its texture entries.
pub const SUN_BODY: &str = "sun";
pub const EARTH_BODY: &str = "earth";
pub const MOON_BODY: &str = "moon";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Orbit camera settings.
    pub camera: CameraConfig,
    /// Perspective projection settings.
    pub projection: ProjectionConfig,
    /// Bodies, orbits and tessellation.
    pub scene: SceneConfig,
    /// Texture locations and download policy.
    pub assets: AssetConfig,
    /// Frame pacing.
    pub frame: FrameConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    /// Window title.
    pub title: String,
}

/// Orbit camera configuration.
///
/// Zoom values are the camera's z offset, so they are negative and
/// `max_zoom` is the closest the camera may get to the sun.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting pitch in degrees.
    pub initial_pitch_deg: f32,
    /// Starting yaw in degrees.
    pub initial_yaw_deg: f32,
    /// Starting zoom distance.
    pub initial_zoom: f32,
    /// Farthest zoom (most negative z offset).
    pub min_zoom: f32,
    /// Closest zoom.
    pub max_zoom: f32,
    /// Zoom change per scroll notch.
    pub zoom_step: f32,
    /// Degrees of rotation per pixel of drag.
    pub drag_sensitivity: f32,
    /// Physical key name that toggles axial tilt (e.g. `"KeyT"`).
    pub tilt_key: String,
}

/// Perspective projection configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
}

/// Scene configuration: tessellation and the three bodies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Latitude bands per sphere.
    pub lat_bands: u32,
    /// Longitude bands per sphere.
    pub lon_bands: u32,
    /// Whether axial tilt is applied when the program starts.
    pub tilt_enabled: bool,
    /// The central star.
    pub sun: SunConfig,
    /// The planet orbiting the sun.
    pub earth: PlanetConfig,
    /// The moon orbiting the planet.
    pub moon: MoonConfig,
}

/// The sun: static, untextured, emissive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SunConfig {
    /// Sphere radius.
    pub radius: f32,
    /// Flat RGB color.
    pub color: [f32; 3],
}

/// A planet that orbits its parent and spins about a tilted axis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    /// Sphere radius.
    pub radius: f32,
    /// Distance from the parent's center.
    pub orbit_radius: f32,
    /// Seconds per revolution around the parent.
    pub orbit_period_sec: f32,
    /// Seconds per rotation about its own axis.
    pub spin_period_sec: f32,
    /// Axial tilt in degrees.
    pub axial_tilt_deg: f32,
    /// RGB color used when the texture is unavailable.
    pub fallback_color: [f32; 3],
}

/// A moon that orbits its parent without spinning in the orbit frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MoonConfig {
    /// Sphere radius.
    pub radius: f32,
    /// Distance from the parent's center.
    pub orbit_radius: f32,
    /// Seconds per revolution around the parent.
    pub orbit_period_sec: f32,
    /// RGB color used when the texture is unavailable.
    pub fallback_color: [f32; 3],
}

/// Texture asset configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory holding texture files. Relative paths resolve against the
    /// working directory.
    pub texture_dir: PathBuf,
    /// Download missing textures at startup.
    pub download_missing: bool,
    /// HTTP timeout for each download, in seconds.
    pub download_timeout_secs: u64,
    /// Planet texture.
    pub earth_texture: TextureEntry,
    /// Moon texture.
    pub moon_texture: TextureEntry,
}

/// Where a texture comes from and where it is stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextureEntry {
    /// Name of the body this texture is drawn on.
    pub body: String,
    /// Remote URL to fetch the image from.
    pub url: String,
    /// File name inside the texture directory.
    pub file_name: String,
}

/// Frame pacing configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FrameConfig {
    /// Minimum time between frames in milliseconds.
    pub frame_sleep_ms: u64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Also write JSON logs to the log directory in debug builds.
    pub file_logging: bool,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            vsync: true,
            title: "Orrery - press T to toggle tilt".to_string(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_pitch_deg: 20.0,
            initial_yaw_deg: 0.0,
            initial_zoom: -30.0,
            min_zoom: -90.0,
            max_zoom: -5.0,
            zoom_step: 1.0,
            drag_sensitivity: 0.5,
            tilt_key: "KeyT".to_string(),
        }
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y_deg: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            lat_bands: 32,
            lon_bands: 32,
            tilt_enabled: true,
            sun: SunConfig::default(),
            earth: PlanetConfig::default(),
            moon: MoonConfig::default(),
        }
    }
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            radius: 2.0,
            color: [1.0, 1.0, 0.0],
        }
    }
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            radius: 0.5,
            orbit_radius: 10.0,
            orbit_period_sec: 20.0,
            spin_period_sec: 2.0,
            axial_tilt_deg: 23.5,
            fallback_color: [0.2, 0.4, 0.9],
        }
    }
}

impl Default for MoonConfig {
    fn default() -> Self {
        Self {
            radius: 0.2,
            orbit_radius: 2.0,
            orbit_period_sec: 5.0,
            fallback_color: [0.7, 0.7, 0.7],
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            texture_dir: PathBuf::from("textures"),
            download_missing: true,
            download_timeout_secs: 30,
            earth_texture: TextureEntry {
                body: EARTH_BODY.to_string(),
                url: "https://www.solarsystemscope.com/textures/download/2k_earth_daymap.jpg"
                    .to_string(),
                file_name: "earth.jpg".to_string(),
            },
            moon_texture: TextureEntry {
                body: MOON_BODY.to_string(),
                url: "https://www.solarsystemscope.com/textures/download/2k_moon.jpg".to_string(),
                file_name: "moon.jpg".to_string(),
            },
        }
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self { frame_sleep_ms: 10 }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            file_logging: true,
        }
    }
}

impl AssetConfig {
    /// Local path of a texture entry.
    pub fn texture_path(&self, entry: &TextureEntry) -> PathBuf {
        self.texture_dir.join(&entry.file_name)
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .map_err(ConfigError::read(&config_path))?;
            let config: Config = ron::from_str(&contents)
                .map_err(ConfigError::parse(&config_path))?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::write(config_dir))?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::write(&config_path))?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path)
            .map_err(ConfigError::read(&config_path))?;
        let new_config: Config = ron::from_str(&contents)
            .map_err(ConfigError::parse(&config_path))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(4))
                .unwrap();
        assert!(ron_str.contains("width: 800"));
        assert!(ron_str.contains("tilt_key: \"KeyT\""));
    }

    #[test]
    fn test_defaults_match_reference_scene() {
        let scene = SceneConfig::default();
        assert_eq!(scene.sun.radius, 2.0);
        assert_eq!(scene.earth.orbit_radius, 10.0);
        assert_eq!(scene.earth.orbit_period_sec, 20.0);
        assert_eq!(scene.earth.spin_period_sec, 2.0);
        assert_eq!(scene.earth.axial_tilt_deg, 23.5);
        assert_eq!(scene.moon.orbit_radius, 2.0);
        assert_eq!(scene.moon.orbit_period_sec, 5.0);
        assert!(scene.tilt_enabled);
    }

    #[test]
    fn test_camera_zoom_range_is_ordered() {
        let camera = CameraConfig::default();
        assert!(camera.min_zoom < camera.max_zoom);
        assert!((camera.min_zoom..=camera.max_zoom).contains(&camera.initial_zoom));
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(window: (), camera: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.scene, SceneConfig::default());
        assert_eq!(config.assets, AssetConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_fields() {
        let ron_str = "(scene: (earth: (axial_tilt_deg: 10.0)))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.scene.earth.axial_tilt_deg, 10.0);
        assert_eq!(config.scene.earth.orbit_radius, 10.0);
        assert_eq!(config.scene.lat_bands, 32);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_texture_path_joins_dir_and_file() {
        let assets = AssetConfig::default();
        let path = assets.texture_path(&assets.moon_texture);
        assert_eq!(path, PathBuf::from("textures").join("moon.jpg"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.window.width = 1920;
        config.scene.earth.orbit_period_sec = 40.0;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.camera.drag_sensitivity = 0.25;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().camera.drag_sensitivity, 0.25);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }
}
