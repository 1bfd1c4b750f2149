//! OS-specific directory resolution for configuration and logs.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

const APP_NAME: &str = "orrery";

/// Directories the application reads from and writes to.
///
/// Each field resolves to the platform-appropriate location following OS
/// conventions (XDG on Linux, Known Folders on Windows, Library on macOS).
#[derive(Debug, Clone, PartialEq)]
pub struct AppDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// Log files.
    pub log_dir: PathBuf,
}

impl AppDirs {
    /// Resolve platform-specific directories without creating them on disk.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConfigDir`] if the OS does not expose a
    /// configuration directory.
    pub fn resolve() -> Result<Self, ConfigError> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::resolve_with_root(&base))
    }

    /// Resolve directories rooted under a custom base path.
    pub fn resolve_with_root(root: &Path) -> Self {
        let app_dir = root.join(APP_NAME);
        Self {
            config_dir: app_dir.join("config"),
            log_dir: app_dir.join("logs"),
        }
    }

    /// Use `config_dir` as given and keep logs next to it.
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        let log_dir = config_dir.join("logs");
        Self {
            config_dir,
            log_dir,
        }
    }

    /// Create all directories on disk.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Write`] if any directory cannot be created.
    pub fn create_dirs(&self) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.config_dir).map_err(ConfigError::write(&self.config_dir))?;
        std::fs::create_dir_all(&self.log_dir).map_err(ConfigError::write(&self.log_dir))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_with_root_layout() {
        let dirs = AppDirs::resolve_with_root(Path::new("/base"));
        assert_eq!(dirs.config_dir, PathBuf::from("/base/orrery/config"));
        assert_eq!(dirs.log_dir, PathBuf::from("/base/orrery/logs"));
    }

    #[test]
    fn test_create_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = AppDirs::resolve_with_root(tmp.path());
        dirs.create_dirs().unwrap();
        assert!(dirs.config_dir.is_dir());
        assert!(dirs.log_dir.is_dir());
    }

    #[test]
    fn test_with_config_dir_puts_logs_inside() {
        let dirs = AppDirs::with_config_dir(PathBuf::from("cfg"));
        assert_eq!(dirs.log_dir, PathBuf::from("cfg").join("logs"));
    }
}
