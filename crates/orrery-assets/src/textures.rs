//! Texture discovery, download-on-demand, and decoding.

use std::path::{Path, PathBuf};
use std::time::Duration;

use orrery_config::{AssetConfig, TextureEntry};

use crate::download::download_file;
use crate::error::AssetError;

/// Where a body's texture stands after [`ensure_textures`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureStatus {
    /// Already on disk.
    Present,
    /// Fetched during this run.
    Downloaded,
    /// Missing and downloads are disabled.
    Skipped,
    /// Missing and the download failed.
    Failed,
}

impl TextureStatus {
    #[must_use]
    pub fn is_available(self) -> bool {
        matches!(self, Self::Present | Self::Downloaded)
    }
}

/// A body's texture file and whether it can be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureSource {
    pub body: String,
    pub path: PathBuf,
    pub status: TextureStatus,
}

/// Make sure each configured texture exists locally, downloading the
/// missing ones when allowed. Failures are logged and reported per texture.
pub fn ensure_textures(config: &AssetConfig) -> Vec<TextureSource> {
    let timeout = Duration::from_secs(config.download_timeout_secs);
    [&config.earth_texture, &config.moon_texture]
        .into_iter()
        .map(|entry| ensure_one(config, entry, timeout))
        .collect()
}

fn ensure_one(config: &AssetConfig, entry: &TextureEntry, timeout: Duration) -> TextureSource {
    let body = entry.body.as_str();
    let path = config.texture_path(entry);
    let status = if path.is_file() {
        TextureStatus::Present
    } else if !config.download_missing {
        tracing::warn!(body, path = %path.display(), "texture missing and downloads disabled");
        TextureStatus::Skipped
    } else {
        match download_file(&entry.url, &path, timeout) {
            Ok(_) => TextureStatus::Downloaded,
            Err(e) => {
                tracing::warn!(body, error = %e, "texture download failed");
                TextureStatus::Failed
            }
        }
    };
    TextureSource {
        body: body.to_owned(),
        path,
        status,
    }
}

/// An image decoded to tightly packed RGBA8, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Decode a PNG or JPEG file to RGBA8.
///
/// # Errors
///
/// [`AssetError::Decode`] when the file is unreadable or not a supported image.
pub fn decode_rgba(path: &Path) -> Result<DecodedImage, AssetError> {
    let img = image::open(path)
        .map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();
    let (width, height) = img.dimensions();
    tracing::debug!(path = %path.display(), width, height, "decoded texture");
    Ok(DecodedImage {
        width,
        height,
        pixels: img.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &Path, download: bool) -> AssetConfig {
        AssetConfig {
            texture_dir: dir.to_path_buf(),
            download_missing: download,
            download_timeout_secs: 2,
            earth_texture: TextureEntry {
                body: "earth".into(),
                url: "http://127.0.0.1:9/earth.png".into(),
                file_name: "earth.png".into(),
            },
            moon_texture: TextureEntry {
                body: "moon".into(),
                url: "http://127.0.0.1:9/moon.png".into(),
                file_name: "moon.png".into(),
            },
        }
    }

    fn write_png(path: &Path) {
        let mut img = image::RgbaImage::new(4, 2);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.save(path).unwrap();
    }

    #[test]
    fn test_present_and_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("earth.png"));
        let sources = ensure_textures(&config_in(dir.path(), false));

        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].body, "earth");
        assert_eq!(sources[0].status, TextureStatus::Present);
        assert_eq!(sources[1].status, TextureStatus::Skipped);
        assert!(!sources[1].status.is_available());
    }

    #[test]
    fn test_body_name_comes_from_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), false);
        config.moon_texture.body = "luna".into();
        let bodies: Vec<_> = ensure_textures(&config)
            .into_iter()
            .map(|s| s.body)
            .collect();
        assert_eq!(bodies, ["earth", "luna"]);
    }

    #[test]
    fn test_failed_download_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let sources = ensure_textures(&config_in(dir.path(), true));
        assert!(sources.iter().all(|s| s.status == TextureStatus::Failed));
    }

    #[test]
    fn test_decode_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("earth.png");
        write_png(&path);
        let decoded = decode_rgba(&path).unwrap();
        assert_eq!((decoded.width, decoded.height), (4, 2));
        assert_eq!(decoded.pixels.len(), 4 * 2 * 4);
        assert_eq!(&decoded.pixels[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moon.png");
        std::fs::write(&path, b"not an image").unwrap();
        assert!(matches!(
            decode_rgba(&path),
            Err(AssetError::Decode { .. })
        ));
    }
}
