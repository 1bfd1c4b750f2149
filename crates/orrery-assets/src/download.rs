//! Blocking HTTP download of texture files.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::AssetError;

/// Fetch `url` into `dest`, creating parent directories.
///
/// The body is streamed to `<dest>.part` and renamed into place, so an
/// interrupted download never leaves a truncated file at `dest`.
///
/// # Errors
///
/// [`AssetError::Http`] for connection failures and non-2xx statuses,
/// [`AssetError::Io`] for filesystem failures.
pub fn download_file(url: &str, dest: &Path, timeout: Duration) -> Result<PathBuf, AssetError> {
    if let Some(parent) = dest.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| AssetError::io(parent, e))?;
    }

    tracing::info!(url, dest = %dest.display(), "downloading texture");
    let agent = ureq::AgentBuilder::new().timeout(timeout).build();
    let response = agent.get(url).call().map_err(|e| AssetError::Http {
        url: url.to_owned(),
        source: Box::new(e),
    })?;

    let part = partial_path(dest);
    let result = write_body(response.into_reader(), &part).and_then(|bytes| {
        fs::rename(&part, dest).map_err(|e| AssetError::io(dest, e))?;
        Ok(bytes)
    });

    match result {
        Ok(bytes) => {
            tracing::info!(dest = %dest.display(), bytes, "download complete");
            Ok(dest.to_path_buf())
        }
        Err(e) => {
            let _ = fs::remove_file(&part);
            Err(e)
        }
    }
}

fn write_body(mut reader: impl io::Read, part: &Path) -> Result<u64, AssetError> {
    let mut file = fs::File::create(part).map_err(|e| AssetError::io(part, e))?;
    let bytes = io::copy(&mut reader, &mut file).map_err(|e| AssetError::io(part, e))?;
    file.sync_all().map_err(|e| AssetError::io(part, e))?;
    Ok(bytes)
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = OsString::from(dest.as_os_str());
    name.push(".part");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_path_appends_suffix() {
        assert_eq!(
            partial_path(Path::new("textures/earth.jpg")),
            PathBuf::from("textures/earth.jpg.part")
        );
    }

    #[test]
    fn test_write_body_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let part = dir.path().join("x.part");
        let n = write_body(&b"hello"[..], &part).unwrap();
        assert_eq!(n, 5);
        assert_eq!(fs::read(&part).unwrap(), b"hello");
    }

    #[test]
    fn test_unreachable_host_is_http_error() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("nested").join("moon.jpg");
        // Port 9 (discard) is closed on loopback, so the connection is refused.
        let err = download_file("http://127.0.0.1:9/moon.jpg", &dest, Duration::from_secs(2))
            .unwrap_err();
        assert!(matches!(err, AssetError::Http { .. }), "got {err}");
        assert!(dir.path().join("nested").is_dir());
        assert!(!dest.exists());
    }
}
