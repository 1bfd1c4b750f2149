use std::path::PathBuf;

/// Failures fetching or decoding a texture. Never fatal to the viewer.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("HTTP request for {url} failed: {source}")]
    Http {
        url: String,
        source: Box<ureq::Error>,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

impl AssetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
