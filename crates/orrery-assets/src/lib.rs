//! Texture assets: fetch missing files over HTTP and decode them to RGBA8.

mod download;
mod error;
mod textures;

pub use download::download_file;
pub use error::AssetError;
pub use textures::{DecodedImage, TextureSource, TextureStatus, decode_rgba, ensure_textures};
