//! Procedural sphere geometry: latitude/longitude tessellation with normals and
//! texture coordinates, and a library that shares one mesh per distinct shape.

pub mod library;
pub mod sphere;
pub mod vertex;

pub use library::{MeshId, MeshLibrary};
pub use sphere::{MIN_LAT_BANDS, MIN_LON_BANDS, MeshError, SphereMesh, SphereParams};
pub use vertex::SphereVertex;
