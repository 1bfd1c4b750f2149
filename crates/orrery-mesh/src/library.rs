//! Shared, generate-once storage for sphere meshes.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::sphere::{MeshError, SphereMesh, SphereParams};

/// Opaque handle to a mesh held by a [`MeshLibrary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(u32);

impl MeshId {
    /// Index of the mesh in library insertion order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Bit-exact key for a parameter triple.
type ParamsKey = (u32, u32, u32);

fn key(params: &SphereParams) -> ParamsKey {
    (params.radius.to_bits(), params.lat_bands, params.lon_bands)
}

/// Owns every sphere mesh for the process lifetime.
///
/// Bodies sharing the same radius and resolution share one mesh.
#[derive(Debug, Default)]
pub struct MeshLibrary {
    meshes: Vec<Arc<SphereMesh>>,
    by_params: FxHashMap<ParamsKey, MeshId>,
}

impl MeshLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the mesh for `params`, generating it on first request.
    pub fn get_or_generate(&mut self, params: SphereParams) -> Result<MeshId, MeshError> {
        if let Some(&id) = self.by_params.get(&key(&params)) {
            return Ok(id);
        }

        let mesh = SphereMesh::from_params(params)?;
        let id = MeshId(self.meshes.len() as u32);
        self.meshes.push(Arc::new(mesh));
        self.by_params.insert(key(&params), id);
        tracing::debug!(
            mesh = id.index(),
            radius = params.radius,
            "registered sphere mesh"
        );
        Ok(id)
    }

    #[must_use]
    pub fn get(&self, id: MeshId) -> Option<&Arc<SphereMesh>> {
        self.meshes.get(id.index())
    }

    /// Iterate all meshes with their handles, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (MeshId, &Arc<SphereMesh>)> {
        self.meshes
            .iter()
            .enumerate()
            .map(|(i, mesh)| (MeshId(i as u32), mesh))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}
