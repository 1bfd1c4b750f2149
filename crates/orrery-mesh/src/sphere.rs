//! Latitude/longitude sphere tessellation.
//!
//! The sphere is cut into `lat_bands` latitude bands from the south pole
//! (-π/2) to the north pole (+π/2). Each band is one closed strip of
//! `lon_bands + 1` vertex pairs (lower boundary, upper boundary) sweeping
//! longitude from 0 to 2π. The first longitude sample is repeated at the end
//! of every strip so the texture seam gets `u = 0` and `u = 1` without a wrap.
//!
//! The pole axis is +Z: a point at latitude `lat` and longitude `lon` is
//! `radius * (cos lat cos lon, cos lat sin lon, sin lat)`.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Vec2, Vec3};

use crate::vertex::SphereVertex;

/// Smallest longitude band count that encloses a volume.
pub const MIN_LON_BANDS: u32 = 3;
/// Smallest latitude band count.
pub const MIN_LAT_BANDS: u32 = 1;

/// Errors raised when sphere parameters cannot describe a closed surface.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error(
        "invalid geometry parameters (radius {radius}, {lat_bands} lat bands, {lon_bands} lon bands): {reason}"
    )]
    InvalidGeometryParameters {
        radius: f32,
        lat_bands: u32,
        lon_bands: u32,
        reason: &'static str,
    },
}

/// The parameter triple a sphere mesh is generated from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereParams {
    /// Sphere radius, strictly positive.
    pub radius: f32,
    /// Number of latitude bands, at least [`MIN_LAT_BANDS`].
    pub lat_bands: u32,
    /// Number of longitude bands, at least [`MIN_LON_BANDS`].
    pub lon_bands: u32,
}

impl SphereParams {
    pub fn new(radius: f32, lat_bands: u32, lon_bands: u32) -> Self {
        Self {
            radius,
            lat_bands,
            lon_bands,
        }
    }

    /// Check the triple describes a non-degenerate sphere.
    pub fn validate(&self) -> Result<(), MeshError> {
        let reason = if !self.radius.is_finite() || self.radius <= 0.0 {
            "radius must be positive and finite"
        } else if self.lat_bands < MIN_LAT_BANDS {
            "at least one latitude band is required"
        } else if self.lon_bands < MIN_LON_BANDS {
            "at least three longitude bands are required"
        } else {
            return Ok(());
        };
        Err(MeshError::InvalidGeometryParameters {
            radius: self.radius,
            lat_bands: self.lat_bands,
            lon_bands: self.lon_bands,
            reason,
        })
    }

    /// Vertices in one band's strip.
    pub fn strip_len(&self) -> usize {
        2 * (self.lon_bands as usize + 1)
    }
}

/// An immutable tessellated sphere, stored band by band.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereMesh {
    params: SphereParams,
    vertices: Vec<SphereVertex>,
}

impl SphereMesh {
    /// Tessellate a sphere.
    ///
    /// # Errors
    ///
    /// [`MeshError::InvalidGeometryParameters`] when the radius is not positive,
    /// `lat_bands < 1`, or `lon_bands < 3`.
    pub fn generate(radius: f32, lat_bands: u32, lon_bands: u32) -> Result<Self, MeshError> {
        Self::from_params(SphereParams::new(radius, lat_bands, lon_bands))
    }

    /// Tessellate a sphere from a parameter triple.
    pub fn from_params(params: SphereParams) -> Result<Self, MeshError> {
        params.validate()?;

        let SphereParams {
            radius,
            lat_bands,
            lon_bands,
        } = params;
        let mut vertices = Vec::with_capacity(lat_bands as usize * params.strip_len());

        for i in 0..lat_bands {
            let v0 = i as f32 / lat_bands as f32;
            let v1 = (i + 1) as f32 / lat_bands as f32;
            let lat0 = PI * v0 - FRAC_PI_2;
            let lat1 = PI * v1 - FRAC_PI_2;

            for j in 0..=lon_bands {
                let u = j as f32 / lon_bands as f32;
                let lon = TAU * u;

                let lower = unit_point(lat0, lon);
                let upper = unit_point(lat1, lon);
                vertices.push(SphereVertex::new(lower * radius, lower, Vec2::new(u, v0)));
                vertices.push(SphereVertex::new(upper * radius, upper, Vec2::new(u, v1)));
            }
        }

        tracing::trace!(
            radius,
            lat_bands,
            lon_bands,
            vertex_count = vertices.len(),
            "generated sphere mesh"
        );

        Ok(Self { params, vertices })
    }

    /// The parameters this mesh was generated from.
    #[must_use]
    pub fn params(&self) -> SphereParams {
        self.params
    }

    #[must_use]
    pub fn radius(&self) -> f32 {
        self.params.radius
    }

    /// All vertices, band-major.
    #[must_use]
    pub fn vertices(&self) -> &[SphereVertex] {
        &self.vertices
    }

    /// Vertices per band strip (`2 * (lon_bands + 1)`).
    #[must_use]
    pub fn strip_len(&self) -> usize {
        self.params.strip_len()
    }

    /// Number of latitude bands.
    #[must_use]
    pub fn band_count(&self) -> usize {
        self.params.lat_bands as usize
    }

    /// One band's strip: alternating lower/upper vertices, south to north.
    #[must_use]
    pub fn band(&self, index: usize) -> Option<&[SphereVertex]> {
        let len = self.strip_len();
        self.vertices.get(index * len..(index + 1) * len)
    }

    /// Iterate the band strips from the south pole upward.
    pub fn bands(&self) -> impl Iterator<Item = &[SphereVertex]> {
        self.vertices.chunks_exact(self.strip_len())
    }

    /// Triangle-list indices equivalent to drawing every band as a quad strip.
    ///
    /// Triangles wind counter-clockwise when viewed from outside the sphere.
    #[must_use]
    pub fn triangle_indices(&self) -> Vec<u32> {
        let strip_len = self.strip_len() as u32;
        let lon_bands = self.params.lon_bands;
        let mut indices = Vec::with_capacity(self.triangle_count() * 3);

        for band in 0..self.params.lat_bands {
            let base = band * strip_len;
            for j in 0..lon_bands {
                let lower0 = base + 2 * j;
                let upper0 = lower0 + 1;
                let lower1 = lower0 + 2;
                let upper1 = lower0 + 3;
                indices.extend_from_slice(&[lower0, lower1, upper0, upper0, lower1, upper1]);
            }
        }

        indices
    }

    /// Triangles produced by [`triangle_indices`](Self::triangle_indices).
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        2 * self.params.lat_bands as usize * self.params.lon_bands as usize
    }
}

/// Point on the unit sphere at the given latitude and longitude (radians).
fn unit_point(lat: f32, lon: f32) -> Vec3 {
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();
    Vec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
}
