//! The sun/earth/moon hierarchy assembled from configuration.

use orrery_config::SceneConfig;
use orrery_mesh::{MeshLibrary, SphereParams};

use crate::body::{Body, MotionRule};
use crate::error::SceneError;
use crate::graph::OrbitSceneGraph;

pub const SUN: &str = orrery_config::SUN_BODY;
pub const EARTH: &str = orrery_config::EARTH_BODY;
pub const MOON: &str = orrery_config::MOON_BODY;

/// Build the three-body scene, generating one mesh per body radius.
///
/// The sun is emissive and untextured. Earth and moon start untextured;
/// the caller attaches textures once they are uploaded.
///
/// # Errors
///
/// Mesh parameter errors or invalid orbit/spin periods.
pub fn build_solar_system(
    config: &SceneConfig,
    meshes: &mut MeshLibrary,
) -> Result<OrbitSceneGraph, SceneError> {
    let mut sphere = |radius: f32| {
        meshes.get_or_generate(SphereParams::new(radius, config.lat_bands, config.lon_bands))
    };

    let moon = Body::new(
        MOON,
        config.moon.radius,
        sphere(config.moon.radius)?,
        MotionRule::Orbit {
            orbit_radius: config.moon.orbit_radius,
            orbit_period_sec: config.moon.orbit_period_sec,
        },
    )
    .with_color(config.moon.fallback_color);

    let earth = Body::new(
        EARTH,
        config.earth.radius,
        sphere(config.earth.radius)?,
        MotionRule::OrbitAndSpin {
            orbit_radius: config.earth.orbit_radius,
            orbit_period_sec: config.earth.orbit_period_sec,
            spin_period_sec: config.earth.spin_period_sec,
            axial_tilt_deg: config.earth.axial_tilt_deg,
        },
    )
    .with_color(config.earth.fallback_color)
    .with_child(moon);

    let sun = Body::new(SUN, config.sun.radius, sphere(config.sun.radius)?, MotionRule::Static)
        .with_color(config.sun.color)
        .with_emissive(true)
        .with_child(earth);

    OrbitSceneGraph::new(sun)
}
