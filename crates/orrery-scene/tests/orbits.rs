use glam::{Mat4, Vec3};
use orrery_config::Config;
use orrery_mesh::MeshLibrary;
use orrery_scene::{
    AnimationTime, EARTH, FramePacket, MOON, Projection, SUN, TextureId, build_solar_system,
};

fn position_of(packet: &FramePacket, index: usize) -> Vec3 {
    packet.draws[index].world.w_axis.truncate()
}

#[test]
fn default_config_animates_full_system() {
    let config = Config::default();
    let mut meshes = MeshLibrary::new();
    let mut graph = build_solar_system(&config.scene, &mut meshes).unwrap();
    assert!(graph.set_texture(EARTH, Some(TextureId::new(0))));

    let mut projection = Projection::new(
        config.projection.fov_y_deg,
        config.projection.near,
        config.projection.far,
    );
    projection.set_viewport(config.window.width, config.window.height);
    let view = Mat4::from_translation(Vec3::new(0.0, 0.0, config.camera.initial_zoom));

    let period = f64::from(config.scene.earth.orbit_period_sec);
    let t = AnimationTime::from_secs(period / 4.0);
    let placements = graph.compute_frame(t, config.scene.tilt_enabled).unwrap();
    let packet = FramePacket::build(t, &placements, view, projection.matrix());

    assert_eq!(packet.draws.len(), 3);
    assert_eq!(placements[0].body.name, SUN);
    assert_eq!(placements[2].body.name, MOON);

    let earth = position_of(&packet, 1);
    let expected = Vec3::new(0.0, 0.0, -config.scene.earth.orbit_radius);
    assert!((earth - expected).length() < 1e-3, "earth at {earth}");

    let moon = position_of(&packet, 2);
    let d = (moon - placements[1].anchor_position()).length();
    assert!((d - config.scene.moon.orbit_radius).abs() < 1e-3);

    // Every body sits in front of the default camera and inside the depth range.
    for draw in &packet.draws {
        let clip = packet
            .view_projection()
            .project_point3(draw.world.w_axis.truncate());
        assert!((0.0..=1.0).contains(&clip.z), "depth {}", clip.z);
    }
}

#[test]
fn full_orbit_returns_to_start() {
    let config = Config::default();
    let graph = build_solar_system(&config.scene, &mut MeshLibrary::new()).unwrap();

    let start = graph.compute_frame(AnimationTime::ZERO, true).unwrap();
    // Least common multiple of 20 s earth orbit, 2 s spin and 5 s moon orbit.
    let later = graph
        .compute_frame(AnimationTime::from_secs(20.0), true)
        .unwrap();
    for (a, b) in start.iter().zip(&later) {
        assert!(
            a.transform.abs_diff_eq(b.transform, 1e-3),
            "{} drifted",
            a.body.name
        );
    }
}

#[test]
fn orbit_radii_hold_over_long_sweep() {
    let config = Config::default();
    let graph = build_solar_system(&config.scene, &mut MeshLibrary::new()).unwrap();
    let earth_radius = config.scene.earth.orbit_radius;
    let moon_radius = config.scene.moon.orbit_radius;

    // Early frames, then a long-running session where the angle must wrap.
    let times = (0..200)
        .map(|i| f64::from(i) * 0.173)
        .chain((0..2000).map(|i| 1.0e5 + f64::from(i) * 0.731));

    for t in times {
        for tilt in [false, true] {
            let placements = graph
                .compute_frame(AnimationTime::from_secs(t), tilt)
                .unwrap();
            let earth = &placements[1];
            let moon = &placements[2];
            assert_eq!(earth.body.name, EARTH);

            let r = earth.world_position().length();
            assert!(
                (r - earth_radius).abs() < 1e-3,
                "earth at radius {r}, t={t}, tilt={tilt}"
            );
            assert!(earth.world_position().y.abs() < 1e-3, "earth left the orbit plane");

            let d = (moon.world_position() - earth.anchor_position()).length();
            assert!(
                (d - moon_radius).abs() < 1e-3,
                "moon at distance {d}, t={t}, tilt={tilt}"
            );
        }
    }
}
