//! Celestial bodies and the motion rules that place them.

use orrery_mesh::MeshId;

use crate::error::SceneError;

/// Handle to a GPU texture owned by the renderer's texture manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(u32);

impl TextureId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// How a body is positioned relative to its parent's frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionRule {
    /// Drawn at the parent's origin with no rotation.
    Static,
    /// Circular orbit about the parent's +Y axis, no spin of its own.
    Orbit {
        orbit_radius: f32,
        orbit_period_sec: f32,
    },
    /// Circular orbit plus a tilted spin about the body's own axis.
    OrbitAndSpin {
        orbit_radius: f32,
        orbit_period_sec: f32,
        spin_period_sec: f32,
        axial_tilt_deg: f32,
    },
}

impl MotionRule {
    /// Reject zero, negative, and non-finite periods.
    ///
    /// # Errors
    ///
    /// [`SceneError::InvalidMotionParameters`] naming `body` and the bad value.
    pub fn validate(&self, body: &str) -> Result<(), SceneError> {
        let invalid = |reason: &'static str, value: f32| SceneError::InvalidMotionParameters {
            body: body.to_owned(),
            reason,
            value,
        };

        match *self {
            Self::Static => Ok(()),
            Self::Orbit {
                orbit_radius,
                orbit_period_sec,
            } => {
                check_period(orbit_period_sec)
                    .map_err(|v| invalid("orbit period must be positive", v))?;
                check_finite(orbit_radius).map_err(|v| invalid("orbit radius must be finite", v))
            }
            Self::OrbitAndSpin {
                orbit_radius,
                orbit_period_sec,
                spin_period_sec,
                axial_tilt_deg,
            } => {
                check_period(orbit_period_sec)
                    .map_err(|v| invalid("orbit period must be positive", v))?;
                check_period(spin_period_sec)
                    .map_err(|v| invalid("spin period must be positive", v))?;
                check_finite(orbit_radius).map_err(|v| invalid("orbit radius must be finite", v))?;
                check_finite(axial_tilt_deg).map_err(|v| invalid("axial tilt must be finite", v))
            }
        }
    }
}

fn check_period(period: f32) -> Result<(), f32> {
    if period.is_finite() && period > 0.0 {
        Ok(())
    } else {
        Err(period)
    }
}

fn check_finite(value: f32) -> Result<(), f32> {
    if value.is_finite() { Ok(()) } else { Err(value) }
}

/// Angle in degrees, in `[0, 360)`, swept after `t` seconds by a rotation of
/// the given period. Computed in `f64` so long sessions stay precise.
#[must_use]
pub fn swept_angle_deg(t: f64, period_sec: f32) -> f32 {
    (360.0 * t / f64::from(period_sec)).rem_euclid(360.0) as f32
}

/// A node in the orbit hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String,
    pub radius: f32,
    pub mesh: MeshId,
    /// `None` draws with `base_color` only.
    pub texture: Option<TextureId>,
    /// RGBA color used when untextured. Textured draws modulate by white.
    pub base_color: [f32; 4],
    /// Drawn at full brightness, ignoring lighting.
    pub emissive: bool,
    pub motion: MotionRule,
    pub children: Vec<Body>,
}

impl Body {
    pub fn new(name: impl Into<String>, radius: f32, mesh: MeshId, motion: MotionRule) -> Self {
        Self {
            name: name.into(),
            radius,
            mesh,
            texture: None,
            base_color: [1.0; 4],
            emissive: false,
            motion,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_color(mut self, rgb: [f32; 3]) -> Self {
        self.base_color = [rgb[0], rgb[1], rgb[2], 1.0];
        self
    }

    #[must_use]
    pub fn with_emissive(mut self, emissive: bool) -> Self {
        self.emissive = emissive;
        self
    }

    #[must_use]
    pub fn with_texture(mut self, texture: Option<TextureId>) -> Self {
        self.texture = texture;
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Body) -> Self {
        self.children.push(child);
        self
    }

    /// Number of bodies in this subtree, including `self`.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Body::subtree_len).sum::<usize>()
    }

    /// Depth-first search by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Body> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Body> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_mesh::{MeshLibrary, SphereParams};

    fn mesh() -> MeshId {
        MeshLibrary::new()
            .get_or_generate(SphereParams::new(1.0, 4, 4))
            .unwrap()
    }

    #[test]
    fn test_static_always_valid() {
        assert!(MotionRule::Static.validate("sun").is_ok());
    }

    #[test]
    fn test_zero_orbit_period_rejected() {
        let rule = MotionRule::Orbit {
            orbit_radius: 2.0,
            orbit_period_sec: 0.0,
        };
        let err = rule.validate("moon").unwrap_err();
        assert!(matches!(
            err,
            SceneError::InvalidMotionParameters { ref body, value, .. } if body == "moon" && value == 0.0
        ));
    }

    #[test]
    fn test_negative_and_nan_spin_rejected() {
        for spin in [-2.0, f32::NAN, f32::INFINITY] {
            let rule = MotionRule::OrbitAndSpin {
                orbit_radius: 10.0,
                orbit_period_sec: 20.0,
                spin_period_sec: spin,
                axial_tilt_deg: 23.5,
            };
            assert!(rule.validate("earth").is_err(), "spin {spin} accepted");
        }
    }

    #[test]
    fn test_swept_angle_wraps() {
        assert_eq!(swept_angle_deg(0.0, 20.0), 0.0);
        assert!((swept_angle_deg(5.0, 20.0) - 90.0).abs() < 1e-4);
        assert!(swept_angle_deg(20.0, 20.0).abs() < 1e-4);
        assert!((swept_angle_deg(1e6 + 5.0, 20.0) - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_find_by_name() {
        let m = mesh();
        let tree = Body::new("sun", 2.0, m, MotionRule::Static).with_child(
            Body::new(
                "earth",
                0.5,
                m,
                MotionRule::OrbitAndSpin {
                    orbit_radius: 10.0,
                    orbit_period_sec: 20.0,
                    spin_period_sec: 2.0,
                    axial_tilt_deg: 23.5,
                },
            )
            .with_child(Body::new(
                "moon",
                0.2,
                m,
                MotionRule::Orbit {
                    orbit_radius: 2.0,
                    orbit_period_sec: 5.0,
                },
            )),
        );
        assert_eq!(tree.subtree_len(), 3);
        assert_eq!(tree.find("moon").map(|b| b.radius), Some(0.2));
        assert!(tree.find("mars").is_none());
    }

    #[test]
    fn test_color_builder_sets_alpha() {
        let body = Body::new("sun", 2.0, mesh(), MotionRule::Static).with_color([1.0, 1.0, 0.0]);
        assert_eq!(body.base_color, [1.0, 1.0, 0.0, 1.0]);
    }
}
