//! Orbit/zoom camera driven by pointer drag, scroll wheel, and the tilt key.

use glam::{Mat4, Vec2, Vec3};
use orrery_config::CameraConfig;
use winit::keyboard::KeyCode;

use crate::event::{InputEvent, PointerButton};
use crate::keys::parse_key_code;

/// Mutable camera pose. Angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub yaw_deg: f32,
    /// Unbounded; large values flip the view over the pole.
    pub pitch_deg: f32,
    /// Signed offset along view Z. Negative moves the scene away.
    pub zoom_distance: f32,
    pub is_dragging: bool,
    pub last_pointer_pos: Vec2,
}

/// Tuning that stays fixed for the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraLimits {
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub zoom_step: f32,
    /// Degrees of rotation per pixel of drag.
    pub sensitivity: f32,
}

impl Default for CameraLimits {
    fn default() -> Self {
        Self {
            min_zoom: -90.0,
            max_zoom: -5.0,
            zoom_step: 1.0,
            sensitivity: 0.5,
        }
    }
}

/// Owns the camera state and the tilt toggle.
///
/// The only writer of [`CameraState`]; every mutation goes through
/// [`handle_event`](Self::handle_event).
#[derive(Debug, Clone)]
pub struct CameraController {
    state: CameraState,
    limits: CameraLimits,
    tilt_key: KeyCode,
    tilt_enabled: bool,
}

impl CameraController {
    /// Initial zoom is clamped into the limits. Swapped limits are reordered.
    pub fn new(
        yaw_deg: f32,
        pitch_deg: f32,
        zoom: f32,
        mut limits: CameraLimits,
        tilt_key: KeyCode,
        tilt_enabled: bool,
    ) -> Self {
        if limits.min_zoom > limits.max_zoom {
            tracing::warn!(
                min = limits.min_zoom,
                max = limits.max_zoom,
                "zoom limits reversed, swapping"
            );
            std::mem::swap(&mut limits.min_zoom, &mut limits.max_zoom);
        }
        Self {
            state: CameraState {
                yaw_deg,
                pitch_deg,
                zoom_distance: zoom.clamp(limits.min_zoom, limits.max_zoom),
                is_dragging: false,
                last_pointer_pos: Vec2::ZERO,
            },
            limits,
            tilt_key,
            tilt_enabled,
        }
    }

    /// Build from the `camera` config section. An unknown tilt key name
    /// falls back to `T`.
    pub fn from_config(config: &CameraConfig, tilt_enabled: bool) -> Self {
        let tilt_key = parse_key_code(&config.tilt_key).unwrap_or_else(|| {
            tracing::warn!(key = %config.tilt_key, "unknown tilt key, using KeyT");
            KeyCode::KeyT
        });
        Self::new(
            config.initial_yaw_deg,
            config.initial_pitch_deg,
            config.initial_zoom,
            CameraLimits {
                min_zoom: config.min_zoom,
                max_zoom: config.max_zoom,
                zoom_step: config.zoom_step,
                sensitivity: config.drag_sensitivity,
            },
            tilt_key,
            tilt_enabled,
        )
    }

    /// Apply one input event. Events that do not concern the camera are ignored.
    pub fn handle_event(&mut self, event: &InputEvent) {
        let s = &mut self.state;
        match *event {
            InputEvent::PointerDown {
                button: PointerButton::Primary,
                pos,
            } => {
                s.is_dragging = true;
                s.last_pointer_pos = pos;
            }
            InputEvent::PointerUp {
                button: PointerButton::Primary,
            } => {
                s.is_dragging = false;
            }
            InputEvent::PointerMove { pos } => {
                if s.is_dragging {
                    let delta = pos - s.last_pointer_pos;
                    s.yaw_deg += delta.x * self.limits.sensitivity;
                    s.pitch_deg += delta.y * self.limits.sensitivity;
                }
                s.last_pointer_pos = pos;
            }
            InputEvent::ScrollUp => self.zoom_by(self.limits.zoom_step),
            InputEvent::ScrollDown => self.zoom_by(-self.limits.zoom_step),
            InputEvent::KeyPress(key) if key == self.tilt_key => {
                self.tilt_enabled = !self.tilt_enabled;
                tracing::info!(tilt_enabled = self.tilt_enabled, "axial tilt toggled");
            }
            _ => {}
        }
    }

    fn zoom_by(&mut self, amount: f32) {
        self.state.zoom_distance = (self.state.zoom_distance + amount)
            .clamp(self.limits.min_zoom, self.limits.max_zoom);
    }

    /// `translate(0, 0, zoom) * rotX(pitch) * rotY(yaw)`.
    #[must_use]
    pub fn view_transform(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, self.state.zoom_distance))
            * Mat4::from_rotation_x(self.state.pitch_deg.to_radians())
            * Mat4::from_rotation_y(self.state.yaw_deg.to_radians())
    }

    #[must_use]
    pub fn state(&self) -> &CameraState {
        &self.state
    }

    #[must_use]
    pub fn limits(&self) -> &CameraLimits {
        &self.limits
    }

    #[must_use]
    pub fn tilt_enabled(&self) -> bool {
        self.tilt_enabled
    }

    #[must_use]
    pub fn tilt_key(&self) -> KeyCode {
        self.tilt_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> CameraController {
        CameraController::from_config(&CameraConfig::default(), true)
    }

    fn down(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerDown {
            button: PointerButton::Primary,
            pos: Vec2::new(x, y),
        }
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMove {
            pos: Vec2::new(x, y),
        }
    }

    #[test]
    fn test_defaults_from_config() {
        let c = controller();
        assert_eq!(c.state().pitch_deg, 20.0);
        assert_eq!(c.state().yaw_deg, 0.0);
        assert_eq!(c.state().zoom_distance, -30.0);
        assert!(!c.state().is_dragging);
        assert_eq!(c.tilt_key(), KeyCode::KeyT);
    }

    #[test]
    fn test_drag_rotates_by_sensitivity() {
        let mut c = controller();
        c.handle_event(&down(100.0, 100.0));
        c.handle_event(&moved(110.0, 100.0));
        assert!((c.state().yaw_deg - 5.0).abs() < 1e-6);
        assert_eq!(c.state().pitch_deg, 20.0);

        c.handle_event(&moved(110.0, 90.0));
        assert!((c.state().pitch_deg - 15.0).abs() < 1e-6);
    }

    #[test]
    fn test_move_without_drag_only_tracks_pointer() {
        let mut c = controller();
        c.handle_event(&moved(300.0, 200.0));
        assert_eq!(c.state().yaw_deg, 0.0);
        assert_eq!(c.state().last_pointer_pos, Vec2::new(300.0, 200.0));
    }

    #[test]
    fn test_release_stops_drag() {
        let mut c = controller();
        c.handle_event(&down(0.0, 0.0));
        c.handle_event(&InputEvent::PointerUp {
            button: PointerButton::Primary,
        });
        c.handle_event(&moved(50.0, 50.0));
        assert!(!c.state().is_dragging);
        assert_eq!(c.state().yaw_deg, 0.0);
    }

    #[test]
    fn test_secondary_button_does_not_drag() {
        let mut c = controller();
        c.handle_event(&InputEvent::PointerDown {
            button: PointerButton::Secondary,
            pos: Vec2::ZERO,
        });
        c.handle_event(&moved(40.0, 0.0));
        assert_eq!(c.state().yaw_deg, 0.0);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut c = controller();
        for _ in 0..100 {
            c.handle_event(&InputEvent::ScrollUp);
        }
        assert_eq!(c.state().zoom_distance, -5.0);
        for _ in 0..200 {
            c.handle_event(&InputEvent::ScrollDown);
        }
        assert_eq!(c.state().zoom_distance, -90.0);
    }

    #[test]
    fn test_scroll_up_moves_closer() {
        let mut c = controller();
        c.handle_event(&InputEvent::ScrollUp);
        assert_eq!(c.state().zoom_distance, -29.0);
    }

    #[test]
    fn test_tilt_key_toggles() {
        let mut c = controller();
        c.handle_event(&InputEvent::KeyPress(KeyCode::KeyT));
        assert!(!c.tilt_enabled());
        c.handle_event(&InputEvent::KeyPress(KeyCode::KeyR));
        assert!(!c.tilt_enabled());
        c.handle_event(&InputEvent::KeyPress(KeyCode::KeyT));
        assert!(c.tilt_enabled());
    }

    #[test]
    fn test_unknown_tilt_key_falls_back() {
        let config = CameraConfig {
            tilt_key: "NotAKey".into(),
            ..CameraConfig::default()
        };
        let c = CameraController::from_config(&config, false);
        assert_eq!(c.tilt_key(), KeyCode::KeyT);
    }

    #[test]
    fn test_reversed_limits_and_initial_clamp() {
        let limits = CameraLimits {
            min_zoom: -5.0,
            max_zoom: -90.0,
            ..CameraLimits::default()
        };
        let c = CameraController::new(0.0, 0.0, -200.0, limits, KeyCode::KeyT, true);
        assert_eq!(c.limits().min_zoom, -90.0);
        assert_eq!(c.state().zoom_distance, -90.0);
    }

    #[test]
    fn test_view_transform_at_rest() {
        let c = CameraController::new(
            0.0,
            0.0,
            -30.0,
            CameraLimits::default(),
            KeyCode::KeyT,
            true,
        );
        let origin = c.view_transform().transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(0.0, 0.0, -30.0)).length() < 1e-5);
    }

    #[test]
    fn test_view_yaw_rotates_world_about_y() {
        let limits = CameraLimits {
            max_zoom: 0.0,
            ..CameraLimits::default()
        };
        let c = CameraController::new(90.0, 0.0, 0.0, limits, KeyCode::KeyT, true);
        let p = c.view_transform().transform_point3(Vec3::X);
        assert!((p - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5, "got {p}");
    }
}
