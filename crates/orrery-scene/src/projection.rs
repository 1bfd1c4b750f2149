//! Perspective projection tracking the window's aspect ratio.

use glam::Mat4;

/// Right-handed perspective mapping depth to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    fov_y_deg: f32,
    near: f32,
    far: f32,
    aspect: f32,
}

impl Projection {
    pub fn new(fov_y_deg: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_deg,
            near,
            far,
            aspect: 1.0,
        }
    }

    /// Update the aspect ratio for a new surface size.
    ///
    /// A zero dimension (minimized window) keeps the previous ratio.
    /// Returns `true` if the ratio changed.
    pub fn set_viewport(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        let aspect = width as f32 / height as f32;
        let changed = aspect != self.aspect;
        self.aspect = aspect;
        changed
    }

    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    #[must_use]
    pub fn near(&self) -> f32 {
        self.near
    }

    #[must_use]
    pub fn far(&self) -> f32 {
        self.far
    }

    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }
}
