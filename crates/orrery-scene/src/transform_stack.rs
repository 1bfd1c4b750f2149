//! Save/restore stack of affine transforms for nested coordinate frames.
//!
//! Every operation composes on the right of the current top matrix
//! (`top = top * T`), so later operations act in the local frame set up by
//! earlier ones. The bottom frame is never popped, and neither is any frame
//! owned by a live [`TransformScope`].

use std::ops::{Deref, DerefMut};

use glam::{Mat4, Vec3};

use crate::error::SceneError;

/// A stack of 4x4 transforms with an undroppable base frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformStack {
    frames: Vec<Mat4>,
    /// Lowest depth `pop` may leave. Raised while a scope is open.
    floor: usize,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    /// A stack holding a single identity frame.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base(Mat4::IDENTITY)
    }

    /// A stack whose base frame is `base`.
    #[must_use]
    pub fn with_base(base: Mat4) -> Self {
        let mut frames = Vec::with_capacity(8);
        frames.push(base);
        Self { frames, floor: 1 }
    }

    /// Number of frames, including the base frame.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Duplicate the top frame.
    pub fn push(&mut self) {
        let top = self.current_transform();
        self.frames.push(top);
    }

    /// Discard the top frame and return it.
    ///
    /// # Errors
    ///
    /// [`SceneError::StackUnderflow`] when only the base frame remains, or
    /// when the top frame belongs to an open [`TransformScope`].
    pub fn pop(&mut self) -> Result<Mat4, SceneError> {
        if self.frames.len() <= self.floor {
            return Err(SceneError::StackUnderflow);
        }
        self.frames.pop().ok_or(SceneError::StackUnderflow)
    }

    /// Compose a translation onto the top frame.
    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.compose(Mat4::from_translation(Vec3::new(x, y, z)));
    }

    /// Compose a right-handed rotation of `angle_deg` degrees about the axis
    /// `(x, y, z)`. The axis need not be normalized.
    ///
    /// # Errors
    ///
    /// [`SceneError::DegenerateAxis`] when the axis has zero length.
    pub fn rotate_about_axis(
        &mut self,
        angle_deg: f32,
        x: f32,
        y: f32,
        z: f32,
    ) -> Result<(), SceneError> {
        let axis = Vec3::new(x, y, z)
            .try_normalize()
            .ok_or(SceneError::DegenerateAxis(x, y, z))?;
        self.compose(Mat4::from_axis_angle(axis, angle_deg.to_radians()));
        Ok(())
    }

    /// Compose an arbitrary matrix onto the top frame.
    pub fn compose(&mut self, m: Mat4) {
        let top = self.top_mut();
        *top *= m;
    }

    /// The composed top-of-stack matrix.
    #[must_use]
    pub fn current_transform(&self) -> Mat4 {
        // The base frame is never removed.
        self.frames.last().copied().unwrap_or(Mat4::IDENTITY)
    }

    /// Push a frame that is popped again when the returned guard drops.
    ///
    /// The guard restores the depth the stack had before this call, on every
    /// exit path including early returns through `?`. While it lives, `pop`
    /// cannot remove its frame or anything beneath it.
    pub fn scope(&mut self) -> TransformScope<'_> {
        let restore_depth = self.frames.len();
        let restore_floor = self.floor;
        self.push();
        self.floor = self.frames.len();
        TransformScope {
            stack: self,
            restore_depth,
            restore_floor,
        }
    }

    fn top_mut(&mut self) -> &mut Mat4 {
        if self.frames.is_empty() {
            self.frames.push(Mat4::IDENTITY);
        }
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }
}

/// A pushed frame that pops itself on drop. Derefs to the stack.
#[derive(Debug)]
pub struct TransformScope<'a> {
    stack: &'a mut TransformStack,
    restore_depth: usize,
    restore_floor: usize,
}

impl Deref for TransformScope<'_> {
    type Target = TransformStack;

    fn deref(&self) -> &TransformStack {
        self.stack
    }
}

impl DerefMut for TransformScope<'_> {
    fn deref_mut(&mut self) -> &mut TransformStack {
        self.stack
    }
}

impl Drop for TransformScope<'_> {
    fn drop(&mut self) {
        self.stack.frames.truncate(self.restore_depth.max(1));
        self.stack.floor = self.restore_floor;
    }
}
