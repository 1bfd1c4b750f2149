//! Hierarchical orbit graph and per-frame world transform computation.

use glam::{Mat4, Vec3};

use crate::body::{Body, MotionRule, TextureId, swept_angle_deg};
use crate::clock::AnimationTime;
use crate::error::SceneError;
use crate::transform_stack::TransformStack;

/// World placement of one body for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    pub body: &'a Body,
    /// Frame the body's mesh is drawn in (includes tilt and spin).
    pub transform: Mat4,
    /// Orbit position frame, without the body's own tilt or spin.
    /// Children are placed relative to this frame.
    pub orbit_anchor: Mat4,
}

impl Placement<'_> {
    #[must_use]
    pub fn world_position(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }

    #[must_use]
    pub fn anchor_position(&self) -> Vec3 {
        self.orbit_anchor.w_axis.truncate()
    }
}

/// A validated tree of bodies rooted at a single static body.
#[derive(Debug, Clone)]
pub struct OrbitSceneGraph {
    root: Body,
}

impl OrbitSceneGraph {
    /// Validate every motion rule in the tree.
    ///
    /// # Errors
    ///
    /// [`SceneError::InvalidMotionParameters`] for the first bad body found.
    pub fn new(root: Body) -> Result<Self, SceneError> {
        validate_tree(&root)?;
        tracing::debug!(bodies = root.subtree_len(), root = %root.name, "scene graph built");
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Body {
        &self.root
    }

    #[must_use]
    pub fn body(&self, name: &str) -> Option<&Body> {
        self.root.find(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.root.subtree_len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Attach a texture to the named body. Returns `false` if no body matches.
    pub fn set_texture(&mut self, name: &str, texture: Option<TextureId>) -> bool {
        match self.root.find_mut(name) {
            Some(body) => {
                body.texture = texture;
                true
            }
            None => false,
        }
    }

    /// World transforms of every body at time `t`, in depth-first order.
    ///
    /// Pure function of `t` and `tilt_enabled`. When tilt is disabled the
    /// spin axis is the orbit frame's +Y.
    ///
    /// # Errors
    ///
    /// Only structural errors from the transform stack, which indicate a bug.
    pub fn compute_frame(
        &self,
        t: AnimationTime,
        tilt_enabled: bool,
    ) -> Result<Vec<Placement<'_>>, SceneError> {
        let mut stack = TransformStack::new();
        let mut out = Vec::with_capacity(self.len());
        place(&self.root, t.as_secs(), tilt_enabled, &mut stack, &mut out)?;
        debug_assert_eq!(stack.depth(), 1, "unbalanced transform scopes");
        Ok(out)
    }
}

fn validate_tree(body: &Body) -> Result<(), SceneError> {
    body.motion.validate(&body.name)?;
    body.children.iter().try_for_each(validate_tree)
}

fn place<'a>(
    body: &'a Body,
    t: f64,
    tilt_enabled: bool,
    stack: &mut TransformStack,
    out: &mut Vec<Placement<'a>>,
) -> Result<(), SceneError> {
    let mut anchor = stack.scope();

    match body.motion {
        MotionRule::Static => {
            let m = anchor.current_transform();
            out.push(Placement {
                body,
                transform: m,
                orbit_anchor: m,
            });
        }
        MotionRule::Orbit {
            orbit_radius,
            orbit_period_sec,
        } => {
            anchor.rotate_about_axis(swept_angle_deg(t, orbit_period_sec), 0.0, 1.0, 0.0)?;
            anchor.translate(orbit_radius, 0.0, 0.0);
            let m = anchor.current_transform();
            out.push(Placement {
                body,
                transform: m,
                orbit_anchor: m,
            });
        }
        MotionRule::OrbitAndSpin {
            orbit_radius,
            orbit_period_sec,
            spin_period_sec,
            axial_tilt_deg,
        } => {
            anchor.rotate_about_axis(swept_angle_deg(t, orbit_period_sec), 0.0, 1.0, 0.0)?;
            anchor.translate(orbit_radius, 0.0, 0.0);
            let orbit_anchor = anchor.current_transform();

            let mut spin = anchor.scope();
            if tilt_enabled {
                spin.rotate_about_axis(axial_tilt_deg, 0.0, 0.0, -1.0)?;
            }
            spin.rotate_about_axis(swept_angle_deg(t, spin_period_sec), 0.0, 1.0, 0.0)?;
            out.push(Placement {
                body,
                transform: spin.current_transform(),
                orbit_anchor,
            });
        }
    }

    for child in &body.children {
        place(child, t, tilt_enabled, &mut anchor, out)?;
    }
    Ok(())
}
