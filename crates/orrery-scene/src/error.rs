//! Scene construction and traversal errors.
//!
//! Every variant describes a structural bug (bad constants, unbalanced
//! transform scopes), never a runtime condition, so callers are expected to
//! fail fast rather than recover.

use orrery_mesh::MeshError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    /// An orbit or spin period is zero, negative, or not finite.
    #[error("invalid motion parameters for body '{body}': {reason} (got {value})")]
    InvalidMotionParameters {
        body: String,
        reason: &'static str,
        value: f32,
    },

    /// `pop` was called on the base frame, or on a frame held by a scope.
    #[error("transform stack underflow: cannot pop a base or scoped frame")]
    StackUnderflow,

    /// A rotation axis of zero length.
    #[error("rotation axis ({0}, {1}, {2}) has zero length")]
    DegenerateAxis(f32, f32, f32),

    /// Body mesh could not be generated.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}
