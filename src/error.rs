//! Scene construction errors

use thiserror::Error;

/// Failures that abort building a scene.
///
/// Nothing in the intersection or shading path produces these; they only
/// surface while primitives, media and acceleration structures are assembled.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("cannot build a bounding volume hierarchy over an empty primitive list")]
    EmptyScene,
    #[error("primitive #{index} has no bounding box and cannot be placed in a BVH")]
    UnboundedPrimitive { index: usize },
    #[error("medium density must be finite and positive, got {0}")]
    InvalidDensity(f32),
    #[error("failed to load texture image")]
    Image(#[from] image::ImageError),
}
