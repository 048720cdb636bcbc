//! Small helpers shared across the renderer

pub mod arena;
pub mod progress;
pub mod random;

/// Index of a coordinate axis: 0 = x, 1 = y, 2 = z
pub type Axis = usize;
