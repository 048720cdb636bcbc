mod onb;
mod utils;

// public: geometry primitives
pub mod bounds;
// public: acceleration structure, benchmarked
pub mod bvh;
pub mod camera;
// public: commandline parser
pub mod cli;
pub mod color;
// public: scene construction failures
pub mod error;
// public: `Hittable` trait
pub mod hittables;
// public: path tracing estimator
pub mod integrator;
pub mod material;
pub mod pdf;
pub mod ray;
// public: renderer functionality
pub mod render;
// public: scene selection
pub mod scenes;
pub mod textures;
