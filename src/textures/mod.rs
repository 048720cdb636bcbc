//! Textures: mappings from a surface point to a [Color]

use std::fmt::Debug;

use glam::Vec3A;

use crate::color::Color;

mod checkered;
mod image;
mod noise;
mod perlin;

pub use self::checkered::Checkered;
pub use self::image::ImageMap;
pub use self::noise::{MarbleTexture, NoiseTexture};
pub use self::perlin::PerlinNoise;

/// A texture maps surface coordinates and a world-space point to a color.
pub trait Texture: Debug + Send + Sync {
    /// Returns the color at texture coordinates (`u`, `v`) and position `point`.
    fn color(&self, u: f32, v: f32, point: Vec3A) -> Color;
}

/// A texture of one uniform color.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    color: Color,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Texture for SolidColor {
    fn color(&self, _u: f32, _v: f32, _point: Vec3A) -> Color {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_color_is_constant() {
        let tex = SolidColor::new(Color::new(0.1, 0.2, 0.3));
        assert_eq!(tex.color(0.0, 0.0, Vec3A::ZERO), tex.color(0.7, 0.2, Vec3A::splat(9.0)));
    }
}
