//! A texture mapping alternating between two other Textures in a checkerboard fashion.

use std::sync::Arc;

use glam::Vec3A;

use crate::{color::Color, textures::Texture};

/// A checkered texture alternating between two enclosed textures.
///
/// The pattern is three-dimensional: the sign of `sin(10x) sin(10y) sin(10z)`
/// selects the sub-texture, so it is not confined to a single plane.
#[derive(Debug)]
pub struct Checkered {
    pub even: Arc<dyn Texture>,
    pub odd: Arc<dyn Texture>,
}

impl Checkered {
    /// Creates a new checkered texture
    pub fn new(even: &Arc<dyn Texture>, odd: &Arc<dyn Texture>) -> Self {
        Self {
            even: Arc::clone(even),
            odd: Arc::clone(odd),
        }
    }
}

impl Texture for Checkered {
    fn color(&self, u: f32, v: f32, point: Vec3A) -> Color {
        let scaled = point * 10.0;
        let sines = scaled.x.sin() * scaled.y.sin() * scaled.z.sin();

        if sines < 0.0 {
            self.odd.color(u, v, point)
        } else {
            self.even.color(u, v, point)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::textures::SolidColor;

    fn checker() -> Checkered {
        let even: Arc<dyn Texture> = Arc::new(SolidColor::new(Color::ONE));
        let odd: Arc<dyn Texture> = Arc::new(SolidColor::new(Color::ZERO));
        Checkered::new(&even, &odd)
    }

    #[test]
    fn alternates_between_cells() {
        let tex = checker();
        // sin(0) == 0 is not negative, so the origin falls in an even cell
        assert_eq!(tex.color(0.0, 0.0, Vec3A::ZERO), Color::ONE);

        // one cell over along x (10x in (pi, 2pi)) flips the product's sign
        let q = Vec3A::new(0.05, 0.05, 0.05);
        let p = Vec3A::new(0.15 * std::f32::consts::PI, 0.05, 0.05);
        assert_eq!(tex.color(0.0, 0.0, q), Color::ONE);
        assert_eq!(tex.color(0.0, 0.0, p), Color::ZERO);
    }
}
