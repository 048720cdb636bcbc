//! Color and pixel output

use glam::Vec3A;

pub use glam::Vec3A as Color;

pub mod colors {
    pub const WHITE: super::Color = super::Vec3A::ONE;
    pub const BLACK: super::Color = super::Vec3A::ZERO;
    /// Returned by image textures that have no image bound
    pub const DEBUG_CYAN: super::Color = super::Vec3A::new(0.0, 1.0, 1.0);
}

// conversion for sdr pixels
pub trait VecExt<P: image::Pixel> {
    fn to_pixel(self) -> P;
    fn from_pixel(p: P) -> Self;
}

impl VecExt<image::Rgb<u8>> for Vec3A {
    fn to_pixel(self) -> image::Rgb<u8> {
        image::Rgb::<u8>(
            self.to_array()
                .map(|channel| (channel.clamp(0.0, 1.0) * u8::MAX as f32) as u8),
        )
    }

    fn from_pixel(p: image::Rgb<u8>) -> Self {
        Self::from_array(p.0.map(|channel| (channel as f32 / u8::MAX as f32).clamp(0.0, 1.0)))
    }
}

/// Averages an accumulated sample sum and applies gamma-2 correction.
///
/// NaN channels from degenerate sample paths are zeroed first.
pub fn resolve_pixel(sum: Color, samples: u32) -> Color {
    let sum = Color::from_array(sum.to_array().map(|c| if c.is_nan() { 0.0 } else { c }));
    let averaged = sum / samples as f32;
    averaged.max(Vec3A::ZERO).powf(0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_conversion_clamps() {
        let p: image::Rgb<u8> = Vec3A::new(2.0, -1.0, 0.5).to_pixel();
        assert_eq!(p.0, [255, 0, 127]);
    }

    #[test]
    fn resolve_drops_nan_and_gamma_corrects() {
        let sum = Vec3A::new(f32::NAN, 4.0, 1.0);
        let res = resolve_pixel(sum, 4);
        assert_eq!(res.x, 0.0);
        assert!((res.y - 1.0).abs() < 1e-6);
        assert!((res.z - 0.5).abs() < 1e-6);
    }
}
