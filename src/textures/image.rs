//! An image-backed texture mapping

use std::path::Path;

use glam::Vec3A;

use crate::{
    color::{colors, Color, VecExt},
    error::SceneError,
};

use super::Texture;

/// An image-based texture
#[derive(Debug, Default)]
pub struct ImageMap {
    /// The image buffer used as the texture
    image: Option<::image::RgbImage>,
}

impl ImageMap {
    /// Creates a new [ImageMap]
    ///
    /// Loads the image located at `file_path`:
    /// * if successful, holds the decoded [image::RgbImage](::image::RgbImage)
    /// * on error, logs a warning and holds nothing, rendering as debug cyan
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        let file_path = file_path.as_ref();
        match Self::open(file_path) {
            Ok(map) => map,
            Err(why) => {
                log::warn!("could not load texture {}: {why}", file_path.display());
                Self::default()
            }
        }
    }

    /// Loads the image at `file_path`, failing if it cannot be read or decoded.
    pub fn open(file_path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let dyn_img = ::image::io::Reader::open(file_path)
            .map_err(::image::ImageError::IoError)?
            .with_guessed_format()
            .map_err(::image::ImageError::IoError)?
            .decode()?;
        Ok(Self::from_image(dyn_img.into_rgb8()))
    }

    /// Wraps an already decoded image.
    pub fn from_image(image: ::image::RgbImage) -> Self {
        Self { image: Some(image) }
    }
}

impl Texture for ImageMap {
    fn color(&self, u: f32, v: f32, _point: Vec3A) -> Color {
        match &self.image {
            Some(img) if img.width() > 0 && img.height() > 0 => {
                let u = u.clamp(0.0, 1.0);
                // flip v to image coordinates
                let v = 1.0 - v.clamp(0.0, 1.0);

                let i = u * img.width() as f32;
                let j = v * img.height() as f32;

                let i = (i as u32).clamp(0, img.width() - 1);
                let j = (j as u32).clamp(0, img.height() - 1);

                Color::from_pixel(*img.get_pixel(i, j))
            }
            // unbound or empty
            _ => colors::DEBUG_CYAN,
        }
    }
}
