//! Render an image given a [Scene].

use std::time::Instant;

use log::info;
use rand::{rngs::SmallRng, Rng, SeedableRng};

#[cfg(feature = "parallel")]
use {indicatif::ParallelProgressIterator, rayon::prelude::*};

#[cfg(not(feature = "parallel"))]
use indicatif::ProgressIterator;

use crate::{
    color::{resolve_pixel, Color, VecExt},
    integrator::{Integrator, SamplingStrategy},
    scenes::Scene,
    utils::progress::get_progressbar,
};

/// Multiplier spreading the base seed before the pixel index is mixed in
const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Image Renderer storing render settings such as image dimensions and samples per pixel
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    image_width: u32,
    image_height: u32,
    samples_per_pixel: u32,
    bounce_depth: u16,
    strategy: SamplingStrategy,
    seed: u64,
}

impl Renderer {
    /// Creates a new [Renderer] using cosine sampling and seed 0.
    pub fn new(
        image_width: u32,
        image_height: u32,
        samples_per_pixel: u32,
        bounce_depth: u16,
    ) -> Self {
        Self {
            image_width,
            image_height,
            samples_per_pixel,
            bounce_depth,
            strategy: SamplingStrategy::default(),
            seed: 0,
        }
    }

    pub fn with_strategy(mut self, strategy: SamplingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the base seed every pixel's random source is derived from.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the random source of the pixel at image coordinates (`x`, `y`).
    ///
    /// Depends only on the base seed and the pixel, never on which thread renders it.
    fn pixel_rng(&self, x: u32, y: u32) -> SmallRng {
        let index = u64::from(y) * u64::from(self.image_width) + u64::from(x);
        SmallRng::seed_from_u64(self.seed.wrapping_mul(SEED_MIX) ^ index)
    }

    /// Calculates the final color of the pixel at image coordinates (`x`, `y`)
    ///
    /// Uses the scene's camera to translate the image coordinates
    /// to world space coordinates, then averages the jittered samples
    fn compute_pixel(&self, integrator: &Integrator, scene: &Scene, x: u32, y: u32) -> Color {
        let mut rng = self.pixel_rng(x, y);
        let width = self.image_width.saturating_sub(1).max(1) as f32;
        let height = self.image_height.saturating_sub(1).max(1) as f32;
        // image rows run top to bottom, viewport coordinates bottom to top
        let row = self.image_height.saturating_sub(1 + y) as f32;

        let mut sum = Color::ZERO;
        for _ in 0..self.samples_per_pixel {
            let s = (x as f32 + rng.gen::<f32>()) / width;
            let t = (row + rng.gen::<f32>()) / height;
            let ray = scene.camera.get_ray(s, t, &mut rng);
            sum += integrator.radiance(&ray, &scene.world, &mut rng);
        }

        resolve_pixel(sum, self.samples_per_pixel)
    }

    /// Generates an image from the given scene.
    ///
    /// This functions outputs its progress to the commandline.
    pub fn render_scene(&self, scene: &Scene) -> image::RgbImage {
        let integrator = Integrator::new(scene.background, u32::from(self.bounce_depth))
            .with_strategy(self.strategy, scene.lights.clone());

        let progress_bar = get_progressbar(u64::from(self.image_height) * u64::from(self.image_width))
            .with_prefix("Rendering");

        info!(
            "rendering {}x{} pixels, {} samples each, {} bounces, {:?} sampling",
            self.image_width, self.image_height, self.samples_per_pixel, self.bounce_depth, self.strategy
        );
        let start = Instant::now();

        // Allocate image buffer
        let mut img_buf = image::RgbImage::new(self.image_width, self.image_height);

        #[cfg(feature = "parallel")]
        img_buf
            .enumerate_pixels_mut()
            .par_bridge()
            .progress_with(progress_bar)
            .for_each(|(x, y, pixel)| {
                *pixel = self.compute_pixel(&integrator, scene, x, y).to_pixel();
            });
        #[cfg(not(feature = "parallel"))]
        img_buf
            .enumerate_pixels_mut()
            .progress_with(progress_bar)
            .for_each(|(x, y, pixel)| {
                *pixel = self.compute_pixel(&integrator, scene, x, y).to_pixel();
            });

        info!("rendered in {:.2?}", start.elapsed());
        img_buf
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::Vec3A;

    use super::*;
    use crate::{
        bvh::Bvh,
        camera::Camera,
        hittables::{AxisRect, FlipFace, Hittable, HittableList, Sphere},
        material::Material,
        textures::SolidColor,
    };

    /// A gray sphere under a large ceiling light, seen from the side
    fn small_scene() -> Scene {
        let mut rng = SmallRng::seed_from_u64(0);
        let gray = Arc::new(Material::Lambertian {
            albedo: Arc::new(SolidColor::new(Color::splat(0.5))),
        });
        let light_mat = Arc::new(Material::DiffuseLight {
            emit: Arc::new(SolidColor::new(Color::splat(2.0))),
        });
        let light = FlipFace::new(AxisRect::xz(-5.0, 5.0, -5.0, 5.0, 3.0, &light_mat).wrap()).wrap();
        let world: HittableList = vec![
            Sphere::new(Vec3A::ZERO, 1.0, &gray).wrap(),
            AxisRect::xz(-5.0, 5.0, -5.0, 5.0, -1.0, &gray).wrap(),
            Arc::clone(&light),
        ];

        Scene {
            camera: Camera::new(
                Vec3A::new(0.0, 0.0, 6.0),
                Vec3A::ZERO,
                Vec3A::Y,
                40.0,
                1.0,
                0.0,
                6.0,
                0.0..1.0,
            ),
            world: Bvh::new(world, 0.0, 1.0, &mut rng).unwrap(),
            lights: vec![light],
            background: Color::ZERO,
            dimensions: (12, 12),
        }
    }

    #[test]
    fn same_seed_same_image() {
        let scene = small_scene();
        let renderer = Renderer::new(12, 12, 4, 5).with_seed(7);
        let a = renderer.render_scene(&scene);
        let b = renderer.render_scene(&scene);
        assert_eq!(a.as_raw(), b.as_raw());

        let c = renderer.with_seed(8).render_scene(&scene);
        assert_ne!(a.as_raw(), c.as_raw());
    }

    #[test]
    fn image_is_upright() {
        let scene = small_scene();
        let img = Renderer::new(12, 12, 64, 5)
            .with_strategy(SamplingStrategy::Mixture)
            .render_scene(&scene);
        // the sphere's lit top is brighter than its shadowed underside
        let top = img.get_pixel(6, 4).0[0];
        let bottom = img.get_pixel(6, 8).0[0];
        assert!(top > bottom, "top {top}, bottom {bottom}");
        assert!(scene.world.bounding_box(0.0, 1.0).is_some());
    }
}
