//! Monte-Carlo estimation of the radiance carried along a ray

use rand::RngCore;

use crate::{
    color::{colors, Color},
    hittables::{Hittable, HittableList},
    material::ScatterKind,
    pdf::{HittablePdf, Pdf},
    ray::Ray,
};

/// Offset along a ray below which hits are ignored, suppressing shadow acne
const T_MIN: f32 = 0.001;

/// How diffuse bounces choose their continuation direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::clap_derive::ValueEnum)]
pub enum SamplingStrategy {
    /// Sample the material's own distribution only
    #[default]
    Cosine,
    /// Blend the material's distribution 50/50 with directions towards the lights
    Mixture,
}

/// Path tracer settings shared by every sample of a render.
pub struct Integrator {
    /// Radiance returned by rays that escape the scene
    pub background: Color,
    /// Number of bounces after which a path is cut off
    pub max_depth: u32,
    pub strategy: SamplingStrategy,
    /// Emitters targeted by [SamplingStrategy::Mixture]
    pub lights: HittableList,
}

impl Integrator {
    /// Creates an integrator that samples by cosine only.
    pub fn new(background: Color, max_depth: u32) -> Self {
        Self {
            background,
            max_depth,
            strategy: SamplingStrategy::Cosine,
            lights: HittableList::new(),
        }
    }

    /// Switches to `strategy`, sampling towards `lights` when mixing.
    ///
    /// Without any lights, mixing degrades to cosine sampling.
    pub fn with_strategy(mut self, strategy: SamplingStrategy, lights: HittableList) -> Self {
        self.strategy = strategy;
        self.lights = lights;
        self
    }

    /// Estimates the radiance arriving along `ray` from `world`, starting at the full bounce depth.
    pub fn radiance(&self, ray: &Ray, world: &dyn Hittable, rng: &mut dyn RngCore) -> Color {
        self.ray_color(ray, world, self.max_depth, rng)
    }

    /// Estimates the radiance arriving along `ray` with `depth` bounces left.
    pub fn ray_color(
        &self,
        ray: &Ray,
        world: &dyn Hittable,
        depth: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        if depth == 0 {
            return colors::BLACK;
        }

        let Some(rec) = world.hit(ray, T_MIN, f32::INFINITY, rng) else {
            return self.background;
        };

        let emitted = rec.material.emitted(ray, &rec);
        let Some(srec) = rec.material.scatter(ray, &rec, rng) else {
            return emitted;
        };

        let material_pdf = match srec.kind {
            ScatterKind::Specular(specular) => {
                return emitted
                    + srec.attenuation * self.ray_color(&specular, world, depth - 1, rng);
            }
            ScatterKind::Diffuse(pdf) => pdf,
        };

        let pdf = match self.strategy {
            SamplingStrategy::Mixture if !self.lights.is_empty() => Pdf::mixture(
                Pdf::Hittable(HittablePdf::new(&self.lights, rec.point)),
                material_pdf,
            ),
            _ => material_pdf,
        };

        let scattered = Ray::new(rec.point, pdf.generate(rng), ray.time);
        let pdf_value = pdf.value(scattered.direction, rng);
        if pdf_value <= 0.0 {
            return emitted;
        }

        let scattering_pdf = rec.material.scattering_pdf(ray, &rec, &scattered);
        if scattering_pdf <= 0.0 {
            return emitted;
        }

        emitted
            + srec.attenuation
                * scattering_pdf
                * self.ray_color(&scattered, world, depth - 1, rng)
                / pdf_value
    }
}

/// Estimates the radiance along `ray` with cosine-weighted sampling and `depth` bounces.
pub fn ray_color(
    ray: &Ray,
    background: Color,
    world: &dyn Hittable,
    depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    Integrator::new(background, depth).ray_color(ray, world, depth, rng)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::Vec3A;
    use rand::{rngs::SmallRng, SeedableRng};

    use super::*;
    use crate::{
        hittables::{AxisRect, FlipFace, Sphere},
        material::Material,
        textures::SolidColor,
    };

    const ALBEDO: f32 = 0.5;
    const EMISSION: f32 = 4.0;

    fn sky() -> Color {
        Color::new(0.7, 0.8, 1.0)
    }

    /// A light spanning the whole plane `y = 1`, facing down
    fn ceiling_light() -> Arc<dyn Hittable> {
        let light = Arc::new(Material::DiffuseLight {
            emit: Arc::new(SolidColor::new(Color::splat(EMISSION))),
        });
        FlipFace::new(AxisRect::xz(-1e4, 1e4, -1e4, 1e4, 1.0, &light).wrap()).wrap()
    }

    /// A floor at `y = 0` under [ceiling_light]
    fn lit_floor(floor: Material) -> (HittableList, HittableList) {
        let floor = Arc::new(floor);
        let light = ceiling_light();
        let world = vec![
            AxisRect::xz(-1e4, 1e4, -1e4, 1e4, 0.0, &floor).wrap(),
            Arc::clone(&light),
        ];
        (world, vec![light])
    }

    fn gray_floor() -> Material {
        Material::Lambertian {
            albedo: Arc::new(SolidColor::new(Color::splat(ALBEDO))),
        }
    }

    fn down() -> Ray {
        Ray::new(Vec3A::new(0.0, 0.5, 0.0), -Vec3A::Y, 0.0)
    }

    #[test]
    fn exhausted_depth_is_black() {
        let (world, _) = lit_floor(gray_floor());
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(ray_color(&down(), sky(), &world, 0, &mut rng), colors::BLACK);
    }

    #[test]
    fn escaping_ray_sees_background() {
        let world: HittableList = vec![Sphere::new(Vec3A::ZERO, 1.0, &Arc::new(gray_floor())).wrap()];
        let mut rng = SmallRng::seed_from_u64(0);
        let ray = Ray::new(Vec3A::new(0.0, 5.0, 0.0), Vec3A::Y, 0.0);
        assert_eq!(ray_color(&ray, sky(), &world, 10, &mut rng), sky());
    }

    #[test]
    fn looking_at_light_sees_emission() {
        let (world, _) = lit_floor(gray_floor());
        let mut rng = SmallRng::seed_from_u64(0);
        let up = Ray::new(Vec3A::new(0.0, 0.5, 0.0), Vec3A::Y, 0.0);
        assert_eq!(ray_color(&up, sky(), &world, 1, &mut rng), Color::splat(EMISSION));
    }

    #[test]
    fn one_diffuse_bounce_under_uniform_light() {
        let (world, _) = lit_floor(gray_floor());
        let mut rng = SmallRng::seed_from_u64(1);
        let expected = ALBEDO * EMISSION;
        for _ in 0..1000 {
            let c = ray_color(&down(), sky(), &world, 2, &mut rng);
            // cosine sampling cancels the Lambertian density exactly
            assert!((c.x - expected).abs() < 1e-3 * expected, "sample was {c}");
            assert_eq!(c.x, c.y);
        }
    }

    #[test]
    fn depth_counts_path_segments() {
        // the camera ray uses the only segment, so the light is never reached
        let (world, _) = lit_floor(gray_floor());
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..100 {
            assert_eq!(ray_color(&down(), sky(), &world, 1, &mut rng), colors::BLACK);
        }
    }

    #[test]
    fn mixture_sampling_converges_to_same_radiance() {
        let (world, lights) = lit_floor(gray_floor());
        let integrator = Integrator::new(sky(), 2).with_strategy(SamplingStrategy::Mixture, lights);
        let mut rng = SmallRng::seed_from_u64(2);

        let n = 20_000;
        let mut sum = Color::ZERO;
        for _ in 0..n {
            let c = integrator.radiance(&down(), &world, &mut rng);
            assert!(c.is_finite() && c.min_element() >= 0.0, "sample was {c}");
            sum += c;
        }
        let mean = sum.x / n as f32;
        let expected = ALBEDO * EMISSION;
        assert!((mean - expected).abs() < 0.05 * expected, "mean was {mean}");
    }

    #[test]
    fn mixture_without_lights_falls_back_to_cosine() {
        let (world, _) = lit_floor(gray_floor());
        let integrator = Integrator::new(sky(), 2).with_strategy(SamplingStrategy::Mixture, vec![]);
        let mut rng = SmallRng::seed_from_u64(3);
        let c = integrator.radiance(&down(), &world, &mut rng);
        assert!((c.x - ALBEDO * EMISSION).abs() < 1e-3);
    }

    #[test]
    fn mirror_reflects_light_exactly() {
        let (world, _) = lit_floor(Material::Metal {
            albedo: Color::new(0.9, 0.5, 0.1),
        });
        let mut rng = SmallRng::seed_from_u64(4);
        let c = ray_color(&down(), sky(), &world, 2, &mut rng);
        assert!(c.abs_diff_eq(Color::new(0.9, 0.5, 0.1) * EMISSION, 1e-5), "got {c}");

        // one bounce short of reaching the light
        let c = ray_color(&down(), sky(), &world, 1, &mut rng);
        assert_eq!(c, colors::BLACK);
    }
}
