//! Probability densities over directions, used to importance-sample scattering

use std::f32::consts::PI;

use glam::Vec3A;
use rand::{Rng, RngCore};

use crate::{hittables::Hittable, onb::Onb, utils::random::rand_cosine_direction};

/// Cosine-weighted hemisphere around a normal
#[derive(Debug, Clone, Copy)]
pub struct CosinePdf {
    uvw: Onb,
}

impl CosinePdf {
    pub fn new(w: Vec3A) -> Self {
        Self {
            uvw: Onb::build_from_w(w),
        }
    }

    /// `cos(theta) / pi`, zero below the hemisphere
    pub fn value(&self, direction: Vec3A) -> f32 {
        let cosine = direction.normalize_or_zero().dot(self.uvw.w);
        if cosine <= 0.0 {
            0.0
        } else {
            cosine / PI
        }
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3A {
        self.uvw.local(rand_cosine_direction(rng))
    }
}

/// Directions from `origin` towards a hittable, typically a light.
#[derive(Clone, Copy)]
pub struct HittablePdf<'a> {
    target: &'a dyn Hittable,
    origin: Vec3A,
}

impl<'a> HittablePdf<'a> {
    pub fn new(target: &'a dyn Hittable, origin: Vec3A) -> Self {
        Self { target, origin }
    }

    pub fn value(&self, direction: Vec3A, rng: &mut dyn RngCore) -> f32 {
        self.target.pdf_value(self.origin, direction, rng)
    }

    pub fn generate(&self, rng: &mut dyn RngCore) -> Vec3A {
        self.target.random_direction(self.origin, rng)
    }
}

/// A sampling strategy for scattered directions.
pub enum Pdf<'a> {
    Cosine(CosinePdf),
    Hittable(HittablePdf<'a>),
    /// Equal-weight blend of two strategies
    Mixture(Box<Pdf<'a>>, Box<Pdf<'a>>),
}

impl<'a> Pdf<'a> {
    pub fn mixture(a: Pdf<'a>, b: Pdf<'a>) -> Self {
        Pdf::Mixture(Box::new(a), Box::new(b))
    }

    /// Density of generating `direction`.
    pub fn value(&self, direction: Vec3A, rng: &mut dyn RngCore) -> f32 {
        match self {
            Pdf::Cosine(pdf) => pdf.value(direction),
            Pdf::Hittable(pdf) => pdf.value(direction, rng),
            Pdf::Mixture(a, b) => 0.5 * a.value(direction, rng) + 0.5 * b.value(direction, rng),
        }
    }

    /// Draws one direction.
    pub fn generate(&self, rng: &mut dyn RngCore) -> Vec3A {
        match self {
            Pdf::Cosine(pdf) => pdf.generate(rng),
            Pdf::Hittable(pdf) => pdf.generate(rng),
            Pdf::Mixture(a, b) => {
                if rng.gen_bool(0.5) {
                    a.generate(rng)
                } else {
                    b.generate(rng)
                }
            }
        }
    }
}

impl std::fmt::Debug for Pdf<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pdf::Cosine(pdf) => write!(f, "Pdf::Cosine {{{:?}}}", pdf.uvw.w),
            Pdf::Hittable(pdf) => write!(f, "Pdf::Hittable {{origin: {:?}}}", pdf.origin),
            Pdf::Mixture(a, b) => write!(f, "Pdf::Mixture {{{a:?}, {b:?}}}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        color::Color,
        hittables::{AxisRect, HittableList, Sphere},
        material::Material,
        textures::SolidColor,
        utils::random::rand_vec3_on_unit_sphere,
    };
    use rand::{rngs::SmallRng, SeedableRng};

    const SAMPLES: usize = 200_000;

    /// Monte-Carlo estimate of the integral of `pdf` over the unit sphere
    fn integrate(pdf: &Pdf, rng: &mut SmallRng) -> f32 {
        let mut sum = 0.0;
        for _ in 0..SAMPLES {
            let d = rand_vec3_on_unit_sphere(rng);
            sum += pdf.value(d, rng);
        }
        4.0 * PI * sum / SAMPLES as f32
    }

    fn light() -> Arc<Material> {
        Arc::new(Material::DiffuseLight {
            emit: Arc::new(SolidColor::new(Color::splat(4.0))),
        })
    }

    #[test]
    fn cosine_integrates_to_one() {
        let mut rng = SmallRng::seed_from_u64(1);
        let pdf = Pdf::Cosine(CosinePdf::new(Vec3A::new(0.3, 1.0, -0.2)));
        let total = integrate(&pdf, &mut rng);
        assert!((total - 1.0).abs() < 0.02, "integral was {total}");
    }

    #[test]
    fn cosine_generates_into_hemisphere() {
        let mut rng = SmallRng::seed_from_u64(2);
        let pdf = CosinePdf::new(-Vec3A::Z);
        for _ in 0..1000 {
            let d = pdf.generate(&mut rng);
            assert!(d.z <= 1e-6);
        }
        assert_eq!(pdf.value(Vec3A::Z), 0.0);
        assert!((pdf.value(-Vec3A::Z) - 1.0 / PI).abs() < 1e-6);
    }

    #[test]
    fn light_densities_integrate_to_one() {
        let mut rng = SmallRng::seed_from_u64(3);
        let lights: HittableList = vec![
            AxisRect::xz(-1.0, 1.0, -1.0, 1.0, 2.0, &light()).wrap(),
            Sphere::new(Vec3A::new(3.0, 0.0, 0.0), 1.0, &light()).wrap(),
        ];
        for target in lights.iter() {
            let pdf = Pdf::Hittable(HittablePdf::new(target.as_ref(), Vec3A::ZERO));
            let total = integrate(&pdf, &mut rng);
            assert!((total - 1.0).abs() < 0.05, "integral was {total}");
        }

        let pdf = Pdf::Hittable(HittablePdf::new(&lights, Vec3A::ZERO));
        let total = integrate(&pdf, &mut rng);
        assert!((total - 1.0).abs() < 0.05, "integral was {total}");
    }

    #[test]
    fn mixture_is_average_and_integrates_to_one() {
        let mut rng = SmallRng::seed_from_u64(4);
        let rect = AxisRect::xz(-1.0, 1.0, -1.0, 1.0, 2.0, &light());
        let pdf = Pdf::mixture(
            Pdf::Hittable(HittablePdf::new(&rect, Vec3A::ZERO)),
            Pdf::Cosine(CosinePdf::new(Vec3A::Y)),
        );

        let up = pdf.value(Vec3A::Y, &mut rng);
        let expected = 0.5 * rect.pdf_value(Vec3A::ZERO, Vec3A::Y, &mut rng) + 0.5 / PI;
        assert!((up - expected).abs() < 1e-5);

        let total = integrate(&pdf, &mut rng);
        assert!((total - 1.0).abs() < 0.05, "integral was {total}");

        for _ in 0..1000 {
            let d = pdf.generate(&mut rng);
            assert!(pdf.value(d, &mut rng) > 0.0);
        }
    }
}
