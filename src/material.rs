//! Implementation of material types

use std::{f32::consts::PI, sync::Arc};

use glam::Vec3A;
use rand::Rng;

use crate::{
    color::{colors, Color},
    hittables::HitRecord,
    pdf::{CosinePdf, Pdf},
    ray::Ray,
    textures::Texture,
    utils::random::{rand_vec3_in_unit_sphere, rand_vec3_on_unit_sphere},
};

/// Returns a reflected ray direction based on the given normal
///
/// Performs the following computation: `v - 2 * v.dot(n) * n`
#[inline]
fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    v - n * v.dot(n) * 2.0
}

/// Returns a refracted ray direction using the given normal
/// and the ratio between two refractive indices.
///
/// See [Shirley's RTiOW's section on Snell's Law](https://raytracing.github.io/books/RayTracingInOneWeekend.html#dielectrics/snell'slaw) for more information
#[inline]
fn refract(uv: Vec3A, n: Vec3A, eta_ratio: f32) -> Vec3A {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_perp = eta_ratio * (uv + cos_theta * n);
    let r_para = (1.0 - r_perp.length_squared()).abs().sqrt() * -1.0 * n;
    r_perp + r_para
}

/// Computes reflectance using Schlick's approximation
#[inline]
fn reflectance(cosine: f32, refract_idx: f32) -> f32 {
    let r0 = (1.0 - refract_idx) / (1.0 + refract_idx);
    let r0_squared = r0 * r0;
    r0_squared + (1.0 - r0_squared) * (1.0 - cosine).powi(5)
}

/// Enumeration of possible material types.
#[derive(Debug)]
pub enum Material {
    /// An approximation of a diffuse, or matte, material.
    ///
    /// See the [Wikipedia page on Lambertian reflectance](https://en.wikipedia.org/wiki/Lambertian_reflectance) for more information.
    Lambertian { albedo: Arc<dyn Texture> },
    /// A perfect mirror tinted by `albedo`.
    Metal { albedo: Color },
    /// A mirror whose reflections are blurred by up to `fuzz` (in `[0, 1]`).
    FuzzyMetal { albedo: Color, fuzz: f32 },
    /// A glass material that scatters rays based on the given refractive index.
    Dielectric { refract_index: f32 },
    /// A one-sided emitter; only its front face gives off light.
    DiffuseLight { emit: Arc<dyn Texture> },
    /// Scatters uniformly in every direction; the phase function of participating media.
    Isotropic { albedo: Arc<dyn Texture> },
}

/// How a scattered ray continues.
#[derive(Debug)]
pub enum ScatterKind {
    /// A single, already chosen continuation ray
    Specular(Ray),
    /// A distribution to draw the continuation direction from
    Diffuse(Pdf<'static>),
}

/// Set of data returned on a [Material]'s scattering
#[derive(Debug)]
pub struct ScatterRecord {
    /// The attenuation at the point of intersection
    pub attenuation: Color,
    pub kind: ScatterKind,
}

impl ScatterRecord {
    pub fn is_specular(&self) -> bool {
        matches!(self.kind, ScatterKind::Specular(_))
    }
}

impl Material {
    /// Creates a [Material::FuzzyMetal], clamping `fuzz` into `[0, 1]`.
    pub fn fuzzy_metal(albedo: Color, fuzz: f32) -> Self {
        Material::FuzzyMetal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Describes how the material scatters `ray` at `rec`.
    ///
    /// Returns `None` if the ray is absorbed.
    pub fn scatter<R: Rng + ?Sized>(
        &self,
        ray: &Ray,
        rec: &HitRecord,
        rng: &mut R,
    ) -> Option<ScatterRecord> {
        let normed_dir = ray.direction.normalize_or_zero();
        match self {
            Material::Lambertian { albedo } => Some(ScatterRecord {
                attenuation: albedo.color(rec.u, rec.v, rec.point),
                kind: ScatterKind::Diffuse(Pdf::Cosine(CosinePdf::new(rec.normal))),
            }),
            Material::Metal { albedo } => {
                let reflected = reflect(normed_dir, rec.normal);
                Some(ScatterRecord {
                    attenuation: *albedo,
                    kind: ScatterKind::Specular(Ray::new(rec.point, reflected, ray.time)),
                })
            }
            Material::FuzzyMetal { albedo, fuzz } => {
                let reflected = reflect(normed_dir, rec.normal);
                let direction = reflected + *fuzz * rand_vec3_in_unit_sphere(rng);

                // fuzz pushed the reflection below the surface
                (direction.dot(rec.normal) > 0.0).then(|| ScatterRecord {
                    attenuation: *albedo,
                    kind: ScatterKind::Specular(Ray::new(rec.point, direction, ray.time)),
                })
            }
            Material::Dielectric { refract_index } => {
                let refract_ratio = if rec.front_face {
                    1.0 / refract_index
                } else {
                    *refract_index
                };

                let cos_theta = (-normed_dir).dot(rec.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

                let no_refract = refract_ratio * sin_theta > 1.0;
                let do_reflect = reflectance(cos_theta, refract_ratio) > rng.gen();
                let direction = if no_refract || do_reflect {
                    // must reflect
                    reflect(normed_dir, rec.normal)
                } else {
                    // can refract
                    refract(normed_dir, rec.normal, refract_ratio)
                };

                Some(ScatterRecord {
                    attenuation: colors::WHITE,
                    kind: ScatterKind::Specular(Ray::new(rec.point, direction, ray.time)),
                })
            }
            Material::DiffuseLight { .. } => None,
            Material::Isotropic { albedo } => Some(ScatterRecord {
                attenuation: albedo.color(rec.u, rec.v, rec.point),
                kind: ScatterKind::Specular(Ray::new(
                    rec.point,
                    rand_vec3_on_unit_sphere(rng),
                    ray.time,
                )),
            }),
        }
    }

    /// Density with which the material itself scatters towards `scattered`.
    ///
    /// Specular materials never go through a density and report 0.
    pub fn scattering_pdf(&self, _ray: &Ray, rec: &HitRecord, scattered: &Ray) -> f32 {
        match self {
            Material::Lambertian { .. } => {
                let cosine = rec.normal.dot(scattered.direction.normalize_or_zero());
                cosine.max(0.0) / PI
            }
            Material::Isotropic { .. } => 1.0 / (4.0 * PI),
            _ => 0.0,
        }
    }

    /// Returns the light emitted from the material at `rec`.
    pub fn emitted(&self, _ray: &Ray, rec: &HitRecord) -> Color {
        match self {
            Material::DiffuseLight { emit } if rec.front_face => {
                emit.color(rec.u, rec.v, rec.point)
            }
            // nothing emits unless specifically implemented
            _ => colors::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::textures::SolidColor;
    use rand::{rngs::SmallRng, SeedableRng};

    fn solid(c: f32) -> Arc<dyn Texture> {
        Arc::new(SolidColor::new(Color::splat(c)))
    }

    /// A hit on the plane `y = 0` seen from above
    fn floor_hit<'a>(material: &'a Material, front_face: bool) -> HitRecord<'a> {
        HitRecord {
            point: Vec3A::ZERO,
            normal: Vec3A::Y,
            t: 1.0,
            u: 0.5,
            v: 0.5,
            front_face,
            material,
        }
    }

    fn incoming() -> Ray {
        Ray::new(Vec3A::new(-1.0, 1.0, 0.0), Vec3A::new(1.0, -1.0, 0.0), 0.25)
    }

    #[test]
    fn reflect_mirrors_about_normal() {
        let r = reflect(Vec3A::new(1.0, -1.0, 0.0), Vec3A::Y);
        assert_eq!(r, Vec3A::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn refract_with_unit_ratio_passes_straight_through() {
        let d = Vec3A::new(1.0, -1.0, 0.0).normalize();
        let r = refract(d, Vec3A::Y, 1.0);
        assert!(r.abs_diff_eq(d, 1e-5));
    }

    #[test]
    fn schlick_at_normal_incidence() {
        // ((1 - 1.5) / (1 + 1.5))^2
        assert!((reflectance(1.0, 1.5) - 0.04).abs() < 1e-6);
        assert!((reflectance(0.0, 1.5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn lambertian_is_diffuse() {
        let mat = Material::Lambertian { albedo: solid(0.5) };
        let rec = floor_hit(&mat, true);
        let mut rng = SmallRng::seed_from_u64(0);
        let srec = mat.scatter(&incoming(), &rec, &mut rng).unwrap();
        assert!(!srec.is_specular());
        assert_eq!(srec.attenuation, Color::splat(0.5));

        let up = Ray::new(Vec3A::ZERO, Vec3A::Y, 0.0);
        let down = Ray::new(Vec3A::ZERO, -Vec3A::Y, 0.0);
        assert!((mat.scattering_pdf(&incoming(), &rec, &up) - 1.0 / PI).abs() < 1e-6);
        assert_eq!(mat.scattering_pdf(&incoming(), &rec, &down), 0.0);
        assert_eq!(mat.emitted(&incoming(), &rec), colors::BLACK);
    }

    #[test]
    fn metal_reflects_exactly() {
        let mat = Material::Metal {
            albedo: Color::new(0.8, 0.6, 0.2),
        };
        let rec = floor_hit(&mat, true);
        let mut rng = SmallRng::seed_from_u64(0);
        let srec = mat.scatter(&incoming(), &rec, &mut rng).unwrap();
        assert!(srec.is_specular());
        assert_eq!(srec.attenuation, Color::new(0.8, 0.6, 0.2));
        match srec.kind {
            ScatterKind::Specular(ray) => {
                let expected = Vec3A::new(1.0, 1.0, 0.0).normalize();
                assert!(ray.direction.abs_diff_eq(expected, 1e-5));
                assert_eq!(ray.time, 0.25);
            }
            ScatterKind::Diffuse(_) => unreachable!(),
        }
        assert_eq!(mat.scattering_pdf(&incoming(), &rec, &incoming()), 0.0);
    }

    #[test]
    fn fuzzy_metal_never_scatters_into_surface() {
        let mat = Material::fuzzy_metal(Color::ONE, 3.0);
        assert!(matches!(mat, Material::FuzzyMetal { fuzz, .. } if fuzz == 1.0));

        // grazing incidence so fuzz regularly pushes rays below the surface
        let grazing = Ray::new(Vec3A::new(-1.0, 0.05, 0.0), Vec3A::new(1.0, -0.05, 0.0), 0.0);
        let rec = floor_hit(&mat, true);
        let mut rng = SmallRng::seed_from_u64(3);
        let mut absorbed = 0;
        for _ in 0..1000 {
            match mat.scatter(&grazing, &rec, &mut rng) {
                Some(ScatterRecord {
                    kind: ScatterKind::Specular(ray),
                    ..
                }) => assert!(ray.direction.dot(Vec3A::Y) > 0.0),
                Some(_) => unreachable!(),
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn dielectric_total_internal_reflection() {
        let mat = Material::Dielectric { refract_index: 1.5 };
        // leaving glass at 60 degrees from the normal: 1.5 * sin(60) > 1
        let dir = Vec3A::new(60f32.to_radians().sin(), -60f32.to_radians().cos(), 0.0);
        let ray = Ray::new(Vec3A::new(-dir.x, -dir.y, 0.0), dir, 0.0);
        let rec = floor_hit(&mat, false);
        let mut rng = SmallRng::seed_from_u64(0);
        for _ in 0..100 {
            let srec = mat.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(srec.attenuation, colors::WHITE);
            let ScatterKind::Specular(out) = srec.kind else {
                panic!("glass must be specular");
            };
            assert!(out.direction.y > 0.0, "expected reflection, got {}", out.direction);
        }
    }

    #[test]
    fn dielectric_mostly_refracts_head_on() {
        let mat = Material::Dielectric { refract_index: 1.5 };
        let ray = Ray::new(Vec3A::Y, -Vec3A::Y, 0.0);
        let rec = floor_hit(&mat, true);
        let mut rng = SmallRng::seed_from_u64(1);
        let refracted = (0..1000)
            .filter(|_| match mat.scatter(&ray, &rec, &mut rng) {
                Some(ScatterRecord {
                    kind: ScatterKind::Specular(out),
                    ..
                }) => out.direction.y < 0.0,
                _ => false,
            })
            .count();
        // Schlick gives 4% reflectance at normal incidence
        assert!(refracted > 930 && refracted < 990, "{refracted} refracted");
    }

    #[test]
    fn diffuse_light_is_one_sided() {
        let mat = Material::DiffuseLight { emit: solid(4.0) };
        let mut rng = SmallRng::seed_from_u64(0);
        let front = floor_hit(&mat, true);
        let back = floor_hit(&mat, false);
        assert!(mat.scatter(&incoming(), &front, &mut rng).is_none());
        assert_eq!(mat.emitted(&incoming(), &front), Color::splat(4.0));
        assert_eq!(mat.emitted(&incoming(), &back), colors::BLACK);
    }

    #[test]
    fn isotropic_scatters_everywhere() {
        let mat = Material::Isotropic { albedo: solid(0.7) };
        let rec = floor_hit(&mat, true);
        let mut rng = SmallRng::seed_from_u64(5);
        let mut below = 0;
        for _ in 0..1000 {
            let srec = mat.scatter(&incoming(), &rec, &mut rng).unwrap();
            assert!(srec.is_specular());
            if let ScatterKind::Specular(ray) = srec.kind {
                assert!((ray.direction.length() - 1.0).abs() < 1e-4);
                below += usize::from(ray.direction.y < 0.0);
            }
        }
        assert!(below > 400 && below < 600);
        assert!((mat.scattering_pdf(&incoming(), &rec, &incoming()) - 0.25 / PI).abs() < 1e-7);
    }
}
