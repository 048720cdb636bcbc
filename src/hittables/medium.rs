//! Homogeneous participating media

use std::sync::Arc;

use glam::Vec3A;
use rand::RngCore;
use rand_distr::{Distribution, Exp};

use crate::{
    bounds::BoundingBox,
    error::SceneError,
    hittables::{HitRecord, Hittable},
    material::Material,
    ray::Ray,
    textures::Texture,
};

/// A volume of constant density filling the inside of `boundary`, such as smoke or fog.
///
/// The boundary must be closed and convex: a ray is expected to enter and
/// leave it exactly once.
pub struct ConstantMedium {
    boundary: Arc<dyn Hittable>,
    phase_function: Arc<Material>,
    free_flight: Exp<f32>,
}

impl ConstantMedium {
    pub fn new(
        boundary: &Arc<dyn Hittable>,
        albedo: &Arc<dyn Texture>,
        density: f32,
    ) -> Result<Self, SceneError> {
        if !density.is_finite() || density <= 0.0 {
            return Err(SceneError::InvalidDensity(density));
        }
        let free_flight = Exp::new(density).map_err(|_| SceneError::InvalidDensity(density))?;

        Ok(Self {
            boundary: Arc::clone(boundary),
            phase_function: Arc::new(Material::Isotropic {
                albedo: Arc::clone(albedo),
            }),
            free_flight,
        })
    }
}

impl Hittable for ConstantMedium {
    fn hit(
        &self,
        ray: &Ray,
        t_min: f32,
        t_max: f32,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'_>> {
        // entry and exit along the whole line, not just the queried interval
        let enter = self
            .boundary
            .hit(ray, f32::NEG_INFINITY, f32::INFINITY, rng)?;
        let exit = self
            .boundary
            .hit(ray, enter.t + 0.0001, f32::INFINITY, rng)?;

        let t_enter = enter.t.max(t_min);
        let t_exit = exit.t.min(t_max);
        if t_enter >= t_exit {
            return None;
        }
        let t_enter = t_enter.max(0.0);

        let ray_length = ray.direction.length();
        let distance_inside_boundary = (t_exit - t_enter) * ray_length;
        let hit_distance = self.free_flight.sample(rng);
        if hit_distance > distance_inside_boundary {
            return None;
        }

        let t = t_enter + hit_distance / ray_length;
        Some(HitRecord {
            point: ray.at(t),
            // normal and facing are meaningless inside a volume
            normal: Vec3A::X,
            t,
            u: 0.0,
            v: 0.0,
            front_face: true,
            material: &self.phase_function,
        })
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Option<BoundingBox> {
        self.boundary.bounding_box(time0, time1)
    }
}
