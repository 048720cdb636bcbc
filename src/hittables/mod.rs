//! The [Hittable] intersection contract and the primitives implementing it

use std::sync::Arc;

use glam::Vec3A;
use rand::{Rng, RngCore};

use crate::{bounds::BoundingBox, material::Material, ray::Ray};

mod medium;
mod quad_box;
mod rect;
mod sphere;
mod transform;

pub use self::medium::ConstantMedium;
pub use self::quad_box::QuadBox;
pub use self::rect::{AxisRect, Plane};
pub use self::sphere::{MovingSphere, Sphere};
pub use self::transform::{FlipFace, RotateY, Translate};
pub use crate::bvh::Bvh;

/// Set of data describing a single ray-surface intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub point: Vec3A,
    /// Surface normal at the intersection, always opposing the incoming ray
    pub normal: Vec3A,
    /// Ray parameter at which the intersection occurs
    pub t: f32,
    /// Texture coordinates
    pub u: f32,
    pub v: f32,
    /// Whether the ray hit the outward-facing side of the surface
    pub front_face: bool,
    /// Material of the surface that was hit
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Creates a record for an intersection at `t` along `ray`.
    ///
    /// `outward_normal` is assumed to be of unit length and is flipped if
    /// needed so the stored normal opposes the ray.
    pub fn new(
        ray: &Ray,
        t: f32,
        outward_normal: Vec3A,
        (u, v): (f32, f32),
        material: &'a Material,
    ) -> Self {
        let mut rec = Self {
            point: ray.at(t),
            normal: outward_normal,
            t,
            u,
            v,
            front_face: true,
            material,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Orients the stored normal against `ray` and records which side was hit.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3A) {
        self.front_face = ray.direction.dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Anything a [Ray] can intersect.
///
/// `rng` is threaded through because some hittables (participating media)
/// decide stochastically whether a ray interacts with them.
pub trait Hittable: Send + Sync {
    /// Returns the nearest intersection with `t` in `[t_min, t_max]`, if any.
    fn hit(&self, ray: &Ray, t_min: f32, t_max: f32, rng: &mut dyn RngCore)
        -> Option<HitRecord<'_>>;

    /// Returns a box enclosing the hittable over the shutter interval
    /// `[time0, time1]`, or `None` if it is unbounded.
    fn bounding_box(&self, time0: f32, time1: f32) -> Option<BoundingBox>;

    /// Solid-angle density of sampling `direction` from `origin` towards this hittable.
    ///
    /// Hittables that cannot be sampled report a density of zero. Anything
    /// placed in a light list must override this together with
    /// [random_direction](Hittable::random_direction), or mixture sampling
    /// draws directions it does not account for.
    fn pdf_value(&self, _origin: Vec3A, _direction: Vec3A, _rng: &mut dyn RngCore) -> f32 {
        0.0
    }

    /// Samples a direction from `origin` towards this hittable.
    ///
    /// The default, +X, is only a placeholder for hittables without light sampling.
    fn random_direction(&self, _origin: Vec3A, _rng: &mut dyn RngCore) -> Vec3A {
        Vec3A::X
    }

    /// Moves the hittable behind a shared pointer.
    fn wrap(self) -> Arc<dyn Hittable>
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

/// An unordered collection of hittables, searched linearly.
pub type HittableList = Vec<Arc<dyn Hittable>>;

impl Hittable for HittableList {
    fn hit(
        &self,
        ray: &Ray,
        t_min: f32,
        t_max: f32,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;
        let mut closest_so_far = t_max;

        for object in self.iter() {
            if let Some(rec) = object.hit(ray, t_min, closest_so_far, rng) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Option<BoundingBox> {
        if self.is_empty() {
            return None;
        }

        // a single unbounded member makes the whole list unbounded
        let mut boxes = self.iter().map(|o| o.bounding_box(time0, time1));
        let first = boxes.next().flatten()?;
        boxes.try_fold(first, |acc, b| Some(acc.union(b?)))
    }

    fn pdf_value(&self, origin: Vec3A, direction: Vec3A, rng: &mut dyn RngCore) -> f32 {
        if self.is_empty() {
            return 0.0;
        }

        let weight = 1.0 / self.len() as f32;
        let mut sum = 0.0;
        for object in self.iter() {
            sum += weight * object.pdf_value(origin, direction, rng);
        }
        sum
    }

    fn random_direction(&self, origin: Vec3A, rng: &mut dyn RngCore) -> Vec3A {
        if self.is_empty() {
            return Vec3A::X;
        }

        let idx = rng.gen_range(0..self.len());
        self[idx].random_direction(origin, rng)
    }
}

/// Returns whichever of the two records is nearer along the ray.
pub(crate) fn nearest<'a>(a: Option<HitRecord<'a>>, b: Option<HitRecord<'a>>) -> Option<HitRecord<'a>> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if a.t <= b.t { a } else { b }),
        (a, b) => a.or(b),
    }
}
