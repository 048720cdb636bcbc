//! Spheres, static and moving

use std::{f32::consts::PI, sync::Arc};

use glam::Vec3A;
use rand::RngCore;

use crate::{
    bounds::{surrounding_box, BoundingBox},
    hittables::{HitRecord, Hittable},
    material::Material,
    onb::Onb,
    ray::Ray,
    utils::random::{cone_cos_theta_max, rand_to_sphere},
};

/// Texture coordinates of a point on the unit sphere centered at the origin.
///
/// `u` wraps around the y axis starting from -x, `v` runs from -y to +y.
fn sphere_uv(p: Vec3A) -> (f32, f32) {
    let theta = (-p.y).clamp(-1.0, 1.0).acos();
    let phi = (-p.z).atan2(p.x) + PI;
    (phi / (2.0 * PI), theta / PI)
}

/// Solves the ray-sphere quadratic, returning the nearest root in `[t_min, t_max]`.
fn nearest_root(ray: &Ray, center: Vec3A, radius: f32, t_min: f32, t_max: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let a = ray.direction.length_squared();
    let half_b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;

    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrtd = discriminant.sqrt();

    // Find the nearest root that lies in the acceptable range.
    let in_range = |t: f32| (t_min..=t_max).contains(&t);
    let root = (-half_b - sqrtd) / a;
    if in_range(root) {
        return Some(root);
    }
    let root = (-half_b + sqrtd) / a;
    in_range(root).then_some(root)
}

fn hit_sphere<'a>(
    ray: &Ray,
    center: Vec3A,
    radius: f32,
    material: &'a Material,
    t_min: f32,
    t_max: f32,
) -> Option<HitRecord<'a>> {
    let t = nearest_root(ray, center, radius, t_min, t_max)?;
    let outward_normal = (ray.at(t) - center) / radius;
    Some(HitRecord::new(
        ray,
        t,
        outward_normal,
        sphere_uv(outward_normal),
        material,
    ))
}

/// A sphere with a fixed center
#[derive(Debug)]
pub struct Sphere {
    center: Vec3A,
    radius: f32,
    material: Arc<Material>,
}

impl Sphere {
    /// Creates a new Sphere.
    pub fn new(center: Vec3A, radius: f32, material: &Arc<Material>) -> Self {
        Self {
            center,
            radius,
            material: Arc::clone(material),
        }
    }
}

impl Hittable for Sphere {
    fn hit(
        &self,
        ray: &Ray,
        t_min: f32,
        t_max: f32,
        _rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'_>> {
        hit_sphere(ray, self.center, self.radius, &self.material, t_min, t_max)
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Option<BoundingBox> {
        let r = Vec3A::splat(self.radius.abs());
        Some(BoundingBox::new(self.center - r, self.center + r))
    }

    fn pdf_value(&self, origin: Vec3A, direction: Vec3A, rng: &mut dyn RngCore) -> f32 {
        let probe = Ray::new(origin, direction, 0.0);
        if self.hit(&probe, 0.001, f32::INFINITY, rng).is_none() {
            return 0.0;
        }

        let cos_theta_max = cone_cos_theta_max(self.radius, (self.center - origin).length_squared());
        let solid_angle = 2.0 * PI * (1.0 - cos_theta_max);
        1.0 / solid_angle
    }

    fn random_direction(&self, origin: Vec3A, rng: &mut dyn RngCore) -> Vec3A {
        let direction = self.center - origin;
        let uvw = Onb::build_from_w(direction);
        uvw.local(rand_to_sphere(rng, self.radius, direction.length_squared()))
    }
}

/// A sphere whose center moves linearly from `center0` at `time0` to `center1` at `time1`.
#[derive(Debug)]
pub struct MovingSphere {
    center0: Vec3A,
    center1: Vec3A,
    time0: f32,
    time1: f32,
    radius: f32,
    material: Arc<Material>,
}

impl MovingSphere {
    /// Creates a new MovingSphere.
    pub fn new(
        center0: Vec3A,
        center1: Vec3A,
        time0: f32,
        time1: f32,
        radius: f32,
        material: &Arc<Material>,
    ) -> Self {
        Self {
            center0,
            center1,
            time0,
            time1,
            radius,
            material: Arc::clone(material),
        }
    }

    /// Center of the sphere at the given instant.
    pub fn center(&self, time: f32) -> Vec3A {
        let span = self.time1 - self.time0;
        if span == 0.0 {
            return self.center0;
        }
        self.center0 + ((time - self.time0) / span) * (self.center1 - self.center0)
    }
}

impl Hittable for MovingSphere {
    fn hit(
        &self,
        ray: &Ray,
        t_min: f32,
        t_max: f32,
        _rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'_>> {
        hit_sphere(
            ray,
            self.center(ray.time),
            self.radius,
            &self.material,
            t_min,
            t_max,
        )
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Option<BoundingBox> {
        let r = Vec3A::splat(self.radius.abs());
        let c0 = self.center(time0);
        let c1 = self.center(time1);
        let box0 = BoundingBox::new(c0 - r, c0 + r);
        let box1 = BoundingBox::new(c1 - r, c1 + r);
        Some(surrounding_box(box0, box1))
    }
}
