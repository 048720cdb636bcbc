//! Axis-aligned rectangles

use std::sync::Arc;

use glam::Vec3A;
use rand::{Rng, RngCore};

use crate::{
    bounds::{BoundingBox, FLAT_AXIS_PADDING},
    hittables::{HitRecord, Hittable},
    material::Material,
    ray::Ray,
    utils::Axis,
};

/// The coordinate plane a rectangle lies parallel to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    XY,
    XZ,
    YZ,
}

impl Plane {
    /// Returns `(a, b, k)`: the two in-plane axes and the fixed axis.
    fn axes(self) -> (Axis, Axis, Axis) {
        match self {
            Plane::XY => (0, 1, 2),
            Plane::XZ => (0, 2, 1),
            Plane::YZ => (1, 2, 0),
        }
    }
}

/// A rectangle `[a0, a1] x [b0, b1]` lying in the plane `k` along the fixed axis.
///
/// Its outward normal points along the positive fixed axis.
#[derive(Debug)]
pub struct AxisRect {
    plane: Plane,
    a0: f32,
    a1: f32,
    b0: f32,
    b1: f32,
    k: f32,
    material: Arc<Material>,
}

impl AxisRect {
    /// Creates a new rectangle; the bounds of each in-plane axis may be given in any order.
    pub fn new(plane: Plane, a: (f32, f32), b: (f32, f32), k: f32, material: &Arc<Material>) -> Self {
        Self {
            plane,
            a0: a.0.min(a.1),
            a1: a.0.max(a.1),
            b0: b.0.min(b.1),
            b1: b.0.max(b.1),
            k,
            material: Arc::clone(material),
        }
    }

    /// A rectangle in the plane `z = k`
    pub fn xy(x0: f32, x1: f32, y0: f32, y1: f32, k: f32, material: &Arc<Material>) -> Self {
        Self::new(Plane::XY, (x0, x1), (y0, y1), k, material)
    }

    /// A rectangle in the plane `y = k`
    pub fn xz(x0: f32, x1: f32, z0: f32, z1: f32, k: f32, material: &Arc<Material>) -> Self {
        Self::new(Plane::XZ, (x0, x1), (z0, z1), k, material)
    }

    /// A rectangle in the plane `x = k`
    pub fn yz(y0: f32, y1: f32, z0: f32, z1: f32, k: f32, material: &Arc<Material>) -> Self {
        Self::new(Plane::YZ, (y0, y1), (z0, z1), k, material)
    }

    fn area(&self) -> f32 {
        (self.a1 - self.a0) * (self.b1 - self.b0)
    }

    /// Builds a point from in-plane coordinates and the fixed coordinate.
    fn point(&self, a: f32, b: f32, k: f32) -> Vec3A {
        let (ia, ib, ik) = self.plane.axes();
        let mut p = Vec3A::ZERO;
        p[ia] = a;
        p[ib] = b;
        p[ik] = k;
        p
    }
}

impl Hittable for AxisRect {
    fn hit(
        &self,
        ray: &Ray,
        t_min: f32,
        t_max: f32,
        _rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'_>> {
        let (ia, ib, ik) = self.plane.axes();

        // NaN and infinities from parallel rays fall outside the range too
        let t = (self.k - ray.origin[ik]) / ray.direction[ik];
        if !(t_min..=t_max).contains(&t) {
            return None;
        }

        let a = ray.origin[ia] + t * ray.direction[ia];
        let b = ray.origin[ib] + t * ray.direction[ib];
        if a < self.a0 || a > self.a1 || b < self.b0 || b > self.b1 {
            return None;
        }

        let uv = (
            (a - self.a0) / (self.a1 - self.a0),
            (b - self.b0) / (self.b1 - self.b0),
        );
        let mut outward_normal = Vec3A::ZERO;
        outward_normal[ik] = 1.0;

        Some(HitRecord::new(ray, t, outward_normal, uv, &self.material))
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Option<BoundingBox> {
        let (_, _, ik) = self.plane.axes();
        let bbox = BoundingBox::new(
            self.point(self.a0, self.b0, self.k),
            self.point(self.a1, self.b1, self.k),
        );
        Some(bbox.padded(ik, FLAT_AXIS_PADDING))
    }

    fn pdf_value(&self, origin: Vec3A, direction: Vec3A, rng: &mut dyn RngCore) -> f32 {
        let probe = Ray::new(origin, direction, 0.0);
        let Some(rec) = self.hit(&probe, 0.001, f32::INFINITY, rng) else {
            return 0.0;
        };

        let length_squared = direction.length_squared();
        let distance_squared = rec.t * rec.t * length_squared;
        let cosine = direction.dot(rec.normal).abs() / length_squared.sqrt();
        if cosine <= f32::EPSILON {
            return 0.0;
        }

        distance_squared / (cosine * self.area())
    }

    fn random_direction(&self, origin: Vec3A, rng: &mut dyn RngCore) -> Vec3A {
        let a = rng.gen_range(self.a0..=self.a1);
        let b = rng.gen_range(self.b0..=self.b1);
        self.point(a, b, self.k) - origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{color::Color, textures::SolidColor};
    use rand::{rngs::SmallRng, SeedableRng};

    fn gray() -> Arc<Material> {
        Arc::new(Material::Lambertian {
            albedo: Arc::new(SolidColor::new(Color::splat(0.5))),
        })
    }

    #[test]
    fn each_plane_is_hit_through_its_fixed_axis() {
        let mat = gray();
        let mut rng = SmallRng::seed_from_u64(0);
        let cases = [
            (AxisRect::xy(-1.0, 1.0, -1.0, 1.0, 2.0, &mat), Vec3A::Z),
            (AxisRect::xz(-1.0, 1.0, -1.0, 1.0, 2.0, &mat), Vec3A::Y),
            (AxisRect::yz(-1.0, 1.0, -1.0, 1.0, 2.0, &mat), Vec3A::X),
        ];
        for (rect, axis) in cases {
            let ray = Ray::new(Vec3A::ZERO, axis, 0.0);
            let rec = rect.hit(&ray, 0.001, f32::INFINITY, &mut rng).unwrap();
            assert!((rec.t - 2.0).abs() < 1e-6);
            assert!(!rec.front_face, "ray travels along the outward normal");
            assert_eq!(rec.normal, -axis);
            assert!((rec.u - 0.5).abs() < 1e-6 && (rec.v - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn misses_outside_extent_and_parallel() {
        let rect = AxisRect::xz(0.0, 1.0, 0.0, 1.0, 0.0, &gray());
        let mut rng = SmallRng::seed_from_u64(0);
        let outside = Ray::new(Vec3A::new(2.0, 1.0, 0.5), -Vec3A::Y, 0.0);
        assert!(rect.hit(&outside, 0.001, f32::INFINITY, &mut rng).is_none());
        let parallel = Ray::new(Vec3A::new(0.5, 1.0, 0.5), Vec3A::X, 0.0);
        assert!(rect.hit(&parallel, 0.001, f32::INFINITY, &mut rng).is_none());
    }

    #[test]
    fn bounding_box_is_padded() {
        let rect = AxisRect::xz(0.0, 2.0, 0.0, 3.0, 5.0, &gray());
        let bbox = rect.bounding_box(0.0, 1.0).unwrap();
        assert!(bbox.min.y < 5.0 && bbox.max.y > 5.0);
        assert_eq!(bbox.max.x, 2.0);
        assert_eq!(bbox.max.z, 3.0);
    }

    #[test]
    fn light_sampling_density() {
        let rect = AxisRect::xz(-1.0, 1.0, -1.0, 1.0, 1.0, &gray());
        let mut rng = SmallRng::seed_from_u64(2);
        // straight up: distance 1, cosine 1, area 4
        let pdf = rect.pdf_value(Vec3A::ZERO, Vec3A::Y, &mut rng);
        assert!((pdf - 0.25).abs() < 1e-5);

        for _ in 0..100 {
            let d = rect.random_direction(Vec3A::ZERO, &mut rng);
            assert!((d.y - 1.0).abs() < 1e-6);
            assert!(rect.pdf_value(Vec3A::ZERO, d, &mut rng) > 0.0);
        }
    }
}
