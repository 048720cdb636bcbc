//! Axis-aligned boxes built from six rectangles

use std::sync::Arc;

use glam::Vec3A;
use rand::RngCore;

use crate::{
    bounds::BoundingBox,
    hittables::{AxisRect, FlipFace, HitRecord, Hittable, HittableList},
    material::Material,
    ray::Ray,
};

/// A closed box between two opposite corners.
///
/// The faces at the minimum corner are wrapped in [FlipFace] so every
/// face's outward normal points away from the box interior.
pub struct QuadBox {
    min: Vec3A,
    max: Vec3A,
    sides: HittableList,
}

impl QuadBox {
    pub fn new(p0: Vec3A, p1: Vec3A, material: &Arc<Material>) -> Self {
        let min = p0.min(p1);
        let max = p0.max(p1);

        let sides: HittableList = vec![
            AxisRect::xy(min.x, max.x, min.y, max.y, max.z, material).wrap(),
            FlipFace::new(AxisRect::xy(min.x, max.x, min.y, max.y, min.z, material).wrap()).wrap(),
            AxisRect::xz(min.x, max.x, min.z, max.z, max.y, material).wrap(),
            FlipFace::new(AxisRect::xz(min.x, max.x, min.z, max.z, min.y, material).wrap()).wrap(),
            AxisRect::yz(min.y, max.y, min.z, max.z, max.x, material).wrap(),
            FlipFace::new(AxisRect::yz(min.y, max.y, min.z, max.z, min.x, material).wrap()).wrap(),
        ];

        Self { min, max, sides }
    }
}

impl Hittable for QuadBox {
    fn hit(
        &self,
        ray: &Ray,
        t_min: f32,
        t_max: f32,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'_>> {
        self.sides.hit(ray, t_min, t_max, rng)
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Option<BoundingBox> {
        Some(BoundingBox::new(self.min, self.max))
    }
}
