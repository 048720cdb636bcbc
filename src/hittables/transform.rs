//! Hittable instances that reposition or reorient the contained hittable

use std::sync::Arc;

use glam::Vec3A;
use rand::RngCore;

use crate::{
    bounds::BoundingBox,
    hittables::{HitRecord, Hittable},
    ray::Ray,
};

/// Recovers the outward normal a record was oriented from.
fn outward_normal(rec: &HitRecord) -> Vec3A {
    if rec.front_face {
        rec.normal
    } else {
        -rec.normal
    }
}

/// A hittable moved by a fixed offset.
pub struct Translate {
    object: Arc<dyn Hittable>,
    offset: Vec3A,
}

impl Translate {
    pub fn new(object: &Arc<dyn Hittable>, offset: Vec3A) -> Self {
        Self {
            object: Arc::clone(object),
            offset,
        }
    }
}

impl Hittable for Translate {
    fn hit(
        &self,
        ray: &Ray,
        t_min: f32,
        t_max: f32,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'_>> {
        let moved = Ray::new(ray.origin - self.offset, ray.direction, ray.time);
        let rec = self.object.hit(&moved, t_min, t_max, rng)?;

        let mut moved_rec = HitRecord {
            point: rec.point + self.offset,
            ..rec
        };
        moved_rec.set_face_normal(&moved, outward_normal(&rec));
        Some(moved_rec)
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Option<BoundingBox> {
        self.object
            .bounding_box(time0, time1)
            .map(|bbox| bbox.translated(self.offset))
    }

    fn pdf_value(&self, origin: Vec3A, direction: Vec3A, rng: &mut dyn RngCore) -> f32 {
        self.object.pdf_value(origin - self.offset, direction, rng)
    }

    fn random_direction(&self, origin: Vec3A, rng: &mut dyn RngCore) -> Vec3A {
        self.object.random_direction(origin - self.offset, rng)
    }
}

/// A hittable rotated about the y axis.
pub struct RotateY {
    object: Arc<dyn Hittable>,
    sin_theta: f32,
    cos_theta: f32,
}

impl RotateY {
    /// Rotates `object` counter-clockwise by `degrees` when looking down the y axis.
    pub fn new(object: &Arc<dyn Hittable>, degrees: f32) -> Self {
        let (sin_theta, cos_theta) = degrees.to_radians().sin_cos();
        Self {
            object: Arc::clone(object),
            sin_theta,
            cos_theta,
        }
    }

    /// World space to object space
    fn to_object(&self, v: Vec3A) -> Vec3A {
        Vec3A::new(
            self.cos_theta * v.x - self.sin_theta * v.z,
            v.y,
            self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }

    /// Object space to world space
    fn to_world(&self, v: Vec3A) -> Vec3A {
        Vec3A::new(
            self.cos_theta * v.x + self.sin_theta * v.z,
            v.y,
            -self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }
}

impl Hittable for RotateY {
    fn hit(
        &self,
        ray: &Ray,
        t_min: f32,
        t_max: f32,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'_>> {
        let rotated = Ray::new(
            self.to_object(ray.origin),
            self.to_object(ray.direction),
            ray.time,
        );
        let rec = self.object.hit(&rotated, t_min, t_max, rng)?;

        let mut world_rec = HitRecord {
            point: self.to_world(rec.point),
            ..rec
        };
        world_rec.set_face_normal(ray, self.to_world(outward_normal(&rec)));
        Some(world_rec)
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Option<BoundingBox> {
        let bbox = self.object.bounding_box(time0, time1)?;

        let (min, max) = bbox.corners().into_iter().map(|c| self.to_world(c)).fold(
            (Vec3A::splat(f32::INFINITY), Vec3A::splat(f32::NEG_INFINITY)),
            |(min, max), c| (min.min(c), max.max(c)),
        );
        Some(BoundingBox::new(min, max))
    }

    // rotations preserve solid angle, so densities carry over unchanged
    fn pdf_value(&self, origin: Vec3A, direction: Vec3A, rng: &mut dyn RngCore) -> f32 {
        self.object
            .pdf_value(self.to_object(origin), self.to_object(direction), rng)
    }

    fn random_direction(&self, origin: Vec3A, rng: &mut dyn RngCore) -> Vec3A {
        self.to_world(self.object.random_direction(self.to_object(origin), rng))
    }
}

/// Inverts which side of the contained hittable counts as its front.
///
/// Mostly used on area lights so that their emitting side faces the scene.
pub struct FlipFace {
    object: Arc<dyn Hittable>,
}

impl FlipFace {
    pub fn new(object: Arc<dyn Hittable>) -> Self {
        Self { object }
    }
}

impl Hittable for FlipFace {
    fn hit(
        &self,
        ray: &Ray,
        t_min: f32,
        t_max: f32,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'_>> {
        self.object.hit(ray, t_min, t_max, rng).map(|rec| HitRecord {
            front_face: !rec.front_face,
            ..rec
        })
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Option<BoundingBox> {
        self.object.bounding_box(time0, time1)
    }

    fn pdf_value(&self, origin: Vec3A, direction: Vec3A, rng: &mut dyn RngCore) -> f32 {
        self.object.pdf_value(origin, direction, rng)
    }

    fn random_direction(&self, origin: Vec3A, rng: &mut dyn RngCore) -> Vec3A {
        self.object.random_direction(origin, rng)
    }
}
