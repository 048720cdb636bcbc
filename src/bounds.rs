//! Implementation of bounding volumes

use glam::Vec3A;

use crate::{ray::Ray, utils::Axis};

/// Padding applied along any axis on which a primitive is flat.
pub const FLAT_AXIS_PADDING: f32 = 1e-4;

/// An axis aligned bounding box
///
/// `min[i] <= max[i]` holds on every axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3A,
    pub max: Vec3A,
}

impl BoundingBox {
    /// Creates a new Axis aligned bounding box from two opposite corners
    pub fn new(p0: Vec3A, p1: Vec3A) -> Self {
        Self {
            min: p0.min(p1),
            max: p0.max(p1),
        }
    }

    /// Returns whether or not the ray hits this bounding box.
    ///
    /// Checks for slab intersection in each of the 3 dimensions.
    /// A zero direction component produces a signed infinity for its inverse,
    /// which either leaves the interval untouched or empties it at once.
    pub fn hit(&self, ray: &Ray, mut t_min: f32, mut t_max: f32) -> bool {
        for axis_idx in 0..3 {
            let inverse_dir = 1.0 / ray.direction[axis_idx];
            let t0 = (self.min[axis_idx] - ray.origin[axis_idx]) * inverse_dir;
            let t1 = (self.max[axis_idx] - ray.origin[axis_idx]) * inverse_dir;

            // swap if inverted
            let (t0, t1) = if inverse_dir < 0.0 {
                (t1, t0)
            } else {
                (t0, t1)
            };

            t_min = if t0 > t_min { t0 } else { t_min };
            t_max = if t1 < t_max { t1 } else { t_max };
            if t_max <= t_min {
                return false;
            }
        }

        true
    }

    /// Returns a bounding box enclosing this and the other box.
    ///
    /// In other words, combines the two boxes by taking:
    /// * the minimums of the two boxes' min members
    /// * the maximums of the two boxes' max members
    pub fn union(&self, other: BoundingBox) -> BoundingBox {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns the 8 corners of the box.
    pub fn corners(&self) -> [Vec3A; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3A::new(lo.x, lo.y, lo.z),
            Vec3A::new(hi.x, lo.y, lo.z),
            Vec3A::new(lo.x, hi.y, lo.z),
            Vec3A::new(hi.x, hi.y, lo.z),
            Vec3A::new(lo.x, lo.y, hi.z),
            Vec3A::new(hi.x, lo.y, hi.z),
            Vec3A::new(lo.x, hi.y, hi.z),
            Vec3A::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Returns a copy whose extent along `axis` is at least `2 * padding`.
    pub fn padded(&self, axis: Axis, padding: f32) -> BoundingBox {
        let mut min = self.min;
        let mut max = self.max;
        if max[axis] - min[axis] < 2.0 * padding {
            let mid = 0.5 * (min[axis] + max[axis]);
            min[axis] = mid - padding;
            max[axis] = mid + padding;
        }
        Self { min, max }
    }

    /// Returns the box shifted by `offset`.
    pub fn translated(&self, offset: Vec3A) -> BoundingBox {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// Returns the smallest box enclosing both `a` and `b`.
///
/// Associative and commutative.
pub fn surrounding_box(a: BoundingBox, b: BoundingBox) -> BoundingBox {
    a.union(b)
}
