//! Orthonormal basis built around a surface normal

use glam::Vec3A;

/// An orthonormal frame `(u, v, w)`.
#[derive(Debug, Clone, Copy)]
pub struct Onb {
    pub u: Vec3A,
    pub v: Vec3A,
    pub w: Vec3A,
}

impl Onb {
    /// Builds a frame whose `w` axis is the normalized `normal`.
    ///
    /// The helper axis is world-up unless `w` is nearly parallel to it,
    /// in which case world-x is used instead.
    pub fn build_from_w(normal: Vec3A) -> Self {
        let w = normal.normalize_or_zero();
        let helper = if w.y.abs() > 0.9 { Vec3A::X } else { Vec3A::Y };
        let v = w.cross(helper).normalize_or_zero();
        let u = w.cross(v);
        Self { u, v, w }
    }

    /// Maps a direction expressed in this frame to world space.
    pub fn local(&self, a: Vec3A) -> Vec3A {
        a.x * self.u + a.y * self.v + a.z * self.w
    }
}
