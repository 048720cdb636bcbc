//! Rays: the half-lines traced through a scene

use glam::Vec3A;

/// A ray `origin + t * direction`, emitted at an instant of the shutter interval.
///
/// The direction is not normalized; hit distances `t` are measured in units of it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ray {
    pub origin: Vec3A,
    pub direction: Vec3A,
    /// Instant within the camera shutter interval, used for motion blur
    pub time: f32,
}

impl std::fmt::Display for Ray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} + t*{} @ {}", self.origin, self.direction, self.time)
    }
}

impl Ray {
    /// Creates a new Ray.
    pub fn new(origin: Vec3A, direction: Vec3A, time: f32) -> Self {
        Self {
            origin,
            direction,
            time,
        }
    }

    /// Point reached after travelling `t` direction-lengths from the origin.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_zero_is_origin() {
        let r = Ray::new(Vec3A::new(1.0, -2.0, 3.0), Vec3A::Z, 0.0);
        assert_eq!(r.at(0.0), r.origin);
    }

    #[test]
    fn non_unit_direction() {
        let r = Ray::new(Vec3A::ONE, Vec3A::new(0.0, 2.0, 0.0), 0.5);
        assert_eq!(r.at(1.5), Vec3A::new(1.0, 4.0, 1.0));
    }
}
