//! A thin-lens camera

use std::ops::Range;

use glam::Vec3A;
use rand::Rng;

use crate::{ray::Ray, utils::random::rand_vec3_in_unit_disk};

/// Generates primary rays through a viewport.
///
/// Rays start on a lens disc of diameter `aperture` and pass through the
/// plane of focus `focus_dist` away, giving defocus blur. Each ray carries a
/// time picked uniformly within the shutter interval, giving motion blur.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Vec3A,
    lower_left_corner: Vec3A,
    horizontal: Vec3A,
    vertical: Vec3A,
    u: Vec3A,
    v: Vec3A,
    lens_radius: f32,
    /// The interval over which the shutter is open
    pub shutter_time: Range<f32>,
}

impl Camera {
    /// Creates a new Camera.
    ///
    /// `vert_fov` is the vertical field of view in degrees.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        look_from: Vec3A,
        look_at: Vec3A,
        view_up: Vec3A,
        vert_fov: f32,
        aspect_ratio: f32,
        aperture: f32,
        focus_dist: f32,
        shutter_time: Range<f32>,
    ) -> Self {
        let h = (vert_fov.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = aspect_ratio * viewport_height;

        let w = (look_from - look_at).normalize_or_zero();
        let u = view_up.cross(w).normalize_or_zero();
        let v = w.cross(u);

        let horizontal = focus_dist * viewport_width * u;
        let vertical = focus_dist * viewport_height * v;
        let lower_left_corner = look_from - horizontal / 2.0 - vertical / 2.0 - focus_dist * w;

        Self {
            origin: look_from,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            lens_radius: aperture / 2.0,
            shutter_time,
        }
    }

    /// Returns a ray through the viewport coordinates (`s`, `t`), both in `[0, 1]`
    /// from the lower left corner.
    pub fn get_ray<R: Rng + ?Sized>(&self, s: f32, t: f32, rng: &mut R) -> Ray {
        let rd = self.lens_radius * rand_vec3_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;

        let time = if self.shutter_time.is_empty() {
            self.shutter_time.start
        } else {
            rng.gen_range(self.shutter_time.clone())
        };

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical - self.origin - offset,
            time,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn pinhole_center_ray_hits_look_at() {
        let look_at = Vec3A::new(1.0, 2.0, -3.0);
        let cam = Camera::new(Vec3A::ZERO, look_at, Vec3A::Y, 40.0, 1.5, 0.0, 10.0, 0.0..0.0);
        let mut rng = SmallRng::seed_from_u64(0);
        let ray = cam.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(ray.origin, Vec3A::ZERO);
        assert!(ray.direction.normalize().abs_diff_eq(look_at.normalize(), 1e-5));
        assert_eq!(ray.time, 0.0);
    }

    #[test]
    fn corners_span_field_of_view() {
        let cam = Camera::new(Vec3A::ZERO, -Vec3A::Z, Vec3A::Y, 90.0, 2.0, 0.0, 1.0, 0.0..0.0);
        let mut rng = SmallRng::seed_from_u64(0);
        let ll = cam.get_ray(0.0, 0.0, &mut rng).direction;
        let ur = cam.get_ray(1.0, 1.0, &mut rng).direction;
        assert!(ll.abs_diff_eq(Vec3A::new(-2.0, -1.0, -1.0), 1e-5), "{ll}");
        assert!(ur.abs_diff_eq(Vec3A::new(2.0, 1.0, -1.0), 1e-5), "{ur}");
    }

    #[test]
    fn lens_rays_converge_on_focus_plane() {
        let cam = Camera::new(Vec3A::ZERO, -Vec3A::Z, Vec3A::Y, 30.0, 1.0, 2.0, 5.0, 0.0..1.0);
        let mut rng = SmallRng::seed_from_u64(8);
        let focus = Vec3A::new(0.0, 0.0, -5.0);
        for _ in 0..100 {
            let ray = cam.get_ray(0.5, 0.5, &mut rng);
            assert!(ray.origin.length() <= 1.0 + 1e-5);
            assert!(ray.at(1.0).abs_diff_eq(focus, 1e-4));
            assert!((0.0..1.0).contains(&ray.time));
        }
    }
}
