//! Miscelleanous utilities related to random number generation and random sampling
//!
//! Relies on the [rand] and [rand_distr] crates

use std::f32::consts::PI;

use glam::Vec3A;
use rand::Rng;
use rand_distr::{Distribution, UnitBall, UnitDisc, UnitSphere};

/// Generates a random [Vec3A] on the surface of the unit sphere (radius 1).
///
/// wrapper function around [UnitSphere]'s `sample` method
pub fn rand_vec3_on_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3A {
    Vec3A::from_array(UnitSphere.sample(rng))
}

/// Generates a random [Vec3A] within the unit ball (radius 1).
///
/// wrapper function around [UnitBall]'s `sample` method
pub fn rand_vec3_in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3A {
    Vec3A::from_array(UnitBall.sample(rng))
}

/// Generates a random [Vec3A] within the unit disk (radius 1).
///
/// wrapper function around [UnitDisc]'s `sample` method.
pub fn rand_vec3_in_unit_disk<R: Rng + ?Sized>(rng: &mut R) -> Vec3A {
    let [x, y] = UnitDisc.sample(rng);
    Vec3A::new(x, y, 0.0)
}

/// Generates a cosine-weighted direction on the +z hemisphere.
///
/// Maps two uniform draws through `z = sqrt(1 - r2)`, `phi = 2 pi r1`.
pub fn rand_cosine_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3A {
    let r1: f32 = rng.gen();
    let r2: f32 = rng.gen();
    let z = (1.0 - r2).sqrt();

    let phi = 2.0 * PI * r1;
    let x = phi.cos() * r2.sqrt();
    let y = phi.sin() * r2.sqrt();

    Vec3A::new(x, y, z)
}

/// Generates a direction inside the cone (around +z) subtended by a sphere of
/// `radius` whose center lies `distance_squared` away.
pub fn rand_to_sphere<R: Rng + ?Sized>(rng: &mut R, radius: f32, distance_squared: f32) -> Vec3A {
    let r1: f32 = rng.gen();
    let r2: f32 = rng.gen();
    let cos_theta_max = cone_cos_theta_max(radius, distance_squared);
    let z = 1.0 + r2 * (cos_theta_max - 1.0);

    let phi = 2.0 * PI * r1;
    let sin_theta = (1.0 - z * z).max(0.0).sqrt();
    let x = phi.cos() * sin_theta;
    let y = phi.sin() * sin_theta;

    Vec3A::new(x, y, z)
}

/// Cosine of the half-angle of the cone subtended by a sphere.
///
/// Clamped to 0 when the viewer sits inside the sphere.
pub fn cone_cos_theta_max(radius: f32, distance_squared: f32) -> f32 {
    (1.0 - radius * radius / distance_squared).max(0.0).sqrt()
}
