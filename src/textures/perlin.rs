//! Gradient noise generator used by the procedural textures

use glam::Vec3A;
use rand::{seq::SliceRandom, Rng};

use crate::utils::random::rand_vec3_on_unit_sphere;

const POINT_COUNT: usize = 256;
const MASK: i32 = POINT_COUNT as i32 - 1;

/// Default octave count for [PerlinNoise::turbulence]
pub const DEFAULT_TURBULENCE_DEPTH: u32 = 7;

/// Perlin noise lattice.
///
/// Tables are generated once from the provided random source and never
/// change afterwards, so one instance can be shared between render threads.
#[derive(Debug, Clone)]
pub struct PerlinNoise {
    rand_float: Box<[f32; POINT_COUNT]>,
    rand_vec: Box<[Vec3A; POINT_COUNT]>,
    perm_x: Box<[usize; POINT_COUNT]>,
    perm_y: Box<[usize; POINT_COUNT]>,
    perm_z: Box<[usize; POINT_COUNT]>,
}

fn generate_perm<R: Rng + ?Sized>(rng: &mut R) -> Box<[usize; POINT_COUNT]> {
    let mut perm = Box::new([0usize; POINT_COUNT]);
    for (i, p) in perm.iter_mut().enumerate() {
        *p = i;
    }
    // Fisher-Yates
    perm.shuffle(rng);
    perm
}

/// Hermite smoothing, `3t^2 - 2t^3`
#[inline]
fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Splits a coordinate into its lattice cell and the offset inside it
#[inline]
fn lattice(c: f32) -> (i32, f32) {
    let floor = c.floor();
    (floor as i32, c - floor)
}

impl PerlinNoise {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut rand_float = Box::new([0.0; POINT_COUNT]);
        rand_float.iter_mut().for_each(|f| *f = rng.gen());

        let mut rand_vec = Box::new([Vec3A::ZERO; POINT_COUNT]);
        rand_vec
            .iter_mut()
            .for_each(|v| *v = rand_vec3_on_unit_sphere(rng));

        let perm_x = generate_perm(rng);
        let perm_y = generate_perm(rng);
        let perm_z = generate_perm(rng);

        Self {
            rand_float,
            rand_vec,
            perm_x,
            perm_y,
            perm_z,
        }
    }

    #[inline]
    fn hash(&self, i: i32, j: i32, k: i32) -> usize {
        self.perm_x[(i & MASK) as usize]
            ^ self.perm_y[(j & MASK) as usize]
            ^ self.perm_z[(k & MASK) as usize]
    }

    /// Blocky value noise: the random scalar of the lattice cell containing `p`.
    pub fn hash_value(&self, p: Vec3A) -> f32 {
        self.rand_float[self.hash(p.x as i32, p.y as i32, p.z as i32)]
    }

    /// Smoothed value noise: trilinear interpolation of the cell's corner scalars.
    pub fn trilinear_value(&self, p: Vec3A) -> f32 {
        let (i, u) = lattice(p.x);
        let (j, v) = lattice(p.y);
        let (k, w) = lattice(p.z);
        let (u, v, w) = (smoothstep(u), smoothstep(v), smoothstep(w));

        let mut accum = 0.0;
        for di in 0..2 {
            for dj in 0..2 {
                for dk in 0..2 {
                    let corner = self.rand_float[self.hash(i + di, j + dj, k + dk)];
                    let (a, b, c) = (di as f32, dj as f32, dk as f32);
                    accum += (a * u + (1.0 - a) * (1.0 - u))
                        * (b * v + (1.0 - b) * (1.0 - v))
                        * (c * w + (1.0 - c) * (1.0 - w))
                        * corner;
                }
            }
        }
        accum
    }

    /// Gradient noise at `p`, roughly in `[-1, 1]`.
    pub fn perlin_interp(&self, p: Vec3A) -> f32 {
        let (i, u) = lattice(p.x);
        let (j, v) = lattice(p.y);
        let (k, w) = lattice(p.z);
        let (uu, vv, ww) = (smoothstep(u), smoothstep(v), smoothstep(w));

        let mut accum = 0.0;
        for di in 0..2 {
            for dj in 0..2 {
                for dk in 0..2 {
                    let gradient = self.rand_vec[self.hash(i + di, j + dj, k + dk)];
                    let (a, b, c) = (di as f32, dj as f32, dk as f32);
                    let weight_v = Vec3A::new(u - a, v - b, w - c);
                    accum += (a * uu + (1.0 - a) * (1.0 - uu))
                        * (b * vv + (1.0 - b) * (1.0 - vv))
                        * (c * ww + (1.0 - c) * (1.0 - ww))
                        * gradient.dot(weight_v);
                }
            }
        }
        accum
    }

    /// Sum of `depth` octaves of gradient noise, each at double the frequency
    /// and half the weight of the previous one. Always non-negative.
    pub fn turbulence(&self, p: Vec3A, depth: u32) -> f32 {
        let mut temp_p = p;
        let mut weight = 1.0;
        let mut accum = 0.0;

        for _ in 0..depth {
            accum += weight * self.perlin_interp(temp_p);
            weight *= 0.5;
            temp_p *= 2.0;
        }

        accum.abs()
    }
}
