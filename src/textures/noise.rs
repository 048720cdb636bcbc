//! Procedural textures driven by [PerlinNoise]

use glam::Vec3A;

use crate::{
    color::{colors, Color},
    textures::{
        perlin::{PerlinNoise, DEFAULT_TURBULENCE_DEPTH},
        Texture,
    },
};

/// Grayscale turbulence, sampled at `scale * point`.
#[derive(Debug, Clone)]
pub struct NoiseTexture {
    noise: PerlinNoise,
    scale: f32,
}

impl NoiseTexture {
    pub fn new(noise: PerlinNoise, scale: f32) -> Self {
        Self { noise, scale }
    }
}

impl Texture for NoiseTexture {
    fn color(&self, _u: f32, _v: f32, point: Vec3A) -> Color {
        colors::WHITE
            * self
                .noise
                .turbulence(self.scale * point, DEFAULT_TURBULENCE_DEPTH)
    }
}

/// Marble-like bands: a sine along z, phase-shifted by turbulence sampled at `scale * point`.
#[derive(Debug, Clone)]
pub struct MarbleTexture {
    noise: PerlinNoise,
    scale: f32,
}

impl MarbleTexture {
    pub fn new(noise: PerlinNoise, scale: f32) -> Self {
        Self { noise, scale }
    }
}

impl Texture for MarbleTexture {
    fn color(&self, _u: f32, _v: f32, point: Vec3A) -> Color {
        let turbulence = self
            .noise
            .turbulence(self.scale * point, DEFAULT_TURBULENCE_DEPTH);
        colors::WHITE * 0.5 * (1.0 + (self.scale * point.z + 10.0 * turbulence).sin())
    }
}
