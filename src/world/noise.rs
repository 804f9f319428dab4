//! Coherent gradient noise for elevation
//!
//! Improved Perlin noise evaluated in 3D, where the third axis carries the
//! world seed offset. Layering octaves gives fractal detail; the result is
//! normalized into [0, 1].

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::error::{Result, SimError};

/// Deterministic multi-octave noise generator
#[derive(Clone)]
pub struct NoiseField {
    perm: [u8; 512],
}

impl NoiseField {
    /// Build the permutation table from a fixed seed
    pub fn new(permutation_seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(permutation_seed);
        let mut p: Vec<u8> = (0..=255).collect();

        // Fisher-Yates shuffle
        for i in (1..256).rev() {
            let j = rng.gen_range(0..=i);
            p.swap(i, j);
        }

        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = p[i & 255];
        }

        Self { perm }
    }

    /// Sample layered noise at (x, y) with the given seed offset
    ///
    /// Each octave doubles the frequency and multiplies the amplitude by
    /// `persistence`. Returns a value in [0, 1].
    pub fn sample(&self, x: f64, y: f64, seed: f64, octaves: u32, persistence: f64) -> Result<f64> {
        if octaves == 0 {
            return Err(SimError::InvalidArgument(
                "noise octave count must be at least 1".into(),
            ));
        }
        if !(persistence.is_finite() && persistence > 0.0) {
            return Err(SimError::InvalidArgument(format!(
                "noise persistence must be positive, got {persistence}"
            )));
        }

        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut max_value = 0.0;

        for _ in 0..octaves {
            total += self.perlin(x * frequency, y * frequency, seed * frequency) * amplitude;
            max_value += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }

        let normalized = (total / max_value + 1.0) / 2.0;
        Ok(normalized.clamp(0.0, 1.0))
    }

    /// Single octave of improved Perlin noise, roughly in [-1, 1]
    fn perlin(&self, x: f64, y: f64, z: f64) -> f64 {
        let xi = (x.floor() as i64 & 255) as usize;
        let yi = (y.floor() as i64 & 255) as usize;
        let zi = (z.floor() as i64 & 255) as usize;

        let xf = x - x.floor();
        let yf = y - y.floor();
        let zf = z - z.floor();

        let u = fade(xf);
        let v = fade(yf);
        let w = fade(zf);

        let p = &self.perm;
        let a = p[xi] as usize + yi;
        let aa = p[a] as usize + zi;
        let ab = p[a + 1] as usize + zi;
        let b = p[xi + 1] as usize + yi;
        let ba = p[b] as usize + zi;
        let bb = p[b + 1] as usize + zi;

        let x1 = lerp(u, grad(p[aa], xf, yf, zf), grad(p[ba], xf - 1.0, yf, zf));
        let x2 = lerp(u, grad(p[ab], xf, yf - 1.0, zf), grad(p[bb], xf - 1.0, yf - 1.0, zf));
        let y1 = lerp(v, x1, x2);

        let x1 = lerp(
            u,
            grad(p[aa + 1], xf, yf, zf - 1.0),
            grad(p[ba + 1], xf - 1.0, yf, zf - 1.0),
        );
        let x2 = lerp(
            u,
            grad(p[ab + 1], xf, yf - 1.0, zf - 1.0),
            grad(p[bb + 1], xf - 1.0, yf - 1.0, zf - 1.0),
        );
        let y2 = lerp(v, x1, x2);

        lerp(w, y1, y2)
    }
}

#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Dot product with one of the 12 cube-edge gradients
#[inline]
fn grad(hash: u8, x: f64, y: f64, z: f64) -> f64 {
    match hash & 0xF {
        0x0 => x + y,
        0x1 => -x + y,
        0x2 => x - y,
        0x3 => -x - y,
        0x4 => x + z,
        0x5 => -x + z,
        0x6 => x - z,
        0x7 => -x - z,
        0x8 => y + z,
        0x9 => -y + z,
        0xA => y - z,
        0xB => -y - z,
        0xC => y + x,
        0xD => -y + z,
        0xE => y - x,
        _ => -y - z,
    }
}
