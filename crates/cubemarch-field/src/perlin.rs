//! Seeded gradient noise.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// 2D Perlin gradient noise over a seeded permutation table.
#[derive(Debug, Clone)]
pub struct Perlin {
    perm: [u8; 512],
}

impl Default for Perlin {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Perlin {
    /// Builds the permutation table by shuffling `0..=255` with a seeded RNG.
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut table: Vec<u8> = (0..=255).collect();
        table.shuffle(&mut rng);

        let mut perm = [0; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = table[i & 255];
        }
        Self { perm }
    }

    #[inline]
    fn hash(&self, i: usize) -> usize {
        self.perm[i] as usize
    }

    /// Signed noise at `(x, y)`, roughly in `[-1, 1]` and zero on integer points.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn noise(&self, x: f32, y: f32) -> f32 {
        let x0 = x.floor();
        let y0 = y.floor();
        let xi = (x0 as i32 & 255) as usize;
        let yi = (y0 as i32 & 255) as usize;
        let xf = x - x0;
        let yf = y - y0;

        let u = fade(xf);
        let v = fade(yf);

        let a = self.hash(xi) + yi;
        let b = self.hash(xi + 1) + yi;
        let aa = self.hash(a);
        let ab = self.hash(a + 1);
        let ba = self.hash(b);
        let bb = self.hash(b + 1);

        let bottom = lerp(grad(aa, xf, yf), grad(ba, xf - 1.0, yf), u);
        let top = lerp(grad(ab, xf, yf - 1.0), grad(bb, xf - 1.0, yf - 1.0), u);
        lerp(bottom, top, v)
    }

    /// Noise remapped to roughly `[0, 1]`, 0.5 on integer points.
    #[inline]
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        0.5 + 0.5 * self.noise(x, y)
    }

    /// Pseudo-3D noise: the mean of [`Perlin::sample`] over the six ordered
    /// axis pairs of `p`.
    pub fn sample_3d(&self, p: Vec3) -> f32 {
        let xy = self.sample(p.x, p.y);
        let yz = self.sample(p.y, p.z);
        let xz = self.sample(p.x, p.z);
        let yx = self.sample(p.y, p.x);
        let zy = self.sample(p.z, p.y);
        let zx = self.sample(p.z, p.x);
        (xy + yz + xz + yx + zy + zx) / 6.0
    }
}

#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

#[inline]
fn grad(hash: usize, x: f32, y: f32) -> f32 {
    match hash & 7 {
        0 => x + y,
        1 => -x + y,
        2 => x - y,
        3 => -x - y,
        4 => x,
        5 => -x,
        6 => y,
        _ => -y,
    }
}
