//! Seeded generator for uniform scalars, random geometry and coherent noise.

use std::f64::consts::TAU;

use glam::{DQuat, DVec2, DVec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::error::{RandomError, Result};
use crate::noise::{FbmConfig, SimplexField};
use crate::seed::{hash_key, Seed};

/// Largest integer exactly representable in an `f64` (2^53 - 1).
///
/// Upper bound of [`Random::int`].
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// A deterministic generator of uniform draws and coherent noise.
///
/// The uniform bit source and the simplex field are both derived from the
/// same seed: the field is keyed by a draw taken from the freshly seeded bit
/// source. Two generators seeded alike therefore agree on every `float`,
/// `int` and `noise*` call made in the same order.
///
/// Every draw advances the bit source and takes `&mut self`. A generator
/// shared between threads must be wrapped in a lock by the caller; the
/// process-wide instance in [`crate::global`] does exactly that.
#[derive(Debug, Clone)]
pub struct Random {
    seed: Seed,
    rng: ChaCha8Rng,
    noise: SimplexField,
}

impl Random {
    /// Creates a generator from an explicit seed.
    ///
    /// Fails only for seeds without a canonical text form (NaN or infinite
    /// floats).
    pub fn new(seed: impl Into<Seed>) -> Result<Self> {
        let seed = seed.into();
        let key = seed.key()?;
        Ok(Self::from_key(seed, key))
    }

    /// Creates a generator from an implicit clock + instance counter seed.
    pub fn from_entropy() -> Self {
        let seed = Seed::implicit();
        let key = hash_key(&seed.to_string());
        Self::from_key(seed, key)
    }

    fn from_key(seed: Seed, key: [u8; 32]) -> Self {
        let mut rng = ChaCha8Rng::from_seed(key);
        let noise = SimplexField::from_source(&mut rng);
        debug!(%seed, noise_key = noise.key(), "seeded generator");
        Self { seed, rng, noise }
    }

    /// Creates an independent generator.
    ///
    /// With `None` the new generator gets an implicit seed distinct from
    /// every other implicitly seeded generator in the process. The new
    /// generator shares no state with `self`.
    pub fn create(&self, seed: Option<Seed>) -> Result<Random> {
        match seed {
            Some(seed) => Random::new(seed),
            None => Ok(Random::from_entropy()),
        }
    }

    /// Re-initializes the bit source and the noise field from `seed`.
    ///
    /// On error the generator is left exactly as it was.
    pub fn reseed(&mut self, seed: impl Into<Seed>) -> Result<()> {
        let seed = seed.into();
        let key = seed.key()?;
        *self = Self::from_key(seed, key);
        Ok(())
    }

    /// The seed last applied to this generator.
    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    /// One uniform draw in [0, 1).
    fn draw(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniform float in [0, 1).
    pub fn float(&mut self) -> f64 {
        self.float_range(0.0, 1.0)
    }

    /// Uniform float in [0, max).
    pub fn float_to(&mut self, max: f64) -> f64 {
        self.float_range(0.0, max)
    }

    /// Uniform float in [min, max).
    pub fn float_range(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.draw()
    }

    /// Integer in [0, [`MAX_SAFE_INTEGER`]).
    pub fn int(&mut self) -> i64 {
        self.int_range(0, MAX_SAFE_INTEGER)
    }

    /// Integer in [0, max).
    pub fn int_to(&mut self, max: i64) -> i64 {
        self.int_range(0, max)
    }

    /// Integer in [min, max), computed as the floor of `float_range`.
    pub fn int_range(&mut self, min: i64, max: i64) -> i64 {
        self.float_range(min as f64, max as f64).floor() as i64
    }

    /// Point inside a disk of the given radius.
    ///
    /// Draws a direction from two components uniform in [-1, 1] and an
    /// independent radial scale uniform in [0, radius). The result is not
    /// area-uniform. A zero-length direction yields NaN components.
    pub fn vec2(&mut self, radius: f64) -> DVec2 {
        let x = 2.0 * self.draw() - 1.0;
        let y = 2.0 * self.draw() - 1.0;
        let rr = self.draw() * radius;
        disk_point(x, y, rr)
    }

    /// Point inside a ball of the given radius.
    ///
    /// Same construction as [`Random::vec2`] with a third component; not
    /// volume-uniform, and a zero-length direction yields NaN components.
    pub fn vec3(&mut self, radius: f64) -> DVec3 {
        let x = 2.0 * self.draw() - 1.0;
        let y = 2.0 * self.draw() - 1.0;
        let z = 2.0 * self.draw() - 1.0;
        let rr = self.draw() * radius;
        ball_point(x, y, z, rr)
    }

    /// [`Random::vec2`] with the default radius of 1.
    pub fn vec2_in_unit_disk(&mut self) -> DVec2 {
        self.vec2(1.0)
    }

    /// [`Random::vec3`] with the default radius of 1.
    pub fn vec3_in_unit_ball(&mut self) -> DVec3 {
        self.vec3(1.0)
    }

    /// Point inside the rectangle `[min, max]`, each axis uniform.
    pub fn vec2_in_rect(&mut self, rect: [DVec2; 2]) -> DVec2 {
        let [min, max] = rect;
        let x = min.x + self.draw() * (max.x - min.x);
        let y = min.y + self.draw() * (max.y - min.y);
        DVec2::new(x, y)
    }

    /// Point inside the axis-aligned box `[min, max]`, each axis uniform.
    pub fn vec3_in_aabb(&mut self, aabb: [DVec3; 2]) -> DVec3 {
        let [min, max] = aabb;
        let x = min.x + self.draw() * (max.x - min.x);
        let y = min.y + self.draw() * (max.y - min.y);
        let z = min.z + self.draw() * (max.z - min.z);
        DVec3::new(x, y, z)
    }

    /// Uniformly distributed unit quaternion (Shoemake's method).
    pub fn quat(&mut self) -> DQuat {
        let x0 = self.draw();
        let theta1 = TAU * self.draw();
        let theta2 = TAU * self.draw();
        let r1 = (1.0 - x0).sqrt();
        let r2 = x0.sqrt();
        DQuat::from_xyzw(
            theta1.sin() * r1,
            theta1.cos() * r1,
            theta2.sin() * r2,
            theta2.cos() * r2,
        )
    }

    /// Returns `true` with the given probability in [0, 1].
    ///
    /// `0.0` never succeeds, `1.0` always does.
    pub fn chance(&mut self, probability: f64) -> bool {
        // an exact 0.0 draw must not succeed at probability 0
        let draw = self.draw();
        if probability <= 0.0 {
            return false;
        }
        draw <= probability
    }

    /// Fair coin flip, `chance(0.5)`.
    pub fn coin(&mut self) -> bool {
        self.chance(0.5)
    }

    /// Picks a uniformly random element.
    pub fn element<'a, T>(&mut self, list: &'a [T]) -> Result<&'a T> {
        if list.is_empty() {
            return Err(RandomError::EmptyList);
        }
        let index = (self.draw() * list.len() as f64) as usize;
        Ok(&list[index.min(list.len() - 1)])
    }

    /// 2D simplex noise in [-1, 1].
    ///
    /// The lattice has few gradients, so two differently seeded generators
    /// agree at a given point roughly once in a few hundred seed pairs.
    /// Compare several points (or use [`Random::noise4`] or [`Random::fbm`])
    /// when telling seeds apart.
    pub fn noise2(&self, x: f64, y: f64) -> f64 {
        self.noise.sample2(x, y)
    }

    /// 3D simplex noise in [-1, 1].
    ///
    /// Same per-point collision caveat as [`Random::noise2`].
    pub fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.noise.sample3(x, y, z)
    }

    /// 4D simplex noise in [-1, 1].
    pub fn noise4(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        self.noise.sample4(x, y, z, w)
    }

    /// Fractal Brownian motion over this generator's simplex field.
    ///
    /// The noise dimension follows `coords.len()`, which must be 2, 3 or 4.
    pub fn fbm(&self, config: &FbmConfig, coords: &[f64]) -> Result<f64> {
        trace!(octaves = config.octaves, dims = coords.len(), "fbm");
        let value = match coords.len() {
            2 => crate::noise::fbm(config, coords, |p| self.noise2(p[0], p[1])),
            3 => crate::noise::fbm(config, coords, |p| self.noise3(p[0], p[1], p[2])),
            4 => crate::noise::fbm(config, coords, |p| self.noise4(p[0], p[1], p[2], p[3])),
            n => return Err(RandomError::UnsupportedArity(n)),
        };
        Ok(value)
    }

    /// Fractal Brownian motion over a caller-supplied noise function.
    ///
    /// Any coordinate count is accepted; `noise` receives the coordinates
    /// scaled by each octave's frequency.
    pub fn fbm_with<F>(&self, config: &FbmConfig, coords: &[f64], noise: F) -> f64
    where
        F: Fn(&[f64]) -> f64,
    {
        trace!(octaves = config.octaves, dims = coords.len(), "fbm with custom noise");
        crate::noise::fbm(config, coords, noise)
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::from_entropy()
    }
}

fn disk_point(x: f64, y: f64, rr: f64) -> DVec2 {
    let len = (x * x + y * y).sqrt();
    DVec2::new(rr * x / len, rr * y / len)
}

fn ball_point(x: f64, y: f64, z: f64, rr: f64) -> DVec3 {
    let len = (x * x + y * y + z * z).sqrt();
    DVec3::new(rr * x / len, rr * y / len, rr * z / len)
}
