//! Simplex noise field keyed from a uniform draw source.

use std::fmt;

use ::noise::{NoiseFn, Simplex};
use rand::RngCore;

/// Coherent 2D/3D/4D simplex noise.
///
/// The lattice is keyed by a value drawn from an existing uniform source
/// rather than from fresh entropy, which ties its output to whatever seeded
/// that source.
pub struct SimplexField {
    key: u32,
    simplex: Simplex,
}

impl SimplexField {
    /// Builds a field by consuming one 32-bit draw from `source`.
    pub fn from_source<R: RngCore + ?Sized>(source: &mut R) -> Self {
        Self::with_key(source.next_u32())
    }

    fn with_key(key: u32) -> Self {
        Self {
            key,
            simplex: Simplex::new(key),
        }
    }

    /// Lattice key drawn at construction.
    pub fn key(&self) -> u32 {
        self.key
    }

    /// Samples the field in 2 dimensions. Result lies in [-1, 1].
    pub fn sample2(&self, x: f64, y: f64) -> f64 {
        self.simplex.get([x, y]).clamp(-1.0, 1.0)
    }

    /// Samples the field in 3 dimensions. Result lies in [-1, 1].
    pub fn sample3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.simplex.get([x, y, z]).clamp(-1.0, 1.0)
    }

    /// Samples the field in 4 dimensions. Result lies in [-1, 1].
    pub fn sample4(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        self.simplex.get([x, y, z, w]).clamp(-1.0, 1.0)
    }
}

impl Clone for SimplexField {
    fn clone(&self) -> Self {
        Self::with_key(self.key)
    }
}

impl fmt::Debug for SimplexField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimplexField").field("key", &self.key).finish()
    }
}
