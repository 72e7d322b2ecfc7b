//! Seeded randomness for procedural and creative code.
//!
//! This crate provides a reproducible generator ([`Random`]) that derives
//! uniform scalars, random points in disks/balls/rectangles/boxes, random
//! unit quaternions and coherent simplex noise from a single seed, plus
//! fractal Brownian motion layered on top of that noise.
//!
//! A process-wide default generator is available through [`global`]; local
//! generators created with [`Random::new`] or [`global::create`] are fully
//! independent of it.

pub mod error;
pub mod global;
pub mod noise;
pub mod random;
pub mod seed;

pub use error::{RandomError, Result};
pub use crate::noise::{FbmConfig, SimplexField};
pub use random::{MAX_SAFE_INTEGER, Random};
pub use seed::Seed;
