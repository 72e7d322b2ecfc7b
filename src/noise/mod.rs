//! Coherent noise sampling and fractal composition.
//!
//! The simplex lattice comes from the `noise` crate; this module keys it
//! from a seeded uniform source and layers octaves on top of it.

mod fbm;
mod simplex;

pub use fbm::{FbmConfig, fbm};
pub use simplex::SimplexField;
