//! Error types for seeded sampling.

use thiserror::Error;

/// Errors raised by generator operations.
///
/// Every fallible operation fails before touching generator state, so an
/// `Err` never leaves a half-applied reseed behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RandomError {
    /// `element` was asked to pick from an empty list.
    #[error("cannot pick an element from an empty list")]
    EmptyList,
    /// `fbm` was given a coordinate count with no matching noise sampler.
    #[error("fbm needs 2, 3 or 4 coordinates without an explicit noise function, got {0}")]
    UnsupportedArity(usize),
    /// The seed has no canonical text form.
    #[error("unsupported seed: {0}")]
    InvalidSeed(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RandomError>;
