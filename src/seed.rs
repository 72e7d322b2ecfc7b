//! Seed values and their deterministic coercion into bit-source keys.
//!
//! A seed is either text or a number. Numbers are coerced to their decimal
//! text before hashing, so `0`, `0.0` and `"0"` all key the same stream.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{RandomError, Result};

/// Clock reading taken the first time an implicit seed is requested.
static CLOCK_NANOS: Lazy<u64> = Lazy::new(|| {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
});

/// Number of implicit seeds handed out so far.
static INSTANCE_COUNT: AtomicU64 = AtomicU64::new(0);

/// Largest magnitude at which an integral float is still printed as an integer.
const INTEGRAL_FLOAT_LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63

/// An opaque seed for a [`Random`](crate::Random) generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    /// Integer seed.
    Int(i64),
    /// Floating point seed. Must be finite to be usable.
    Float(f64),
    /// Arbitrary text seed.
    Text(String),
}

impl Seed {
    /// Returns a fresh seed derived from the process clock and an instance
    /// counter.
    ///
    /// The clock is read once per process; every call adds the next counter
    /// value so that generators created in the same tick still diverge.
    pub fn implicit() -> Self {
        let count = INSTANCE_COUNT.fetch_add(1, Ordering::Relaxed);
        Seed::Int(CLOCK_NANOS.wrapping_add(count) as i64)
    }

    /// Canonical text form used for hashing.
    ///
    /// Fails for NaN and infinite floats.
    pub fn canonical(&self) -> Result<String> {
        match self {
            Seed::Int(v) => Ok(v.to_string()),
            Seed::Float(v) if !v.is_finite() => Err(RandomError::InvalidSeed(v.to_string())),
            Seed::Float(v) if v.fract() == 0.0 && v.abs() < INTEGRAL_FLOAT_LIMIT => {
                Ok((*v as i64).to_string())
            }
            Seed::Float(v) => Ok(v.to_string()),
            Seed::Text(s) => Ok(s.clone()),
        }
    }

    /// Derives the 32-byte key of the uniform bit source.
    pub fn key(&self) -> Result<[u8; 32]> {
        Ok(hash_key(&self.canonical()?))
    }
}

/// Hashes canonical seed text into a bit-source key.
pub(crate) fn hash_key(text: &str) -> [u8; 32] {
    *blake3::hash(text.as_bytes()).as_bytes()
}

impl Default for Seed {
    fn default() -> Self {
        Seed::implicit()
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.canonical() {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "{:?}", self),
        }
    }
}

impl From<&str> for Seed {
    fn from(value: &str) -> Self {
        Seed::Text(value.to_owned())
    }
}

impl From<String> for Seed {
    fn from(value: String) -> Self {
        Seed::Text(value)
    }
}

impl From<f64> for Seed {
    fn from(value: f64) -> Self {
        Seed::Float(value)
    }
}

impl From<f32> for Seed {
    fn from(value: f32) -> Self {
        Seed::Float(f64::from(value))
    }
}

macro_rules! seed_from_small_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Seed {
                fn from(value: $t) -> Self {
                    Seed::Int(i64::from(value))
                }
            }
        )*
    };
}

seed_from_small_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => Seed::Int(v),
            Err(_) => Seed::Text(value.to_string()),
        }
    }
}

impl From<usize> for Seed {
    fn from(value: usize) -> Self {
        Seed::from(value as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_coerce_like_text() {
        let int_key = Seed::from(0).key().unwrap();
        let float_key = Seed::from(0.0).key().unwrap();
        let text_key = Seed::from("0").key().unwrap();

        assert_eq!(int_key, float_key);
        assert_eq!(int_key, text_key);
        assert_eq!(Seed::from(-0.0).canonical().unwrap(), "0");
    }

    #[test]
    fn test_fractional_float_keeps_fraction() {
        assert_eq!(Seed::from(1.5).canonical().unwrap(), "1.5");
        assert_ne!(Seed::from(1.5).key().unwrap(), Seed::from(1).key().unwrap());
    }

    #[test]
    fn test_non_finite_seed_is_rejected() {
        assert!(matches!(Seed::from(f64::NAN).key(), Err(RandomError::InvalidSeed(_))));
        assert!(matches!(
            Seed::from(f64::INFINITY).key(),
            Err(RandomError::InvalidSeed(_))
        ));
    }

    #[test]
    fn test_large_unsigned_seed_falls_back_to_text() {
        let seed = Seed::from(u64::MAX);
        assert_eq!(seed, Seed::Text(u64::MAX.to_string()));
        assert_eq!(Seed::from(7u64), Seed::Int(7));
    }

    #[test]
    fn test_implicit_seeds_are_distinct() {
        let a = Seed::implicit();
        let b = Seed::implicit();
        assert_ne!(a, b, "Implicit seeds in the same tick must differ");
    }

    #[test]
    fn test_default_seed_is_implicit() {
        let a = Seed::default();
        let b = Seed::default();
        assert!(matches!(a, Seed::Int(_)));
        assert_ne!(a, b);
        assert!(a.key().is_ok());
    }

    #[test]
    fn test_seed_serde_untagged() {
        let seeds: Vec<Seed> = serde_json::from_str(r#"[3, 2.5, "moss"]"#).unwrap();
        assert_eq!(
            seeds,
            vec![Seed::Int(3), Seed::Float(2.5), Seed::Text("moss".to_string())]
        );
        assert_eq!(serde_json::to_string(&Seed::from("moss")).unwrap(), r#""moss""#);
    }

    #[test]
    fn test_display_uses_canonical_text() {
        assert_eq!(Seed::from(42.0).to_string(), "42");
        assert_eq!(Seed::from("abc").to_string(), "abc");
    }
}
