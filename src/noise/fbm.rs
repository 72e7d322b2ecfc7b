//! Multi-octave fractal Brownian motion (fBm) accumulation.

use serde::{Deserialize, Serialize};

/// Configuration for multi-octave fBm.
///
/// Missing fields fall back to their defaults when deserialized, so a
/// partial document such as `{"octaves": 4}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FbmConfig {
    /// Number of octaves to sum.
    pub octaves: u32,
    /// Frequency multiplier per octave.
    pub lacunarity: f64,
    /// Amplitude multiplier per octave.
    pub gain: f64,
    /// Frequency of the first octave.
    pub frequency: f64,
    /// Amplitude of the first octave. `None` means "same as `gain`".
    pub amplitude: Option<f64>,
}

impl Default for FbmConfig {
    fn default() -> Self {
        Self {
            octaves: 8,
            lacunarity: 2.0,
            gain: 0.5,
            frequency: 1.0,
            amplitude: None,
        }
    }
}

impl FbmConfig {
    /// Creates a default (1/f, 8 octave) configuration with a different octave count.
    pub fn with_octaves(octaves: u32) -> Self {
        Self {
            octaves,
            ..Default::default()
        }
    }

    /// Sets the per-octave amplitude decay.
    pub fn with_gain(mut self, gain: f64) -> Self {
        self.gain = gain;
        self
    }

    /// Sets an explicit first-octave amplitude.
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = Some(amplitude);
        self
    }

    /// Amplitude of the first octave after applying the `gain` fallback.
    pub fn initial_amplitude(&self) -> f64 {
        self.amplitude.unwrap_or(self.gain)
    }
}

/// Sums `config.octaves` octaves of `noise` at `coords`.
///
/// Each octave samples `noise` with every coordinate scaled by the current
/// frequency, then multiplies frequency by `lacunarity` and amplitude by
/// `gain`. No normalization is applied: with the default gain of 0.5 the
/// result stays close to [-1, 1], but keeping it bounded for other
/// configurations is up to the caller.
pub fn fbm<F>(config: &FbmConfig, coords: &[f64], noise: F) -> f64
where
    F: Fn(&[f64]) -> f64,
{
    let mut value = 0.0;
    let mut frequency = config.frequency;
    let mut amplitude = config.initial_amplitude();
    let mut scaled = vec![0.0; coords.len()];

    for _ in 0..config.octaves {
        for (dst, src) in scaled.iter_mut().zip(coords) {
            *dst = src * frequency;
        }
        value += noise(&scaled) * amplitude;
        frequency *= config.lacunarity;
        amplitude *= config.gain;
    }

    value
}
