use std::f64::consts::TAU;

use crate::foundation::{
    error::{ScrollweaveError, ScrollweaveResult},
    math,
};

/// Time-driven (not progress-driven) scalar source for idle motion.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Oscillator {
    /// `offset + amp * sin(2π * freq_hz * time + phase)`.
    Sine {
        /// Amplitude.
        amp: f64,
        /// Frequency in Hz.
        freq_hz: f64,
        /// Phase in radians.
        #[serde(default)]
        phase: f64,
        /// Constant offset.
        #[serde(default)]
        offset: f64,
    },
    /// Linearly interpolated value noise in `offset ± amp`.
    Noise {
        /// Amplitude.
        amp: f64,
        /// Lattice frequency in Hz.
        freq_hz: f64,
        /// Constant offset.
        #[serde(default)]
        offset: f64,
        /// Noise seed.
        #[serde(default)]
        seed: u64,
    },
}

impl Oscillator {
    /// Sine oscillator without offset.
    pub fn sine(amp: f64, freq_hz: f64, phase: f64) -> Self {
        Self::Sine {
            amp,
            freq_hz,
            phase,
            offset: 0.0,
        }
    }

    /// Sample at `time_secs`.
    pub fn sample(&self, time_secs: f64) -> f64 {
        match *self {
            Self::Sine {
                amp,
                freq_hz,
                phase,
                offset,
            } => offset + amp * (TAU * freq_hz * time_secs + phase).sin(),
            Self::Noise {
                amp,
                freq_hz,
                offset,
                seed,
            } => {
                let x = (time_secs * freq_hz).max(0.0);
                let i0 = x.floor();
                let t = x - i0;
                let i0u = i0 as u64;

                let a = noise01(seed, i0u) * 2.0 - 1.0;
                let b = noise01(seed, i0u.saturating_add(1)) * 2.0 - 1.0;
                offset + amp * math::lerp(a, b, t)
            }
        }
    }

    /// Reject non-finite parameters.
    pub fn validate(&self) -> ScrollweaveResult<()> {
        let finite = match *self {
            Self::Sine {
                amp,
                freq_hz,
                phase,
                offset,
            } => [amp, freq_hz, phase, offset].iter().all(|v| v.is_finite()),
            Self::Noise {
                amp,
                freq_hz,
                offset,
                ..
            } => [amp, freq_hz, offset].iter().all(|v| v.is_finite()),
        };
        if !finite {
            return Err(ScrollweaveError::animation(
                "oscillator parameters must be finite",
            ));
        }
        Ok(())
    }
}

/// Deterministic SplitMix64 generator.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Seeded generator.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw value.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `[0, 1)` with 53 bits of precision.
    pub fn next_f64_01(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }
}

fn noise01(seed: u64, x: u64) -> f64 {
    let mut rng = Rng64::new(seed ^ x.wrapping_mul(0xD6E8_FEB8_6659_FD93));
    rng.next_f64_01()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/proc.rs"]
mod tests;
