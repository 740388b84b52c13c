//! Synthetic signals for demos, tests and benches.
//!
//! Deterministic generators plus [`SineSweep`], a sample source that behaves
//! like a live oscilloscope feed: each pull returns a fresh window whose phase
//! has moved on since the previous frame.

use super::source::SampleSource;
use std::f32::consts::PI;

/// Generate `num_samples` of a sine wave.
///
/// # Arguments
/// * `frequency` - Frequency in Hz
/// * `sample_rate` - Sample rate in Hz
/// * `num_samples` - Number of samples to produce
/// * `amplitude` - Peak amplitude
pub fn generate_sine(
    frequency: f32,
    sample_rate: u32,
    num_samples: usize,
    amplitude: f32,
) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            amplitude * (2.0 * PI * frequency * t).sin()
        })
        .collect()
}

/// Generate white noise in `[-amplitude, amplitude]`.
///
/// Uses a linear congruential generator so the same seed always yields the
/// same buffer.
pub fn generate_white_noise(num_samples: usize, amplitude: f32, seed: u64) -> Vec<f32> {
    let mut state = seed;
    let a: u64 = 6364136223846793005;
    let c: u64 = 1442695040888963407;

    (0..num_samples)
        .map(|_| {
            state = state.wrapping_mul(a).wrapping_add(c);
            let normalized = (state as f32 / u64::MAX as f32) * 2.0 - 1.0;
            amplitude * normalized
        })
        .collect()
}

/// Sine window whose phase advances by one window per pull.
#[derive(Debug, Clone)]
pub struct SineSweep {
    pub frequency: f32,
    pub sample_rate: u32,
    pub window: usize,
    pub amplitude: f32,
    offset: u64,
}

impl SineSweep {
    pub fn new(frequency: f32, sample_rate: u32, window: usize) -> Self {
        Self {
            frequency,
            sample_rate,
            window,
            amplitude: 0.8,
            offset: 0,
        }
    }

    /// Number of samples produced so far.
    pub fn position(&self) -> u64 {
        self.offset
    }
}

impl SampleSource for SineSweep {
    fn pull(&mut self) -> Vec<f32> {
        let rate = self.sample_rate as f64;
        let samples = (0..self.window as u64)
            .map(|i| {
                let t = (self.offset + i) as f64 / rate;
                let phase = 2.0 * std::f64::consts::PI * self.frequency as f64 * t;
                self.amplitude * phase.sin() as f32
            })
            .collect();
        self.offset += self.window as u64;
        samples
    }
}
