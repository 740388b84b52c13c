//! Sample acquisition and preparation.
//!
//! This module provides:
//! - The pull-style [`SampleSource`] contract and a shared snapshot cell
//! - Linear resampling of arbitrary-length snapshots onto the texture width
//! - Synthetic signals for demos and tests

pub mod resample;
pub mod source;
pub mod synth;

pub use resample::{resample, resample_into};
pub use source::{SampleSource, SharedSamples};
pub use synth::{generate_sine, generate_white_noise, SineSweep};
