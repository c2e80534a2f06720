// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-snr-psd project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! # Signal Synthesis Module
//!
//! This module produces the time-domain signals analyzed by the rest of the
//! crate: a sampled sine wave with Gaussian white noise added at a requested
//! signal-to-noise ratio.
//!
//! ## Architecture
//!
//! - [`SamplingParameters`] validates the sampling frequency and duration and
//!   derives the sample count once, so the waveform generator and the spectrum
//!   estimator always agree on the number of samples
//! - [`noise`] scales a Gaussian noise draw to a target SNR and adds it
//! - [`waveform`] builds the time axis and the sine, then delegates to [`noise`]
//!
//! Randomness is never global: every noisy operation takes an explicit
//! `rand::Rng`, so a seeded generator gives reproducible output.
//!
//! ## Usage
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use rust_snr_psd::signal::{generate_wave, SamplingParameters};
//!
//! let sampling = SamplingParameters::new(200_000.0, 0.01).unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//! let series = generate_wave(&sampling, 1000.0, 20.0, &mut rng).unwrap();
//! assert_eq!(series.len(), 2000);
//! ```

pub mod noise;
pub mod sampling;
pub mod waveform;

#[cfg(test)]
mod noise_test;

pub use noise::{
    add_noise, add_scaled_noise, measured_snr_db, noise_scale_factor, signal_power, NoiseGenerator,
};
pub use sampling::SamplingParameters;
pub use waveform::{generate_clean_wave, generate_wave, generate_wave_from, time_axis, TimeSeries};

use thiserror::Error;

/// Errors raised while synthesizing or analyzing a signal
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    /// A parameter is outside its valid domain (non-positive sampling frequency,
    /// empty sample count, NaN SNR, mismatched lengths, ...)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// The signal or the noise draw carries no power, so no finite noise scale exists
    #[error("Degenerate signal: {0}")]
    DegenerateSignal(String),
}

/// Convenience result type for signal operations
pub type SignalResult<T> = Result<T, SignalError>;

/// Convert a ratio expressed in decibels to a linear power ratio
pub fn db_to_linear(db: f64) -> f64 {
    10f64.powf(db / 10.0)
}

/// Convert a linear power ratio to decibels
pub fn linear_to_db(linear: f64) -> f64 {
    10.0 * linear.log10()
}
