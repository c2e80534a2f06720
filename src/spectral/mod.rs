// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-snr-psd project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).
//!
//! # Spectral Analysis Module
//!
//! This module estimates the power spectral density of a sampled signal with
//! a periodogram: the squared magnitude of its discrete Fourier transform,
//! normalized by the number of samples and centered on 0 Hz.
//!
//! ## Architecture
//!
//! - `FourierTransform` trait isolates the FFT library ([`fft`])
//! - `SpectrumEstimator` computes the two-sided [`Spectrum`] ([`psd`])
//! - [`summarize`] reports the peak, noise floor and SNR around a known tone
//!
//! ## Usage
//!
//! ```
//! use rust_snr_psd::spectral;
//!
//! let signal: Vec<f64> = (0..2000)
//!     .map(|i| (2.0 * std::f64::consts::PI * 1000.0 * i as f64 / 200_000.0).sin())
//!     .collect();
//!
//! let spectrum = spectral::calculate_psd(&signal, 200_000.0, 0.01).unwrap();
//!
//! println!("Number of frequency bins: {}", spectrum.len());
//! println!("Frequency resolution: {:.2} Hz", spectrum.frequency_resolution);
//! ```

pub mod fft;
pub mod psd;

pub use fft::{fft_shift, FourierTransform, RustFftTransform};
pub use psd::{calculate_psd, summarize, Spectrum, SpectrumEstimator, SpectrumSummary};

/// Create a spectrum estimator backed by the rustfft planner
pub fn create_spectrum_estimator() -> SpectrumEstimator {
    SpectrumEstimator::new()
}
