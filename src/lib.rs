// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-snr-psd project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Rust SNR / PSD library
//!
//! Synthesizes a sine wave corrupted by Gaussian noise at a chosen
//! signal-to-noise ratio, estimates its power spectral density and plots both.
//!
//! - [`signal`]: sampling grid, sine generation and noise injection
//! - [`spectral`]: FFT seam and periodogram
//! - [`visualization`]: line plots written with plotters
//! - [`analysis`]: per-scenario orchestration
//! - [`config`]: YAML configuration validated by a JSON schema

pub mod analysis;
pub mod config;
pub mod signal;
pub mod spectral;
pub mod visualization;
