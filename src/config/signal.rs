// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-snr-psd project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Signal synthesis configuration
//!
//! Sampling grid and tone frequency shared by every scenario.

use serde::{Deserialize, Serialize};

use crate::signal::{SamplingParameters, SignalResult};

/// Configuration of the synthesized sine wave.
///
/// The number of samples is derived from `sampling_frequency * time_duration`
/// (see [`SamplingParameters`]); it is also the FFT size of the PSD.
///
/// # Example
///
/// ```
/// use rust_snr_psd::config::SignalConfig;
///
/// let signal = SignalConfig {
///     sampling_frequency: 48_000.0,
///     time_duration: 0.5,
///     wave_frequency: 440.0,
/// };
/// assert_eq!(signal.sampling().unwrap().sample_count(), 24_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Sampling frequency in Hz
    #[serde(default = "default_sampling_frequency")]
    pub sampling_frequency: f64,

    /// Signal duration in seconds
    #[serde(default = "default_time_duration")]
    pub time_duration: f64,

    /// Frequency of the sine wave in Hz
    #[serde(default = "default_wave_frequency")]
    pub wave_frequency: f64,
}

fn default_sampling_frequency() -> f64 {
    200_000.0
}

fn default_time_duration() -> f64 {
    0.01
}

fn default_wave_frequency() -> f64 {
    1000.0
}

impl SignalConfig {
    /// Validated sampling parameters for this configuration
    pub fn sampling(&self) -> SignalResult<SamplingParameters> {
        SamplingParameters::new(self.sampling_frequency, self.time_duration)
    }
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            sampling_frequency: default_sampling_frequency(),
            time_duration: default_time_duration(),
            wave_frequency: default_wave_frequency(),
        }
    }
}
