// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-snr-psd project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Sampled sine wave generation
//!
//! The time axis covers the half-open interval `[0, time_duration)` with one
//! sample every `1 / sampling_frequency` seconds, `sample_count` samples in
//! total (see [`SamplingParameters`]).

use std::f64::consts::PI;

use log::debug;
use rand::Rng;

use super::noise::add_noise;
use super::{SamplingParameters, SignalError, SignalResult};

/// A sampled signal: amplitudes paired with their sample instants in seconds
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    /// Sample instants in seconds, starting at 0
    pub time: Vec<f64>,
    /// Amplitude of each sample
    pub amplitude: Vec<f64>,
}

impl TimeSeries {
    /// Number of samples
    pub fn len(&self) -> usize {
        self.amplitude.len()
    }

    /// True if the series holds no sample
    pub fn is_empty(&self) -> bool {
        self.amplitude.is_empty()
    }

    /// `(time, amplitude)` pairs, ready to be plotted
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.time
            .iter()
            .copied()
            .zip(self.amplitude.iter().copied())
            .collect()
    }
}

/// Sample instants `i / sampling_frequency` for `i in 0..sample_count`
pub fn time_axis(sampling: &SamplingParameters) -> Vec<f64> {
    let time_step = sampling.time_step();
    (0..sampling.sample_count())
        .map(|i| i as f64 * time_step)
        .collect()
}

/// Noise-free `sin(2π · wave_frequency · t)` sampled on [`time_axis`]
///
/// The phase is reduced to a fraction of a cycle before taking the sine, so a
/// sample falling on a whole or half cycle is exactly zero. A tone at a
/// multiple of `sampling_frequency / 2` therefore yields an all-zero wave.
///
/// # Errors
///
/// Returns [`SignalError::InvalidParameter`] if `wave_frequency` is not finite.
pub fn generate_clean_wave(
    sampling: &SamplingParameters,
    wave_frequency: f64,
) -> SignalResult<TimeSeries> {
    if !wave_frequency.is_finite() {
        return Err(SignalError::InvalidParameter(format!(
            "wave frequency must be finite, got {}",
            wave_frequency
        )));
    }
    if wave_frequency.abs() > sampling.nyquist_frequency() {
        debug!(
            "Wave frequency {} Hz is above the Nyquist frequency {} Hz and will alias",
            wave_frequency,
            sampling.nyquist_frequency()
        );
    }

    let time = time_axis(sampling);
    let amplitude = (0..sampling.sample_count())
        .map(|i| sine_sample(wave_frequency, sampling.sampling_frequency(), i))
        .collect();

    Ok(TimeSeries { time, amplitude })
}

/// `sin(2π · wave_frequency · index / sampling_frequency)`
fn sine_sample(wave_frequency: f64, sampling_frequency: f64, index: usize) -> f64 {
    let cycles = (wave_frequency * index as f64 / sampling_frequency).rem_euclid(1.0);
    // Zero crossings
    if (2.0 * cycles).fract() == 0.0 {
        return 0.0;
    }
    (2.0 * PI * cycles).sin()
}

/// Sine wave at `wave_frequency` with Gaussian noise added at `target_snr_db`.
///
/// # Errors
///
/// * [`SignalError::InvalidParameter`] for a non-finite wave frequency or an
///   invalid SNR target
/// * [`SignalError::DegenerateSignal`] when the sampled sine has no power, e.g.
///   at 0 Hz or at a multiple of the sampling frequency
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use rust_snr_psd::signal::{generate_wave, SamplingParameters};
///
/// let sampling = SamplingParameters::new(8000.0, 0.5).unwrap();
/// let mut rng = StdRng::seed_from_u64(3);
/// let series = generate_wave(&sampling, 440.0, 10.0, &mut rng).unwrap();
///
/// assert_eq!(series.len(), 4000);
/// assert!(series.time.iter().all(|&t| t < 0.5));
/// ```
pub fn generate_wave<R: Rng + ?Sized>(
    sampling: &SamplingParameters,
    wave_frequency: f64,
    target_snr_db: f64,
    rng: &mut R,
) -> SignalResult<TimeSeries> {
    let clean = generate_clean_wave(sampling, wave_frequency)?;
    let amplitude = add_noise(&clean.amplitude, target_snr_db, rng)?;
    debug!(
        "Generated {} samples of a {} Hz sine at {} dB SNR",
        amplitude.len(),
        wave_frequency,
        target_snr_db
    );

    Ok(TimeSeries {
        time: clean.time,
        amplitude,
    })
}

/// [`generate_wave`] from raw sampling frequency and duration, validated first
pub fn generate_wave_from<R: Rng + ?Sized>(
    sampling_frequency: f64,
    time_duration: f64,
    wave_frequency: f64,
    target_snr_db: f64,
    rng: &mut R,
) -> SignalResult<TimeSeries> {
    let sampling = SamplingParameters::new(sampling_frequency, time_duration)?;
    generate_wave(&sampling, wave_frequency, target_snr_db, rng)
}
