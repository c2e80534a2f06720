// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-snr-psd project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Power spectral density estimation (periodogram)
//!
//! # Estimation Process
//!
//! 1. Take the FFT size from the shared sample count of [`SamplingParameters`]
//! 2. Transform the signal, zero-padded or truncated to that size
//! 3. Center the zero-frequency bin with [`fft_shift`]
//! 4. Normalize the squared magnitudes by the FFT size: `|X[k]|² / N`
//! 5. Label bin `i` of the shifted output with `(i - N/2) · fs / N` Hz
//!
//! No window is applied. The power is linear; [`Spectrum::power_db`] converts
//! it for display.

use log::debug;

use super::fft::{fft_shift, FourierTransform, RustFftTransform};
use crate::signal::{linear_to_db, SamplingParameters, SignalError, SignalResult};

/// Smallest power used when converting to decibels, so empty bins stay finite
pub const POWER_FLOOR: f64 = 1e-30;

/// Two-sided power spectrum centered on 0 Hz
///
/// `frequencies` and `power` have the same length (the FFT size), and index
/// `i` of one describes the same bin as index `i` of the other.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Bin frequencies in Hz, strictly increasing with a constant step
    pub frequencies: Vec<f64>,
    /// Normalized power `|X[k]|² / N` of each bin (linear units)
    pub power: Vec<f64>,
    /// Spacing between consecutive bins in Hz
    pub frequency_resolution: f64,
}

impl Spectrum {
    /// Number of bins, equal to the FFT size
    pub fn len(&self) -> usize {
        self.power.len()
    }

    /// True if the spectrum has no bin
    pub fn is_empty(&self) -> bool {
        self.power.is_empty()
    }

    /// Power of every bin in dB, `10·log10(max(p, POWER_FLOOR))`
    pub fn power_db(&self) -> Vec<f64> {
        self.power
            .iter()
            .map(|&p| linear_to_db(p.max(POWER_FLOOR)))
            .collect()
    }

    /// Sum of all bin powers.
    ///
    /// By Parseval's theorem this equals the sum of squared samples of the
    /// analyzed (padded or truncated) signal.
    pub fn total_power(&self) -> f64 {
        self.power.iter().sum()
    }

    /// Index of the bin closest to `frequency`, if it lies within the spectrum
    pub fn bin_index(&self, frequency: f64) -> Option<usize> {
        if !frequency.is_finite() {
            return None;
        }
        let first = *self.frequencies.first()?;
        let last = *self.frequencies.last()?;
        let half_bin = self.frequency_resolution / 2.0;
        if frequency < first - half_bin || frequency > last + half_bin {
            return None;
        }
        let index = ((frequency - first) / self.frequency_resolution).round() as usize;
        Some(index.min(self.len() - 1))
    }

    /// `(frequency, power)` of the strongest bin
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.peak_where(|_| true)
    }

    /// `(frequency, power)` of the strongest bin within `span` Hz of `frequency`
    pub fn peak_near(&self, frequency: f64, span: f64) -> Option<(f64, f64)> {
        self.peak_where(|f| (f - frequency).abs() <= span)
    }

    fn peak_where<F: Fn(f64) -> bool>(&self, accept: F) -> Option<(f64, f64)> {
        self.frequencies
            .iter()
            .zip(&self.power)
            .filter(|(f, _)| accept(**f))
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(&f, &p)| (f, p))
    }

    /// `(frequency, linear power)` pairs
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.frequencies
            .iter()
            .copied()
            .zip(self.power.iter().copied())
            .collect()
    }

    /// `(frequency, power in dB)` pairs, ready to be plotted
    pub fn db_points(&self) -> Vec<(f64, f64)> {
        self.frequencies
            .iter()
            .copied()
            .zip(self.power_db())
            .collect()
    }
}

/// Scalar report of a spectrum around a known tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumSummary {
    /// Frequency in Hz of the strongest bin near the tone
    pub peak_frequency: f64,
    /// Power of that bin in dB
    pub peak_power_db: f64,
    /// Mean power of the bins away from the tone, in dB
    pub noise_floor_db: f64,
    /// SNR estimated from the spectrum alone, in dB
    pub estimated_snr_db: f64,
}

/// Summarize `spectrum` around a tone at `tone_frequency` (and its mirror).
///
/// A tone above the Nyquist frequency is looked up at its alias, folded into
/// `[0, fs/2]` with `fs = frequency_resolution · len`.
///
/// Bins within `guard_bins` bins of `±tone_frequency` form the tone region; all
/// other bins form the noise region. The noise floor is the mean noise-region
/// power. The tone power is the tone-region power in excess of that floor, and
/// the estimated SNR compares it with the floor extended over every bin.
///
/// # Errors
///
/// Returns [`SignalError::InvalidParameter`] when the tone region or the noise
/// region is empty (tone outside the spectrum, or guard covering every bin).
pub fn summarize(
    spectrum: &Spectrum,
    tone_frequency: f64,
    guard_bins: usize,
) -> SignalResult<SpectrumSummary> {
    let tone = fold_to_nyquist(
        tone_frequency,
        spectrum.frequency_resolution * spectrum.len() as f64,
    );
    let guard = guard_bins as f64 * spectrum.frequency_resolution
        + spectrum.frequency_resolution * 1e-6;
    let in_tone_region = |f: f64| (f.abs() - tone).abs() <= guard;

    let (peak_frequency, peak_power) = spectrum
        .peak_where(|f| in_tone_region(f) && f >= 0.0)
        .or_else(|| spectrum.peak_where(in_tone_region))
        .ok_or_else(|| {
            SignalError::InvalidParameter(format!(
                "no bin within {} bins of {} Hz",
                guard_bins, tone_frequency
            ))
        })?;

    let mut tone_power = 0.0;
    let mut noise_power = 0.0;
    let mut noise_bins = 0usize;
    for (&f, &p) in spectrum.frequencies.iter().zip(&spectrum.power) {
        if in_tone_region(f) {
            tone_power += p;
        } else {
            noise_power += p;
            noise_bins += 1;
        }
    }
    if noise_bins == 0 {
        return Err(SignalError::InvalidParameter(format!(
            "{} guard bins around {} Hz leave no bin for the noise floor",
            guard_bins, tone_frequency
        )));
    }

    let tone_region_bins = spectrum.len() - noise_bins;
    let noise_floor = noise_power / noise_bins as f64;
    let excess = (tone_power - noise_floor * tone_region_bins as f64).max(0.0);
    let estimated_snr_db = linear_to_db(excess / (noise_floor * spectrum.len() as f64));

    Ok(SpectrumSummary {
        peak_frequency,
        peak_power_db: linear_to_db(peak_power.max(POWER_FLOOR)),
        noise_floor_db: linear_to_db(noise_floor.max(POWER_FLOOR)),
        estimated_snr_db,
    })
}

/// Alias of `frequency` in `[0, sampling_frequency / 2]`
fn fold_to_nyquist(frequency: f64, sampling_frequency: f64) -> f64 {
    if !(frequency.is_finite() && sampling_frequency > 0.0) {
        return frequency.abs();
    }
    let folded = frequency.rem_euclid(sampling_frequency);
    if folded > sampling_frequency / 2.0 {
        sampling_frequency - folded
    } else {
        folded
    }
}

/// Periodogram estimator over a pluggable [`FourierTransform`]
///
/// ### Example
///
/// ```
/// use rust_snr_psd::signal::SamplingParameters;
/// use rust_snr_psd::spectral::SpectrumEstimator;
///
/// let sampling = SamplingParameters::new(1000.0, 1.0).unwrap();
/// let signal: Vec<f64> = (0..1000)
///     .map(|i| (2.0 * std::f64::consts::PI * 50.0 * i as f64 / 1000.0).sin())
///     .collect();
///
/// let mut estimator = SpectrumEstimator::new();
/// let spectrum = estimator.estimate(&signal, &sampling).unwrap();
/// let (peak_frequency, _) = spectrum.peak().unwrap();
/// assert_eq!(peak_frequency.abs(), 50.0);
/// ```
pub struct SpectrumEstimator<T: FourierTransform = RustFftTransform> {
    transform: T,
}

impl SpectrumEstimator<RustFftTransform> {
    /// Estimator backed by the rustfft planner
    pub fn new() -> Self {
        Self::with_transform(RustFftTransform::new())
    }
}

impl Default for SpectrumEstimator<RustFftTransform> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FourierTransform> SpectrumEstimator<T> {
    /// Estimator backed by a custom transform
    pub fn with_transform(transform: T) -> Self {
        Self { transform }
    }

    /// Estimate the PSD of `signal` sampled with `sampling`.
    ///
    /// The FFT size is `sampling.sample_count()`; a signal of another length is
    /// zero-padded or truncated to it.
    pub fn estimate(
        &mut self,
        signal: &[f64],
        sampling: &SamplingParameters,
    ) -> SignalResult<Spectrum> {
        let fft_size = sampling.sample_count();
        if fft_size == 0 {
            return Err(SignalError::InvalidParameter(
                "FFT size must be at least 1".to_string(),
            ));
        }
        if signal.len() != fft_size {
            debug!(
                "Signal has {} samples, {} to FFT size {}",
                signal.len(),
                if signal.len() < fft_size {
                    "zero-padding"
                } else {
                    "truncating"
                },
                fft_size
            );
        }

        let dft = self.transform.transform(signal, fft_size);
        let power: Vec<f64> = fft_shift(&dft)
            .iter()
            .map(|bin| bin.norm_sqr() / fft_size as f64)
            .collect();

        let frequency_resolution = sampling.frequency_resolution();
        let half = (fft_size / 2) as f64;
        let frequencies = (0..fft_size)
            .map(|i| (i as f64 - half) * frequency_resolution)
            .collect();

        Ok(Spectrum {
            frequencies,
            power,
            frequency_resolution,
        })
    }
}

/// Estimate the PSD of `signal` from raw sampling frequency and duration.
///
/// Returns the spectrum whose `power` and `frequencies` both have
/// `floor(sampling_frequency · time_duration)` entries.
///
/// # Errors
///
/// [`SignalError::InvalidParameter`] when either parameter is non-positive or
/// their product is below one sample.
pub fn calculate_psd(
    signal: &[f64],
    sampling_frequency: f64,
    time_duration: f64,
) -> SignalResult<Spectrum> {
    let sampling = SamplingParameters::new(sampling_frequency, time_duration)?;
    SpectrumEstimator::new().estimate(signal, &sampling)
}
