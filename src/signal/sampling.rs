// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-snr-psd project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Sampling parameters shared by the waveform generator and the spectrum estimator

use log::debug;

use super::{SignalError, SignalResult};

/// Relative distance to an integer under which `fs * duration` is treated as that integer
const SAMPLE_COUNT_TOLERANCE: f64 = 1e-9;

/// Validated sampling frequency and duration, with the derived sample count.
///
/// The sample count is computed exactly once, in [`SamplingParameters::new`].
/// The waveform generator uses it as the length of the time axis and the
/// spectrum estimator uses it as the FFT size, so both always agree.
///
/// The count follows a truncation convention: `floor(fs * duration)`. A product
/// that lands within a relative `1e-9` of an integer is snapped to that integer
/// first, so that binary representation artifacts such as
/// `100.0 * 0.29 == 28.999999999999996` do not silently drop a sample.
///
/// # Example
///
/// ```
/// use rust_snr_psd::signal::SamplingParameters;
///
/// let sampling = SamplingParameters::new(200_000.0, 0.01).unwrap();
/// assert_eq!(sampling.sample_count(), 2000);
/// assert_eq!(sampling.time_step(), 5e-6);
///
/// assert!(SamplingParameters::new(0.0, 0.01).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParameters {
    sampling_frequency: f64,
    time_duration: f64,
    sample_count: usize,
}

impl SamplingParameters {
    /// Validate the parameters and derive the sample count.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::InvalidParameter`] if either value is not a
    /// finite positive number, or if `sampling_frequency * time_duration < 1`
    /// (no complete sample fits in the duration).
    pub fn new(sampling_frequency: f64, time_duration: f64) -> SignalResult<Self> {
        if !sampling_frequency.is_finite() || sampling_frequency <= 0.0 {
            return Err(SignalError::InvalidParameter(format!(
                "sampling frequency must be a positive finite number, got {}",
                sampling_frequency
            )));
        }
        if !time_duration.is_finite() || time_duration <= 0.0 {
            return Err(SignalError::InvalidParameter(format!(
                "time duration must be a positive finite number, got {}",
                time_duration
            )));
        }

        let product = sampling_frequency * time_duration;
        if !product.is_finite() || product > usize::MAX as f64 {
            return Err(SignalError::InvalidParameter(format!(
                "sample count {} Hz x {} s is too large",
                sampling_frequency, time_duration
            )));
        }

        let sample_count = count_samples(product);
        if sample_count < 1 {
            return Err(SignalError::InvalidParameter(format!(
                "{} Hz x {} s yields no complete sample",
                sampling_frequency, time_duration
            )));
        }

        debug!(
            "Sampling {} Hz over {} s -> {} samples",
            sampling_frequency, time_duration, sample_count
        );

        Ok(Self {
            sampling_frequency,
            time_duration,
            sample_count,
        })
    }

    /// Sampling frequency in Hz
    pub fn sampling_frequency(&self) -> f64 {
        self.sampling_frequency
    }

    /// Duration of the acquisition in seconds
    pub fn time_duration(&self) -> f64 {
        self.time_duration
    }

    /// Number of samples in the time series, also the FFT size
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Interval between consecutive samples in seconds
    pub fn time_step(&self) -> f64 {
        1.0 / self.sampling_frequency
    }

    /// Spacing of the frequency axis in Hz (`fs / sample_count`)
    pub fn frequency_resolution(&self) -> f64 {
        self.sampling_frequency / self.sample_count as f64
    }

    /// Highest representable frequency in Hz
    pub fn nyquist_frequency(&self) -> f64 {
        self.sampling_frequency / 2.0
    }
}

fn count_samples(product: f64) -> usize {
    let nearest = product.round();
    if (product - nearest).abs() <= SAMPLE_COUNT_TOLERANCE * product.max(1.0) {
        nearest as usize
    } else {
        product.floor() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_scenario_sample_count() {
        let sampling = SamplingParameters::new(200_000.0, 0.01).unwrap();
        assert_eq!(sampling.sample_count(), 2000);
        assert_eq!(sampling.frequency_resolution(), 100.0);
        assert_eq!(sampling.nyquist_frequency(), 100_000.0);
    }

    #[test]
    fn test_truncates_fractional_products() {
        // 1000 Hz x 2.5 ms = 2.5 samples
        let sampling = SamplingParameters::new(1000.0, 0.0025).unwrap();
        assert_eq!(sampling.sample_count(), 2);

        let sampling = SamplingParameters::new(48_000.0, 0.0333).unwrap();
        assert_eq!(sampling.sample_count(), 1598);
    }

    #[test]
    fn test_representation_error_does_not_drop_a_sample() {
        assert!(100.0 * 0.29 < 29.0);
        let sampling = SamplingParameters::new(100.0, 0.29).unwrap();
        assert_eq!(sampling.sample_count(), 29);
    }

    #[test]
    fn test_rejects_non_positive_parameters() {
        for (fs, duration) in [
            (0.0, 0.01),
            (-1.0, 0.01),
            (1000.0, 0.0),
            (1000.0, -0.5),
            (f64::NAN, 1.0),
            (1000.0, f64::INFINITY),
        ] {
            let result = SamplingParameters::new(fs, duration);
            assert!(
                matches!(result, Err(SignalError::InvalidParameter(_))),
                "fs={} duration={} should be rejected",
                fs,
                duration
            );
        }
    }

    #[test]
    fn test_rejects_less_than_one_sample() {
        let result = SamplingParameters::new(10.0, 0.05);
        assert!(matches!(result, Err(SignalError::InvalidParameter(_))));

        let sampling = SamplingParameters::new(10.0, 0.1).unwrap();
        assert_eq!(sampling.sample_count(), 1);
    }
}
