// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-snr-psd project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! # Gaussian Noise Injection
//!
//! This module adds Gaussian white noise to a clean signal so that the result
//! has a requested signal-to-noise ratio.
//!
//! ## Scaling
//!
//! For a target SNR of `snr_db` decibels, a raw standard-normal draw `n` of the
//! same length as the signal `s` is scaled by
//!
//! ```text
//! snr   = 10^(snr_db / 10)
//! alpha = sqrt( Σ s[i]² / (snr · Σ n[i]²) )
//! ```
//!
//! so that the power of `alpha · n` is exactly `Σ s[i]² / snr` for that draw.
//! The realized SNR of a finite sequence is therefore exact for the draw, not a
//! statistical expectation.
//!
//! ## Examples
//!
//! ```rust
//! use rust_snr_psd::signal::noise::NoiseGenerator;
//!
//! // Seeded generator for reproducible noise
//! let mut generator = NoiseGenerator::new(12345);
//!
//! let clean = vec![1.0, -1.0, 1.0, -1.0];
//! let noisy = generator.add_noise(&clean, 10.0).unwrap();
//! assert_eq!(noisy.len(), clean.len());
//! ```

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use super::{db_to_linear, linear_to_db, SignalError, SignalResult};

/// Gaussian noise source backed by a seedable pseudo-random generator.
///
/// Two generators created with the same seed produce the same noise, which is
/// what the tests and the `--seed` option of the command line rely on.
///
/// # Examples
///
/// ```
/// use rust_snr_psd::signal::noise::NoiseGenerator;
///
/// let mut a = NoiseGenerator::new(7);
/// let mut b = NoiseGenerator::new(7);
/// assert_eq!(a.generate_gaussian(16), b.generate_gaussian(16));
/// ```
pub struct NoiseGenerator {
    rng: StdRng,
}

impl NoiseGenerator {
    /// Creates a new noise generator with a given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a new noise generator seeded from operating system entropy.
    ///
    /// Each call yields a different noise sequence.
    pub fn new_from_system_time() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a generator from an optional seed, falling back to OS entropy
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(seed),
            None => Self::new_from_system_time(),
        }
    }

    /// Draws one value from the standard normal distribution (mean 0, variance 1)
    pub fn random_gaussian(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }

    /// Draws `num_samples` independent standard normal values
    pub fn generate_gaussian(&mut self, num_samples: usize) -> Vec<f64> {
        gaussian_noise(num_samples, &mut self.rng)
    }

    /// Adds noise to `signal` at `target_snr_db`, see [`add_noise`]
    pub fn add_noise(&mut self, signal: &[f64], target_snr_db: f64) -> SignalResult<Vec<f64>> {
        add_noise(signal, target_snr_db, &mut self.rng)
    }

    /// Mutable access to the underlying generator, for APIs taking `&mut impl Rng`
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

/// Draws `num_samples` independent standard normal values from `rng`
pub fn gaussian_noise<R: Rng + ?Sized>(num_samples: usize, rng: &mut R) -> Vec<f64> {
    (0..num_samples).map(|_| rng.sample(StandardNormal)).collect()
}

/// Total power of a sequence, the sum of its squared samples
pub fn signal_power(samples: &[f64]) -> f64 {
    samples.iter().map(|&x| x * x).sum()
}

/// Amplitude factor applied to a noise draw so that
/// `signal_power / (alpha² · noise_power) == snr_linear`.
///
/// # Errors
///
/// Returns [`SignalError::DegenerateSignal`] when either power is zero or not
/// finite, since no finite scale factor exists.
pub fn noise_scale_factor(signal_power: f64, noise_power: f64, snr_linear: f64) -> SignalResult<f64> {
    if !(signal_power.is_finite() && signal_power > 0.0) {
        return Err(SignalError::DegenerateSignal(format!(
            "clean signal power is {}, cannot scale noise relative to it",
            signal_power
        )));
    }
    if !(noise_power.is_finite() && noise_power > 0.0) {
        return Err(SignalError::DegenerateSignal(format!(
            "noise draw power is {}, cannot scale it to the target SNR",
            noise_power
        )));
    }
    if snr_linear.is_nan() || snr_linear <= 0.0 {
        return Err(SignalError::InvalidParameter(format!(
            "linear SNR must be positive, got {}",
            snr_linear
        )));
    }

    Ok((signal_power / (snr_linear * noise_power)).sqrt())
}

/// Adds an already drawn noise sequence to `signal`, scaled to `target_snr_db`.
///
/// This is the deterministic half of [`add_noise`]: for a fixed `noise` the
/// added noise amplitude decreases monotonically as `target_snr_db` increases,
/// and `f64::INFINITY` returns the clean signal.
///
/// # Errors
///
/// * [`SignalError::InvalidParameter`] if the lengths differ or `target_snr_db`
///   is NaN or negative infinity
/// * [`SignalError::DegenerateSignal`] if the signal or the noise has zero power
pub fn add_scaled_noise(signal: &[f64], noise: &[f64], target_snr_db: f64) -> SignalResult<Vec<f64>> {
    if target_snr_db.is_nan() || target_snr_db == f64::NEG_INFINITY {
        return Err(SignalError::InvalidParameter(format!(
            "target SNR must be a number above -inf dB, got {}",
            target_snr_db
        )));
    }
    if signal.len() != noise.len() {
        return Err(SignalError::InvalidParameter(format!(
            "noise length {} does not match signal length {}",
            noise.len(),
            signal.len()
        )));
    }

    let snr = db_to_linear(target_snr_db);
    let alpha = noise_scale_factor(signal_power(signal), signal_power(noise), snr)?;
    debug!(
        "Scaling {} noise samples by {:.6e} for {} dB SNR",
        noise.len(),
        alpha,
        target_snr_db
    );

    Ok(signal
        .iter()
        .zip(noise)
        .map(|(&s, &n)| s + alpha * n)
        .collect())
}

/// Adds Gaussian white noise to `signal` so that the ratio of signal power to
/// added noise power equals `target_snr_db` for this draw.
///
/// One standard normal value per sample is drawn from `rng`; the draw is then
/// scaled by [`noise_scale_factor`] and added element-wise.
///
/// # Errors
///
/// See [`add_scaled_noise`]. An empty or all-zero signal is a
/// [`SignalError::DegenerateSignal`].
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use rust_snr_psd::signal::{add_noise, measured_snr_db};
///
/// let clean: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.1).sin()).collect();
/// let mut rng = StdRng::seed_from_u64(1);
/// let noisy = add_noise(&clean, 20.0, &mut rng).unwrap();
///
/// let realized = measured_snr_db(&clean, &noisy).unwrap();
/// assert!((realized - 20.0).abs() < 1e-9);
/// ```
pub fn add_noise<R: Rng + ?Sized>(
    signal: &[f64],
    target_snr_db: f64,
    rng: &mut R,
) -> SignalResult<Vec<f64>> {
    let noise = gaussian_noise(signal.len(), rng);
    add_scaled_noise(signal, &noise, target_snr_db)
}

/// Realized SNR in dB between a clean signal and its noisy version,
/// `10·log10(Σ clean² / Σ (noisy − clean)²)`.
///
/// # Errors
///
/// * [`SignalError::InvalidParameter`] if the lengths differ
/// * [`SignalError::DegenerateSignal`] if the clean signal has zero power
///
/// Identical inputs give `f64::INFINITY`.
pub fn measured_snr_db(clean: &[f64], noisy: &[f64]) -> SignalResult<f64> {
    if clean.len() != noisy.len() {
        return Err(SignalError::InvalidParameter(format!(
            "noisy length {} does not match clean length {}",
            noisy.len(),
            clean.len()
        )));
    }

    let clean_power = signal_power(clean);
    if clean_power <= 0.0 {
        return Err(SignalError::DegenerateSignal(
            "clean signal has no power".to_string(),
        ));
    }

    let noise_power: f64 = clean
        .iter()
        .zip(noisy)
        .map(|(&c, &n)| (n - c) * (n - c))
        .sum();

    Ok(linear_to_db(clean_power / noise_power))
}
