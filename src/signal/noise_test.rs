// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-snr-psd project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! # Tests for Gaussian Noise Injection
//!
//! ## Test Coverage:
//!
//! * **SNR scaling**: exact noise power for a draw, realized SNR, monotonic amplitude
//! * **Determinism**: identical seeds give identical noise
//! * **Statistics**: the raw draw is close to standard normal
//! * **Edge cases**: zero power signals and noise, NaN and infinite targets, length mismatch

use super::noise::{
    add_noise, add_scaled_noise, gaussian_noise, measured_snr_db, noise_scale_factor,
    signal_power, NoiseGenerator,
};
use super::SignalError;
use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(num_samples: usize, cycles_per_sample: f64) -> Vec<f64> {
        (0..num_samples)
            .map(|i| (2.0 * std::f64::consts::PI * cycles_per_sample * i as f64).sin())
            .collect()
    }

    // ========================================
    // SNR SCALING TESTS
    // ========================================

    #[test]
    fn test_scaled_noise_power_matches_target_for_the_draw() {
        let signal = sine(2000, 0.005);
        let mut rng = StdRng::seed_from_u64(12345);
        let noise = gaussian_noise(signal.len(), &mut rng);

        for snr_db in [-10.0, 0.0, 5.0, 20.0, 40.0] {
            let noisy = add_scaled_noise(&signal, &noise, snr_db).unwrap();
            let added: Vec<f64> = noisy.iter().zip(&signal).map(|(n, s)| n - s).collect();

            let expected = signal_power(&signal) / 10f64.powf(snr_db / 10.0);
            assert_relative_eq!(signal_power(&added), expected, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_realized_snr_equals_target() {
        let signal = sine(2000, 0.005);
        let mut generator = NoiseGenerator::new(2024);

        for snr_db in [20.0, 5.0] {
            let noisy = generator.add_noise(&signal, snr_db).unwrap();
            assert_eq!(noisy.len(), signal.len());
            let realized = measured_snr_db(&signal, &noisy).unwrap();
            assert_relative_eq!(realized, snr_db, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_noise_amplitude_decreases_with_snr() {
        let signal = sine(500, 0.01);
        let mut rng = StdRng::seed_from_u64(99);
        let noise = gaussian_noise(signal.len(), &mut rng);

        let mut previous = f64::INFINITY;
        for snr_db in [-20.0, -5.0, 0.0, 10.0, 30.0, 60.0, 120.0] {
            let noisy = add_scaled_noise(&signal, &noise, snr_db).unwrap();
            let added: f64 = noisy
                .iter()
                .zip(&signal)
                .map(|(n, s)| (n - s).abs())
                .fold(0.0, f64::max);
            assert!(
                added < previous,
                "noise amplitude {} at {} dB should be below {}",
                added,
                snr_db,
                previous
            );
            previous = added;
        }
        assert!(previous < 1e-5);
    }

    #[test]
    fn test_infinite_snr_returns_clean_signal() {
        let signal = sine(64, 0.1);
        let mut rng = StdRng::seed_from_u64(3);
        let noisy = add_noise(&signal, f64::INFINITY, &mut rng).unwrap();
        assert_eq!(noisy, signal);
    }

    #[test]
    fn test_scale_factor_formula() {
        // alpha = sqrt(100 / (10 * 4)) = sqrt(2.5)
        let alpha = noise_scale_factor(100.0, 4.0, 10.0).unwrap();
        assert_relative_eq!(alpha, 2.5f64.sqrt());
    }

    // ========================================
    // DETERMINISM TESTS
    // ========================================

    #[test]
    fn test_deterministic_output_with_same_seed() {
        let signal = sine(256, 0.05);
        let mut generator1 = NoiseGenerator::new(42);
        let mut generator2 = NoiseGenerator::new(42);

        assert_eq!(
            generator1.add_noise(&signal, 5.0).unwrap(),
            generator2.add_noise(&signal, 5.0).unwrap(),
            "Same seed should produce identical noisy signals"
        );
    }

    #[test]
    fn test_different_output_with_different_seeds() {
        let signal = sine(256, 0.05);
        let mut generator1 = NoiseGenerator::new(1);
        let mut generator2 = NoiseGenerator::new(2);

        assert_ne!(
            generator1.add_noise(&signal, 5.0).unwrap(),
            generator2.add_noise(&signal, 5.0).unwrap(),
            "Different seeds should produce different noisy signals"
        );
    }

    #[test]
    fn test_from_seed_without_seed_still_generates() {
        let mut generator = NoiseGenerator::from_seed(None);
        let samples = generator.generate_gaussian(32);
        assert_eq!(samples.len(), 32);
        assert!(samples.iter().all(|x| x.is_finite()));
    }

    // ========================================
    // STATISTICAL TESTS
    // ========================================

    #[test]
    fn test_gaussian_draw_statistics() {
        let mut generator = NoiseGenerator::new(777);
        let samples = generator.generate_gaussian(100_000);

        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let variance =
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64;

        assert!(mean.abs() < 0.02, "mean {} should be close to 0", mean);
        assert!(
            (variance - 1.0).abs() < 0.03,
            "variance {} should be close to 1",
            variance
        );
    }

    #[test]
    fn test_single_gaussian_values_are_finite() {
        let mut generator = NoiseGenerator::new(5);
        for _ in 0..1000 {
            assert!(generator.random_gaussian().is_finite());
        }
    }

    // ========================================
    // EDGE CASES
    // ========================================

    #[test]
    fn test_zero_signal_is_degenerate() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = add_noise(&[0.0; 128], 10.0, &mut rng);
        assert!(matches!(result, Err(SignalError::DegenerateSignal(_))));
    }

    #[test]
    fn test_empty_signal_is_degenerate() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = add_noise(&[], 10.0, &mut rng);
        assert!(matches!(result, Err(SignalError::DegenerateSignal(_))));
    }

    #[test]
    fn test_zero_noise_draw_is_degenerate() {
        let signal = sine(16, 0.1);
        let result = add_scaled_noise(&signal, &[0.0; 16], 10.0);
        assert!(matches!(result, Err(SignalError::DegenerateSignal(_))));
    }

    #[test]
    fn test_invalid_snr_targets_are_rejected() {
        let signal = sine(16, 0.1);
        let noise = vec![0.5; 16];
        for snr_db in [f64::NAN, f64::NEG_INFINITY] {
            let result = add_scaled_noise(&signal, &noise, snr_db);
            assert!(matches!(result, Err(SignalError::InvalidParameter(_))));
        }
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let signal = sine(16, 0.1);
        let result = add_scaled_noise(&signal, &[1.0; 8], 10.0);
        assert!(matches!(result, Err(SignalError::InvalidParameter(_))));

        let result = measured_snr_db(&signal, &[1.0; 8]);
        assert!(matches!(result, Err(SignalError::InvalidParameter(_))));
    }

    #[test]
    fn test_measured_snr_of_identical_signals_is_infinite() {
        let signal = sine(16, 0.1);
        assert_eq!(measured_snr_db(&signal, &signal).unwrap(), f64::INFINITY);
    }
}
