// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-snr-psd project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Fast Fourier Transform (FFT) seam for spectral analysis
//!
//! This module isolates the discrete Fourier transform behind the
//! [`FourierTransform`] trait so the PSD estimator does not depend on a
//! particular FFT library. It provides:
//!
//! - [`RustFftTransform`], backed by the rustfft planner
//! - [`fft_shift`], which moves the zero-frequency bin to the center
//!
//! # Example
//!
//! ```
//! use rust_snr_psd::spectral::fft::{fft_shift, FourierTransform, RustFftTransform};
//!
//! let mut transform = RustFftTransform::new();
//! let bins = transform.transform(&[1.0, 0.0, 0.0, 0.0], 4);
//! assert_eq!(bins.len(), 4);
//!
//! assert_eq!(fft_shift(&[0, 1, 2, 3]), vec![2, 3, 0, 1]);
//! ```

use rustfft::{num_complex::Complex64, FftPlanner};

/// Trait for discrete Fourier transform implementations
pub trait FourierTransform {
    /// Compute the forward DFT of `signal` over exactly `size` points.
    ///
    /// The input is zero-padded when shorter than `size` and truncated when
    /// longer. The output has `size` bins in natural order (DC first), without
    /// normalization.
    fn transform(&mut self, signal: &[f64], size: usize) -> Vec<Complex64>;
}

/// FFT implementation using the rustfft planner
///
/// The planner is kept between calls, so repeated transforms of the same
/// size reuse the already planned algorithm.
pub struct RustFftTransform {
    planner: FftPlanner<f64>,
}

impl RustFftTransform {
    /// Create a transform with an empty planner
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
        }
    }
}

impl Default for RustFftTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl FourierTransform for RustFftTransform {
    fn transform(&mut self, signal: &[f64], size: usize) -> Vec<Complex64> {
        if size == 0 {
            return Vec::new();
        }

        // Convert input to complex numbers, zero-padded or truncated to `size`
        let mut buffer: Vec<Complex64> = signal
            .iter()
            .take(size)
            .map(|&x| Complex64::new(x, 0.0))
            .collect();
        buffer.resize(size, Complex64::new(0.0, 0.0));

        let fft = self.planner.plan_fft_forward(size);
        fft.process(&mut buffer);

        buffer
    }
}

/// Reorder DFT bins so the zero-frequency component sits at index `len / 2`.
///
/// This is a right rotation by `len / 2` (integer division). For an even
/// length the two halves are swapped; for an odd length the negative
/// frequencies `-(len-1)/2 ..= -1` come first, then DC and the positive ones.
///
/// ```
/// use rust_snr_psd::spectral::fft::fft_shift;
///
/// assert_eq!(fft_shift(&[0, 1, 2, -2, -1]), vec![-2, -1, 0, 1, 2]);
/// ```
pub fn fft_shift<T: Clone>(bins: &[T]) -> Vec<T> {
    let mut shifted = bins.to_vec();
    shifted.rotate_right(bins.len() / 2);
    shifted
}

/// Inverse of [`fft_shift`]: bring the zero-frequency bin back to index 0
pub fn ifft_shift<T: Clone>(bins: &[T]) -> Vec<T> {
    let mut unshifted = bins.to_vec();
    unshifted.rotate_left(bins.len() / 2);
    unshifted
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Direct O(n²) DFT used as a reference
    fn naive_dft(signal: &[f64]) -> Vec<Complex64> {
        let n = signal.len();
        (0..n)
            .map(|k| {
                signal
                    .iter()
                    .enumerate()
                    .map(|(t, &x)| {
                        let angle = -2.0 * std::f64::consts::PI * (k * t) as f64 / n as f64;
                        Complex64::new(x * angle.cos(), x * angle.sin())
                    })
                    .sum()
            })
            .collect()
    }

    #[test]
    fn test_matches_naive_dft() {
        let signal: Vec<f64> = (0..12).map(|i| ((i * 7 % 5) as f64) - 2.0).collect();
        let mut transform = RustFftTransform::new();
        let fast = transform.transform(&signal, signal.len());
        let reference = naive_dft(&signal);

        for (a, b) in fast.iter().zip(&reference) {
            assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-9);
            assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_zero_padding_and_truncation() {
        let mut transform = RustFftTransform::new();

        // Impulse padded to 8 points has a flat spectrum
        let padded = transform.transform(&[1.0], 8);
        assert_eq!(padded.len(), 8);
        for bin in &padded {
            assert_abs_diff_eq!(bin.re, 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(bin.im, 0.0, epsilon = 1e-12);
        }

        // Only the first 4 samples are used
        let truncated = transform.transform(&[1.0, 1.0, 1.0, 1.0, 100.0, 100.0], 4);
        assert_abs_diff_eq!(truncated[0].re, 4.0, epsilon = 1e-12);
        for bin in &truncated[1..] {
            assert_abs_diff_eq!(bin.norm(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_zero_size_yields_empty_output() {
        let mut transform = RustFftTransform::new();
        assert!(transform.transform(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn test_fft_shift_even_and_odd() {
        assert_eq!(fft_shift(&[0, 1, 2, 3, 4, 5]), vec![3, 4, 5, 0, 1, 2]);
        assert_eq!(fft_shift(&[0, 1, 2, 3, 4]), vec![3, 4, 0, 1, 2]);
        assert_eq!(fft_shift(&[7]), vec![7]);
        assert!(fft_shift::<i32>(&[]).is_empty());
    }

    #[test]
    fn test_ifft_shift_undoes_fft_shift() {
        for len in 0..9 {
            let bins: Vec<usize> = (0..len).collect();
            assert_eq!(ifft_shift(&fft_shift(&bins)), bins);
        }
    }
}
