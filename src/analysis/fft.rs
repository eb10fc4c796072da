//! Discrete Fourier transform of sampled signals
//!
//! Provides frequency domain analysis for real sequences including:
//! - Unnormalized forward DFT, `X[k] = sum_n x[n] * exp(-j*2*pi*k*n/N)`
//! - Frequency bins in natural FFT order and zero-centered order
//! - Magnitude and phase spectra
//! - Peak frequency detection
//!
//! No scaling by `N` is applied anywhere; predicted spectra built from a
//! [`Spectrum`] must use the same convention.

use rustfft::{num_complex::Complex64, FftPlanner};
use std::f64::consts::PI;
use std::fmt;

use crate::error::{FourierError, Result};

/// Frequency of each DFT bin in natural order: `k*fs/N` for the first
/// `ceil(N/2)` bins, then wrapping to negative frequencies
pub fn fft_frequencies(n: usize, sample_rate: f64) -> Vec<f64> {
    let resolution = sample_rate / n as f64;
    let positive = n.div_ceil(2);
    (0..n)
        .map(|k| {
            if k < positive {
                k as f64 * resolution
            } else {
                (k as f64 - n as f64) * resolution
            }
        })
        .collect()
}

/// Rotate natural-order DFT output so frequencies ascend with DC at index `N/2`
pub fn fft_shift<T: Clone>(spectrum: &[T]) -> Vec<T> {
    let split = spectrum.len().div_ceil(2);
    let mut shifted = Vec::with_capacity(spectrum.len());
    shifted.extend_from_slice(&spectrum[split..]);
    shifted.extend_from_slice(&spectrum[..split]);
    shifted
}

/// Argument of `c` in `(-pi, pi]`
pub fn wrapped_phase(c: Complex64) -> f64 {
    let phase = c.arg();
    if phase <= -PI {
        phase + 2.0 * PI
    } else {
        phase
    }
}

/// DFT coefficients and their frequency bins
///
/// Both the natural FFT order (bin 0 = DC, ascending then wrapping
/// negative) and the zero-centered order (most negative frequency first,
/// DC at index `N/2`) are kept. The zero-centered order is what the
/// property checks and plots use.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    coefficients: Vec<Complex64>,
    frequencies: Vec<f64>,
    centered_coefficients: Vec<Complex64>,
    centered_frequencies: Vec<f64>,
    sample_rate: f64,
    frequency_resolution: f64,
}

impl Spectrum {
    /// Build a spectrum from natural-order coefficients
    pub fn from_coefficients(coefficients: Vec<Complex64>, sample_rate: f64) -> Result<Self> {
        if coefficients.is_empty() {
            return Err(FourierError::invalid("spectrum needs at least one bin"));
        }
        let n = coefficients.len();
        let frequencies = fft_frequencies(n, sample_rate);
        let centered_coefficients = fft_shift(&coefficients);
        let centered_frequencies = fft_shift(&frequencies);

        Ok(Self {
            coefficients,
            frequencies,
            centered_coefficients,
            centered_frequencies,
            sample_rate,
            frequency_resolution: sample_rate / n as f64,
        })
    }

    /// Number of bins N
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// Always false for a computed spectrum
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Coefficients in natural FFT order
    pub fn coefficients(&self) -> &[Complex64] {
        &self.coefficients
    }

    /// Bin frequencies (Hz) in natural FFT order
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Coefficients in zero-centered order
    pub fn centered_coefficients(&self) -> &[Complex64] {
        &self.centered_coefficients
    }

    /// Bin frequencies (Hz) in zero-centered, ascending order
    pub fn centered_frequencies(&self) -> &[f64] {
        &self.centered_frequencies
    }

    /// Sample rate used for computation
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Frequency resolution (Hz per bin)
    pub fn frequency_resolution(&self) -> f64 {
        self.frequency_resolution
    }

    /// Index of the 0 Hz bin in zero-centered order
    pub fn dc_index(&self) -> usize {
        self.len() / 2
    }

    /// Modulus of each zero-centered coefficient
    pub fn magnitude(&self) -> Vec<f64> {
        self.centered_coefficients.iter().map(|c| c.norm()).collect()
    }

    /// Argument of each zero-centered coefficient, in `(-pi, pi]`
    pub fn phase(&self) -> Vec<f64> {
        self.centered_coefficients
            .iter()
            .map(|&c| wrapped_phase(c))
            .collect()
    }

    /// Modulus of each natural-order coefficient
    pub fn natural_magnitude(&self) -> Vec<f64> {
        self.coefficients.iter().map(|c| c.norm()).collect()
    }

    /// Argument of each natural-order coefficient, in `(-pi, pi]`
    pub fn natural_phase(&self) -> Vec<f64> {
        self.coefficients.iter().map(|&c| wrapped_phase(c)).collect()
    }

    /// Find the peak frequency and its magnitude
    pub fn peak(&self) -> Option<(f64, f64)> {
        let magnitudes = self.magnitude();
        let (idx, &max_mag) = magnitudes
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))?;

        Some((self.centered_frequencies[idx], max_mag))
    }

    /// Find the top N peaks as `(frequency, magnitude)`, strongest first
    pub fn top_peaks(&self, n: usize) -> Vec<(f64, f64)> {
        let mut indexed: Vec<(usize, f64)> = self.magnitude().into_iter().enumerate().collect();

        // Sort by magnitude descending
        indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        // Take top N, filtering out adjacent bins (simple peak detection)
        let mut peaks = Vec::new();
        for (idx, mag) in indexed {
            if peaks.len() >= n {
                break;
            }
            let freq = self.centered_frequencies[idx];
            let too_close = peaks
                .iter()
                .any(|&(f, _): &(f64, f64)| (freq - f).abs() < self.frequency_resolution * 2.0);

            if !too_close {
                peaks.push((freq, mag));
            }
        }

        peaks
    }

    /// Get frequency at a zero-centered bin index
    pub fn frequency_at(&self, bin: usize) -> Option<f64> {
        self.centered_frequencies.get(bin).copied()
    }

    /// Get the DC component (0 Hz magnitude)
    pub fn dc_component(&self) -> f64 {
        self.coefficients.first().map(|c| c.norm()).unwrap_or(0.0)
    }
}

/// Computes [`Spectrum`]s, reusing FFT plans across calls
pub struct SpectrumAnalyzer {
    planner: FftPlanner<f64>,
    transforms: u64,
}

impl fmt::Debug for SpectrumAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpectrumAnalyzer")
            .field("transforms", &self.transforms)
            .finish()
    }
}

impl SpectrumAnalyzer {
    /// Create a new analyzer
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
            transforms: 0,
        }
    }

    /// Number of transforms computed so far
    pub fn transforms(&self) -> u64 {
        self.transforms
    }

    /// Compute the unnormalized DFT of `signal` sampled at `sample_rate` Hz
    ///
    /// The input is copied into a private complex buffer; it is never
    /// modified.
    pub fn transform<S>(&mut self, signal: &S, sample_rate: f64) -> Result<Spectrum>
    where
        S: AsRef<[f64]> + ?Sized,
    {
        let samples = signal.as_ref();
        let n = samples.len();

        if n == 0 {
            return Err(FourierError::invalid("cannot transform an empty signal"));
        }
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(FourierError::invalid(format!(
                "sampling rate must be a positive finite number, got {}",
                sample_rate
            )));
        }

        let mut buffer: Vec<Complex64> = samples.iter().map(|&s| Complex64::new(s, 0.0)).collect();

        let fft = self.planner.plan_fft_forward(n);
        fft.process(&mut buffer);
        self.transforms += 1;

        tracing::trace!("Computed {}-point DFT at {} Hz", n, sample_rate);

        Spectrum::from_coefficients(buffer, sample_rate)
    }
}

impl Default for SpectrumAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sine(sample_rate: f64, n: usize, freq: f64) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let t = i as f64 / sample_rate - n as f64 / sample_rate / 2.0;
                (2.0 * PI * freq * t).sin()
            })
            .collect()
    }

    #[test]
    fn test_fft_frequencies_even() {
        assert_eq!(fft_frequencies(4, 4.0), vec![0.0, 1.0, -2.0, -1.0]);
    }

    #[test]
    fn test_fft_frequencies_odd() {
        assert_eq!(fft_frequencies(5, 5.0), vec![0.0, 1.0, 2.0, -2.0, -1.0]);
    }

    #[test]
    fn test_fft_shift_even_and_odd() {
        assert_eq!(
            fft_shift(&fft_frequencies(4, 4.0)),
            vec![-2.0, -1.0, 0.0, 1.0]
        );
        assert_eq!(
            fft_shift(&fft_frequencies(5, 5.0)),
            vec![-2.0, -1.0, 0.0, 1.0, 2.0]
        );
        assert_eq!(fft_shift(&[7]), vec![7]);
    }

    #[test]
    fn test_wrapped_phase_range() {
        let neg_zero_imag = Complex64::new(-1.0, -0.0);
        assert_eq!(wrapped_phase(neg_zero_imag), PI);
        assert_eq!(wrapped_phase(Complex64::new(0.0, 1.0)), PI / 2.0);
        assert_eq!(wrapped_phase(Complex64::new(0.0, -1.0)), -PI / 2.0);
    }

    #[test]
    fn test_transform_matches_direct_dft() {
        let samples = [1.0, 2.0, 0.0, -1.0, 0.5];
        let n = samples.len();
        let mut analyzer = SpectrumAnalyzer::new();
        let spectrum = analyzer.transform(&samples[..], 5.0).unwrap();

        for k in 0..n {
            let direct: Complex64 = samples
                .iter()
                .enumerate()
                .map(|(i, &x)| {
                    Complex64::from_polar(x, -2.0 * PI * k as f64 * i as f64 / n as f64)
                })
                .sum();
            assert!((spectrum.coefficients()[k] - direct).norm() < 1e-12);
        }
    }

    #[test]
    fn test_transform_is_unnormalized() {
        let mut analyzer = SpectrumAnalyzer::new();
        let spectrum = analyzer.transform(&vec![1.0; 64], 64.0).unwrap();
        assert!((spectrum.dc_component() - 64.0).abs() < 1e-12);
        assert!((spectrum.magnitude()[spectrum.dc_index()] - 64.0).abs() < 1e-12);
    }

    #[test]
    fn test_fft_sine_wave() {
        let sample_rate = 2000.0;
        let n = 2000;
        let freq = 50.0;

        let mut analyzer = SpectrumAnalyzer::new();
        let spectrum = analyzer.transform(&sine(sample_rate, n, freq), sample_rate).unwrap();

        let (peak_freq, peak_mag) = spectrum.peak().expect("Should find peak");
        assert!((peak_freq.abs() - freq).abs() < 1e-9);
        assert!((peak_mag - n as f64 / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_top_peaks_two_tones() {
        let sample_rate = 1000.0;
        let n = 1000;
        let samples: Vec<f64> = (0..n)
            .map(|i| {
                let t = i as f64 / sample_rate;
                (2.0 * PI * 50.0 * t).sin() + 0.5 * (2.0 * PI * 120.0 * t).sin()
            })
            .collect();

        let mut analyzer = SpectrumAnalyzer::new();
        let spectrum = analyzer.transform(&samples, sample_rate).unwrap();

        let peaks = spectrum.top_peaks(4);
        assert_eq!(peaks.len(), 4);
        let mut strong: Vec<f64> = peaks[..2].iter().map(|p| p.0).collect();
        strong.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(strong, vec![-50.0, 50.0]);
        for &(f, _) in &peaks[2..] {
            assert!((f.abs() - 120.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_transform_rejects_bad_input() {
        let mut analyzer = SpectrumAnalyzer::new();
        assert!(matches!(
            analyzer.transform(&[] as &[f64], 1000.0),
            Err(FourierError::InvalidParameter(_))
        ));
        assert!(matches!(
            analyzer.transform(&[1.0, 2.0][..], 0.0),
            Err(FourierError::InvalidParameter(_))
        ));
        assert!(matches!(
            analyzer.transform(&[1.0, 2.0][..], f64::INFINITY),
            Err(FourierError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_transform_counter() {
        let mut analyzer = SpectrumAnalyzer::default();
        let samples = vec![0.0; 16];
        analyzer.transform(&samples, 16.0).unwrap();
        analyzer.transform(&samples, 16.0).unwrap();
        assert_eq!(analyzer.transforms(), 2);
    }

    #[test]
    fn test_natural_views_rotate_to_centered() {
        let mut analyzer = SpectrumAnalyzer::new();
        let samples = [1.0, 2.0, -0.5, 0.25, 3.0];
        let spectrum = analyzer.transform(&samples[..], 5.0).unwrap();

        assert_eq!(fft_shift(&spectrum.natural_magnitude()), spectrum.magnitude());
        assert_eq!(fft_shift(&spectrum.natural_phase()), spectrum.phase());
        assert_eq!(spectrum.natural_magnitude()[0], spectrum.dc_component());
        assert_eq!(spectrum.magnitude()[spectrum.dc_index()], spectrum.dc_component());
    }

    proptest! {
        #[test]
        fn test_transform_shape_and_rotation(
            samples in prop::collection::vec(-10.0f64..10.0, 1..96),
            sample_rate in 1.0f64..10_000.0
        ) {
            let mut analyzer = SpectrumAnalyzer::new();
            let spectrum = analyzer.transform(&samples, sample_rate).unwrap();
            let n = samples.len();

            prop_assert_eq!(spectrum.coefficients().len(), n);
            prop_assert_eq!(spectrum.frequencies().len(), n);
            prop_assert_eq!(spectrum.centered_coefficients().len(), n);
            prop_assert_eq!(spectrum.centered_frequencies().len(), n);

            // Zero-centered order is a rotation of natural order
            let split = n.div_ceil(2);
            for i in 0..n {
                let natural = (i + split) % n;
                prop_assert_eq!(
                    spectrum.centered_coefficients()[i],
                    spectrum.coefficients()[natural]
                );
                prop_assert_eq!(
                    spectrum.centered_frequencies()[i],
                    spectrum.frequencies()[natural]
                );
            }

            // Ascending frequencies with DC at N/2
            for pair in spectrum.centered_frequencies().windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
            prop_assert_eq!(spectrum.centered_frequencies()[spectrum.dc_index()], 0.0);
        }

        #[test]
        fn test_transform_is_idempotent(
            samples in prop::collection::vec(-1.0e3f64..1.0e3, 1..64)
        ) {
            let mut analyzer = SpectrumAnalyzer::new();
            let first = analyzer.transform(&samples, 100.0).unwrap();
            let second = analyzer.transform(&samples, 100.0).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn test_phase_in_half_open_range(
            samples in prop::collection::vec(-5.0f64..5.0, 1..48)
        ) {
            let mut analyzer = SpectrumAnalyzer::new();
            let spectrum = analyzer.transform(&samples, 48.0).unwrap();
            for p in spectrum.phase() {
                prop_assert!(p > -PI && p <= PI);
            }
        }
    }
}
