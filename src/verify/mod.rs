//! Numerical verification of Fourier-transform properties
//!
//! Each check builds two spectra that should agree analytically, one by
//! transforming a derived signal directly and one by predicting it from
//! the original spectrum, and reports the largest pointwise deviation:
//!
//! - **Linearity**: `F{a*x1 + b*x2}` against `a*F{x1} + b*F{x2}`
//! - **Time shift**: `F{x(t - t0)}` against `F{x} * exp(-j*2*pi*f*t0)`
//! - **Time scaling**: `F{x(a*t)}` against `F{x}(f/a) / |a|`
//!
//! All comparisons happen in zero-centered bin order on the verifier's
//! single [`TimeAxis`]. Deviations are reported raw; deciding whether a
//! value is acceptable is up to the caller.
//!
//! The time-scaling prediction interpolates the real and imaginary parts of
//! the original spectrum linearly in frequency. That is an approximation of
//! `X(f/a)`, and the reported error includes it.

pub mod result;

pub use result::{Property, PropertyParameters, VerificationResult};

use rustfft::num_complex::Complex64;
use std::f64::consts::PI;

use crate::analysis::{Spectrum, SpectrumAnalyzer};
use crate::error::{FourierError, Result};
use crate::signal::interp::interp;
use crate::signal::{Signal, SignalGenerator, TimeAxis};

/// Largest complex modulus of `actual[i] - predicted[i]`
pub fn max_deviation(actual: &[Complex64], predicted: &[Complex64]) -> Result<f64> {
    if actual.len() != predicted.len() {
        return Err(FourierError::shape_mismatch(
            actual.len(),
            predicted.len(),
            "predicted spectrum",
        ));
    }

    Ok(actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).norm())
        .fold(0.0, f64::max))
}

/// Linearity check output
#[derive(Debug, Clone)]
pub struct LinearityOutcome {
    pub result: VerificationResult,
    /// `a*x1 + b*x2` in the time domain
    pub combined: Signal,
    /// Direct transform of `combined`
    pub spectrum: Spectrum,
    /// `a*X1 + b*X2`, zero-centered
    pub predicted: Vec<Complex64>,
}

/// Time-shift check output
#[derive(Debug, Clone)]
pub struct TimeShiftOutcome {
    pub result: VerificationResult,
    /// `x(t - t0)` realized by resampling
    pub shifted: Signal,
    /// Direct transform of `shifted`
    pub spectrum: Spectrum,
    /// `X(f) * exp(-j*2*pi*f*t0)`, zero-centered
    pub predicted: Vec<Complex64>,
}

/// Time-scaling check output
#[derive(Debug, Clone)]
pub struct TimeScalingOutcome {
    pub result: VerificationResult,
    /// `x(a*t)` realized by resampling
    pub scaled: Signal,
    /// Direct transform of `scaled`
    pub spectrum: Spectrum,
    /// Interpolated `X(f/a) / |a|`, zero-centered
    pub predicted: Vec<Complex64>,
}

/// Runs the property checks on one time axis
#[derive(Debug)]
pub struct PropertyVerifier<'a> {
    axis: &'a TimeAxis,
    analyzer: SpectrumAnalyzer,
}

impl<'a> PropertyVerifier<'a> {
    /// Create a verifier whose checks all use `axis` and its sampling rate
    pub fn new(axis: &'a TimeAxis) -> Self {
        Self {
            axis,
            analyzer: SpectrumAnalyzer::new(),
        }
    }

    /// The axis every checked signal must be aligned to
    pub fn axis(&self) -> &'a TimeAxis {
        self.axis
    }

    /// Transform a signal aligned to the verifier's axis
    pub fn transform(&mut self, signal: &Signal) -> Result<Spectrum> {
        signal.check_aligned(self.axis, "transform")?;
        self.analyzer.transform(signal, self.axis.sampling_rate())
    }

    /// Compare `F{a*x1 + b*x2}` with `a*F{x1} + b*F{x2}`
    pub fn verify_linearity(
        &mut self,
        x1: &Signal,
        x2: &Signal,
        a: f64,
        b: f64,
    ) -> Result<LinearityOutcome> {
        if !a.is_finite() || !b.is_finite() {
            return Err(FourierError::invalid(format!(
                "linearity coefficients must be finite, got a={} b={}",
                a, b
            )));
        }
        x1.check_aligned(self.axis, "linearity x1")?;
        x2.check_aligned(self.axis, "linearity x2")?;

        let combined = SignalGenerator::new(self.axis).linear_combination(x1, x2, a, b)?;

        let spectrum1 = self.transform(x1)?;
        let spectrum2 = self.transform(x2)?;
        let spectrum = self.transform(&combined)?;

        let predicted: Vec<Complex64> = spectrum1
            .centered_coefficients()
            .iter()
            .zip(spectrum2.centered_coefficients())
            .map(|(&c1, &c2)| c1 * a + c2 * b)
            .collect();

        let max_error = max_deviation(spectrum.centered_coefficients(), &predicted)?;
        tracing::debug!("Linearity (a={}, b={}): max error {:e}", a, b, max_error);

        Ok(LinearityOutcome {
            result: VerificationResult::new(max_error, PropertyParameters::Linearity { a, b }),
            combined,
            spectrum,
            predicted,
        })
    }

    /// Compare `F{x(t - t0)}` with `F{x} * exp(-j*2*pi*f*t0)`
    pub fn verify_time_shift(&mut self, x: &Signal, t0: f64) -> Result<TimeShiftOutcome> {
        x.check_aligned(self.axis, "time shift input")?;

        let shifted = SignalGenerator::new(self.axis).time_shift(x, t0)?;

        let original = self.transform(x)?;
        let spectrum = self.transform(&shifted)?;

        let predicted: Vec<Complex64> = original
            .centered_coefficients()
            .iter()
            .zip(original.centered_frequencies())
            .map(|(&c, &f)| c * Complex64::from_polar(1.0, -2.0 * PI * f * t0))
            .collect();

        let max_error = max_deviation(spectrum.centered_coefficients(), &predicted)?;
        tracing::debug!("Time shift (t0={} s): max error {:e}", t0, max_error);

        Ok(TimeShiftOutcome {
            result: VerificationResult::new(max_error, PropertyParameters::TimeShift { t0 }),
            shifted,
            spectrum,
            predicted,
        })
    }

    /// Compare `F{x(a*t)}` with `F{x}(f/a) / |a|`, `a > 0`
    pub fn verify_time_scaling(&mut self, x: &Signal, a: f64) -> Result<TimeScalingOutcome> {
        if !a.is_finite() || a <= 0.0 {
            return Err(FourierError::invalid(format!(
                "time scale factor must be positive and finite, got {}",
                a
            )));
        }
        x.check_aligned(self.axis, "time scaling input")?;

        let scaled = SignalGenerator::new(self.axis).time_scale(x, a)?;

        let original = self.transform(x)?;
        let spectrum = self.transform(&scaled)?;

        let freqs = original.centered_frequencies();
        let targets: Vec<f64> = freqs.iter().map(|&f| f / a).collect();
        let (re, im): (Vec<f64>, Vec<f64>) = original
            .centered_coefficients()
            .iter()
            .map(|c| (c.re, c.im))
            .unzip();

        let re_pred = interp(&targets, freqs, &re, 0.0)?;
        let im_pred = interp(&targets, freqs, &im, 0.0)?;
        let predicted: Vec<Complex64> = re_pred
            .iter()
            .zip(im_pred.iter())
            .map(|(&r, &i)| Complex64::new(r, i) / a.abs())
            .collect();

        let max_error = max_deviation(spectrum.centered_coefficients(), &predicted)?;
        tracing::debug!("Time scaling (a={}): max error {:e}", a, max_error);

        Ok(TimeScalingOutcome {
            result: VerificationResult::new(max_error, PropertyParameters::TimeScaling { a }),
            scaled,
            spectrum,
            predicted,
        })
    }
}
