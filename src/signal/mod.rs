//! Sampled signals and their shared time axis
//!
//! - [`TimeAxis`] - uniformly spaced sample instants centered at zero
//! - [`Signal`] - real-valued samples aligned 1:1 with a time axis
//! - [`SignalGenerator`] - rectangular pulse, unit step, sinusoid,
//!   linear combination and linear-interpolation resampling
//!
//! A run builds exactly one [`TimeAxis`] and every signal it produces is
//! aligned to it, so all spectra share the same frequency bins.

pub mod generator;
pub mod interp;

pub use generator::SignalGenerator;

use crate::error::{FourierError, Result};

/// Largest sample count a time axis may hold (2^26, about 1 GiB of complex
/// FFT buffers across a run)
pub const MAX_SAMPLES: usize = 1 << 26;

/// Uniformly sampled time instants `t[n] = n/fs - T/2` for `n = 0..N`
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    sampling_rate: f64,
    duration: f64,
    times: Vec<f64>,
}

impl TimeAxis {
    /// Build the axis for `duration` seconds sampled at `sampling_rate` Hz.
    ///
    /// The sample count is `floor(duration * sampling_rate)` and must be at
    /// least one.
    pub fn new(sampling_rate: f64, duration: f64) -> Result<Self> {
        if !sampling_rate.is_finite() || sampling_rate <= 0.0 {
            return Err(FourierError::invalid(format!(
                "sampling rate must be a positive finite number, got {}",
                sampling_rate
            )));
        }
        if !duration.is_finite() || duration <= 0.0 {
            return Err(FourierError::invalid(format!(
                "duration must be a positive finite number, got {}",
                duration
            )));
        }

        let n = (duration * sampling_rate).floor();
        if n < 1.0 {
            return Err(FourierError::invalid(format!(
                "time axis of {} s at {} Hz has no samples",
                duration, sampling_rate
            )));
        }

        if n > MAX_SAMPLES as f64 {
            return Err(FourierError::invalid(format!(
                "time axis of {} s at {} Hz needs {} samples, limit is {}",
                duration, sampling_rate, n, MAX_SAMPLES
            )));
        }

        let half = duration / 2.0;
        let times = (0..n as usize)
            .map(|i| i as f64 / sampling_rate - half)
            .collect();

        Ok(Self {
            sampling_rate,
            duration,
            times,
        })
    }

    /// Number of samples N
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false for a constructed axis; present for API symmetry
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Sampling rate in Hz
    pub fn sampling_rate(&self) -> f64 {
        self.sampling_rate
    }

    /// Nominal duration in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Spacing between consecutive samples (1/fs)
    pub fn sample_interval(&self) -> f64 {
        1.0 / self.sampling_rate
    }

    /// Sample instants in ascending order
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// First sample instant (`-T/2`)
    pub fn start(&self) -> f64 {
        self.times[0]
    }

    /// Last sample instant
    pub fn end(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Apply `f` to every sample instant
    pub fn map<F>(&self, f: F) -> Vec<f64>
    where
        F: Fn(f64) -> f64,
    {
        self.times.iter().map(|&t| f(t)).collect()
    }
}

/// Real-valued samples aligned with a [`TimeAxis`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signal {
    values: Vec<f64>,
}

impl Signal {
    /// Wrap raw sample values
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the signal holds no samples
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the samples
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Take ownership of the samples
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Iterate over the samples
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.values.iter()
    }

    /// Sum of squared samples
    pub fn energy(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum()
    }

    /// Fail with `ShapeMismatch` unless this signal has one sample per axis instant
    pub fn check_aligned(&self, axis: &TimeAxis, context: &str) -> Result<()> {
        if self.len() != axis.len() {
            return Err(FourierError::shape_mismatch(axis.len(), self.len(), context));
        }
        Ok(())
    }
}

impl From<Vec<f64>> for Signal {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl AsRef<[f64]> for Signal {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}
