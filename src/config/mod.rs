//! Run configuration for fourier-props
//!
//! Every constant a run depends on (sampling, waveform parameters and the
//! property-check parameters) lives in one immutable [`RunConfig`] that is
//! passed explicitly to the pipeline, so several independent runs can share
//! a process.
//!
//! # Files
//!
//! A configuration file may be TOML (`.toml`) or JSON (anything else).
//! Missing fields keep their defaults, so a file only needs the values it
//! changes:
//!
//! ```toml
//! sampling_rate_hz = 4000.0
//! time_shift_s = 0.025
//! ```

use crate::error::{FourierError, Result};
use crate::signal::MAX_SAMPLES;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default sampling rate in Hz
pub const DEFAULT_SAMPLING_RATE_HZ: f64 = 2000.0;

/// Default signal duration in seconds
pub const DEFAULT_DURATION_S: f64 = 1.0;

/// Default rectangular pulse width in seconds
pub const DEFAULT_RECT_WIDTH_S: f64 = 0.2;

/// Default sinusoid frequency in Hz
pub const DEFAULT_SINE_FREQ_HZ: f64 = 50.0;

/// Default delay for the time-shift check in seconds
pub const DEFAULT_TIME_SHIFT_S: f64 = 0.05;

/// Default compression factor for the time-scaling check
pub const DEFAULT_TIME_SCALE: f64 = 2.0;

/// Parameters of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Sampling rate in Hz
    pub sampling_rate_hz: f64,

    /// Signal duration in seconds; the time axis spans `[-T/2, T/2)`
    pub duration_s: f64,

    /// Rectangular pulse width in seconds
    pub rect_width_s: f64,

    /// Rectangular pulse center in seconds
    pub rect_center_s: f64,

    /// Rectangular pulse amplitude
    pub rect_amplitude: f64,

    /// Sinusoid frequency in Hz
    pub sine_freq_hz: f64,

    /// Weight of the sinusoid in the linearity check
    pub linearity_a: f64,

    /// Weight of the rectangular pulse in the linearity check
    pub linearity_b: f64,

    /// Delay applied in the time-shift check, in seconds
    pub time_shift_s: f64,

    /// Compression factor applied in the time-scaling check
    pub time_scale: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sampling_rate_hz: DEFAULT_SAMPLING_RATE_HZ,
            duration_s: DEFAULT_DURATION_S,
            rect_width_s: DEFAULT_RECT_WIDTH_S,
            rect_center_s: 0.0,
            rect_amplitude: 1.0,
            sine_freq_hz: DEFAULT_SINE_FREQ_HZ,
            linearity_a: 1.5,
            linearity_b: -0.7,
            time_shift_s: DEFAULT_TIME_SHIFT_S,
            time_scale: DEFAULT_TIME_SCALE,
        }
    }
}

impl RunConfig {
    /// Number of samples, `floor(T * fs)`, saturating for oversized runs
    /// that `validate` rejects
    pub fn sample_count(&self) -> usize {
        let n = (self.duration_s * self.sampling_rate_hz).floor();
        if n.is_finite() && n > 0.0 {
            n as usize
        } else {
            0
        }
    }

    /// Check every parameter's precondition
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("sampling_rate_hz", self.sampling_rate_hz),
            ("duration_s", self.duration_s),
            ("rect_width_s", self.rect_width_s),
            ("rect_center_s", self.rect_center_s),
            ("rect_amplitude", self.rect_amplitude),
            ("sine_freq_hz", self.sine_freq_hz),
            ("linearity_a", self.linearity_a),
            ("linearity_b", self.linearity_b),
            ("time_shift_s", self.time_shift_s),
            ("time_scale", self.time_scale),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(FourierError::invalid(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }

        if self.sampling_rate_hz <= 0.0 {
            return Err(FourierError::invalid(format!(
                "sampling_rate_hz must be positive, got {}",
                self.sampling_rate_hz
            )));
        }
        if self.duration_s <= 0.0 {
            return Err(FourierError::invalid(format!(
                "duration_s must be positive, got {}",
                self.duration_s
            )));
        }
        if self.sample_count() == 0 {
            return Err(FourierError::invalid(format!(
                "{} s at {} Hz yields no samples",
                self.duration_s, self.sampling_rate_hz
            )));
        }
        let n = (self.duration_s * self.sampling_rate_hz).floor();
        if n > MAX_SAMPLES as f64 {
            return Err(FourierError::invalid(format!(
                "{} s at {} Hz needs {} samples, limit is {}",
                self.duration_s, self.sampling_rate_hz, n, MAX_SAMPLES
            )));
        }
        if self.rect_width_s < 0.0 {
            return Err(FourierError::invalid(format!(
                "rect_width_s must be non-negative, got {}",
                self.rect_width_s
            )));
        }
        if self.time_scale <= 0.0 {
            return Err(FourierError::invalid(format!(
                "time_scale must be positive, got {}",
                self.time_scale
            )));
        }

        Ok(())
    }

    /// Load a configuration file, TOML or JSON depending on the extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FourierError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let config: RunConfig = if is_toml {
            toml::from_str(&content).map_err(|e| {
                FourierError::Config(format!("Failed to parse config file {:?}: {}", path, e))
            })?
        } else {
            serde_json::from_str(&content).map_err(|e| {
                FourierError::Config(format!("Failed to parse config file {:?}: {}", path, e))
            })?
        };

        tracing::debug!("Loaded run configuration from {:?}", path);
        Ok(config)
    }

    /// Save the configuration as pretty JSON, or TOML for a `.toml` path
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let content = if is_toml {
            toml::to_string_pretty(self)
                .map_err(|e| FourierError::Config(format!("Failed to serialize config: {}", e)))?
        } else {
            serde_json::to_string_pretty(self)
                .map_err(|e| FourierError::Config(format!("Failed to serialize config: {}", e)))?
        };

        std::fs::write(path, content).map_err(|e| {
            FourierError::Config(format!("Failed to write config file {:?}: {}", path, e))
        })
    }
}
