//! Test-signal generation over a shared [`TimeAxis`]
//!
//! Supported waveforms:
//!
//! - [`Waveform::RectangularPulse`] - constant amplitude on a closed interval
//! - [`Waveform::UnitStep`] - 0 before the origin, 1 from `t = 0` onwards
//! - [`Waveform::Sinusoid`] - `sin(2*pi*f*t)`
//!
//! Shifted and scaled copies of a signal are produced by resampling the
//! already generated samples with linear interpolation rather than by
//! evaluating the waveform again, so the property checks operate on the
//! same numerical artifact a measurement pipeline would produce.
//!
//! # Example
//!
//! ```
//! use fourier_props::signal::{SignalGenerator, TimeAxis};
//!
//! let axis = TimeAxis::new(2000.0, 1.0)?;
//! let generator = SignalGenerator::new(&axis);
//! let sine = generator.sinusoid(50.0)?;
//! let delayed = generator.time_shift(&sine, 0.05)?;
//! assert_eq!(delayed.len(), axis.len());
//! # Ok::<(), fourier_props::FourierError>(())
//! ```

use std::f64::consts::PI;

use super::interp::interp;
use super::{Signal, TimeAxis};
use crate::error::{FourierError, Result};

/// Waveform families the generator can synthesize
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Waveform {
    /// `amplitude` on `[center - width/2, center + width/2]`, 0 elsewhere
    RectangularPulse {
        width: f64,
        center: f64,
        amplitude: f64,
    },
    /// 1 for `t >= 0`, 0 otherwise
    UnitStep,
    /// Unit-amplitude sine of the given frequency in Hz
    Sinusoid { frequency: f64 },
}

impl Waveform {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Waveform::RectangularPulse { .. } => "Rectangular pulse",
            Waveform::UnitStep => "Unit step",
            Waveform::Sinusoid { .. } => "Sinusoid",
        }
    }

    /// Check the waveform parameters
    pub fn validate(&self) -> Result<()> {
        match *self {
            Waveform::RectangularPulse {
                width,
                center,
                amplitude,
            } => {
                if !width.is_finite() || width < 0.0 {
                    return Err(FourierError::invalid(format!(
                        "pulse width must be a non-negative finite number, got {}",
                        width
                    )));
                }
                if !center.is_finite() || !amplitude.is_finite() {
                    return Err(FourierError::invalid(format!(
                        "pulse center and amplitude must be finite, got center={} amplitude={}",
                        center, amplitude
                    )));
                }
                Ok(())
            }
            Waveform::UnitStep => Ok(()),
            Waveform::Sinusoid { frequency } => {
                if !frequency.is_finite() {
                    return Err(FourierError::invalid(format!(
                        "sinusoid frequency must be finite, got {}",
                        frequency
                    )));
                }
                Ok(())
            }
        }
    }

    /// Evaluate the waveform at time `t` (seconds)
    pub fn value_at(&self, t: f64) -> f64 {
        match *self {
            Waveform::RectangularPulse {
                width,
                center,
                amplitude,
            } => {
                // Closed interval: both edges belong to the pulse
                if t >= center - width / 2.0 && t <= center + width / 2.0 {
                    amplitude
                } else {
                    0.0
                }
            }
            Waveform::UnitStep => {
                if t >= 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Waveform::Sinusoid { frequency } => (2.0 * PI * frequency * t).sin(),
        }
    }
}

/// Produces signals aligned to one [`TimeAxis`]
#[derive(Debug, Clone, Copy)]
pub struct SignalGenerator<'a> {
    axis: &'a TimeAxis,
}

impl<'a> SignalGenerator<'a> {
    /// Create a generator bound to `axis`
    pub fn new(axis: &'a TimeAxis) -> Self {
        Self { axis }
    }

    /// The axis every generated signal is aligned to
    pub fn axis(&self) -> &'a TimeAxis {
        self.axis
    }

    /// Sample `waveform` at every instant of the axis
    pub fn generate(&self, waveform: &Waveform) -> Result<Signal> {
        waveform.validate()?;
        tracing::debug!(
            "Generating {} over {} samples",
            waveform.display_name(),
            self.axis.len()
        );
        Ok(Signal::new(self.axis.map(|t| waveform.value_at(t))))
    }

    /// Rectangular pulse of `width` seconds centered at `center`
    pub fn rectangular_pulse(&self, width: f64, center: f64, amplitude: f64) -> Result<Signal> {
        self.generate(&Waveform::RectangularPulse {
            width,
            center,
            amplitude,
        })
    }

    /// Unit step with the edge at `t = 0` (inclusive)
    pub fn unit_step(&self) -> Result<Signal> {
        self.generate(&Waveform::UnitStep)
    }

    /// `sin(2*pi*frequency*t)`
    pub fn sinusoid(&self, frequency: f64) -> Result<Signal> {
        self.generate(&Waveform::Sinusoid { frequency })
    }

    /// Element-wise `coeff_a * a + coeff_b * b`
    pub fn linear_combination(
        &self,
        a: &Signal,
        b: &Signal,
        coeff_a: f64,
        coeff_b: f64,
    ) -> Result<Signal> {
        if a.len() != b.len() {
            return Err(FourierError::shape_mismatch(
                a.len(),
                b.len(),
                "linear combination operands",
            ));
        }
        a.check_aligned(self.axis, "linear combination")?;

        Ok(Signal::new(
            a.iter()
                .zip(b.iter())
                .map(|(&x, &y)| coeff_a * x + coeff_b * y)
                .collect(),
        ))
    }

    /// Linearly interpolate `signal` (defined on the generator's axis) at
    /// arbitrary `query_times`. Queries outside the axis evaluate to 0.
    pub fn resample(&self, signal: &Signal, query_times: &[f64]) -> Result<Signal> {
        signal.check_aligned(self.axis, "resample")?;
        interp(query_times, self.axis.times(), signal.values(), 0.0).map(Signal::new)
    }

    /// Delay `signal` by `t0` seconds: the result at `t` is the input at `t - t0`
    pub fn time_shift(&self, signal: &Signal, t0: f64) -> Result<Signal> {
        if !t0.is_finite() {
            return Err(FourierError::invalid(format!(
                "time shift must be finite, got {}",
                t0
            )));
        }

        let samples = t0 * self.axis.sampling_rate();
        if (samples - samples.round()).abs() > 1e-9 {
            tracing::warn!(
                "Time shift of {} s is not a whole number of samples ({:.3}); \
                 interpolation error will show up in the spectrum",
                t0,
                samples
            );
        }

        let query = self.axis.map(|t| t - t0);
        self.resample(signal, &query)
    }

    /// Compress (`factor > 1`) or stretch (`factor < 1`) `signal` in time:
    /// the result at `t` is the input at `factor * t`
    pub fn time_scale(&self, signal: &Signal, factor: f64) -> Result<Signal> {
        if !factor.is_finite() || factor == 0.0 {
            return Err(FourierError::invalid(format!(
                "time scale factor must be finite and non-zero, got {}",
                factor
            )));
        }

        let query = self.axis.map(|t| factor * t);
        self.resample(signal, &query)
    }
}
