//! Verification result types

use serde::{Deserialize, Serialize};

/// Fourier-transform identity being checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Property {
    /// `F{a*x1 + b*x2} = a*X1 + b*X2`
    Linearity,
    /// `F{x(t - t0)} = X(f) * exp(-j*2*pi*f*t0)`
    TimeShift,
    /// `F{x(a*t)} = X(f/a) / |a|`
    TimeScaling,
}

impl Property {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Property::Linearity => "Linearity",
            Property::TimeShift => "Time shift",
            Property::TimeScaling => "Time scaling",
        }
    }

    /// Key of this property's error in the run report
    pub fn report_key(&self) -> &'static str {
        match self {
            Property::Linearity => "linearity_max_error_fft",
            Property::TimeShift => "time_shift_max_error_fft",
            Property::TimeScaling => "time_scaling_max_error_fft",
        }
    }

    /// Get all properties in check order
    pub fn all() -> &'static [Property] {
        &[
            Property::Linearity,
            Property::TimeShift,
            Property::TimeScaling,
        ]
    }
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Parameters the prediction of a check was built from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "property", rename_all = "snake_case")]
pub enum PropertyParameters {
    Linearity { a: f64, b: f64 },
    TimeShift { t0: f64 },
    TimeScaling { a: f64 },
}

impl PropertyParameters {
    /// The property these parameters belong to
    pub fn property(&self) -> Property {
        match self {
            PropertyParameters::Linearity { .. } => Property::Linearity,
            PropertyParameters::TimeShift { .. } => Property::TimeShift,
            PropertyParameters::TimeScaling { .. } => Property::TimeScaling,
        }
    }
}

/// Maximum deviation between a computed and a predicted spectrum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    max_error: f64,
    parameters: PropertyParameters,
}

impl VerificationResult {
    /// Record the deviation measured with `parameters`
    pub fn new(max_error: f64, parameters: PropertyParameters) -> Self {
        Self {
            max_error,
            parameters,
        }
    }

    /// Which identity was checked
    pub fn property(&self) -> Property {
        self.parameters.property()
    }

    /// Largest `|actual - predicted|` over all bins
    pub fn max_error(&self) -> f64 {
        self.max_error
    }

    /// Parameters the prediction was built from
    pub fn parameters(&self) -> &PropertyParameters {
        &self.parameters
    }
}
