//! Output port for plots and the run report
//!
//! The analysis pipeline only ever talks to a [`ReportSink`], which keeps the
//! numeric core free of rendering and filesystem concerns:
//!
//! - [`ReportSink::render_plot`] - one labelled 2D line plot per call
//! - [`ReportSink::write_report`] - the flat record of run parameters and
//!   maximum errors, written once at the end of a successful run
//!
//! [`FileReportSink`] writes SVG plots and a JSON report into a directory.
//! [`ReportOnly`] wraps another sink and drops every plot.

pub mod file_sink;

pub use file_sink::{FileReportSink, REPORT_FILE_NAME};

use serde::{Deserialize, Serialize};

use crate::config::RunConfig;
use crate::error::{FourierError, Result};
use crate::verify::{Property, VerificationResult};

/// A single line plot handed to the sink
#[derive(Debug, Clone, PartialEq)]
pub struct PlotRequest {
    /// Artifact name without extension, e.g. `04_rect_mag`
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub x_label: String,
    pub y_label: String,
    pub title: String,
}

impl PlotRequest {
    /// Build a plot of `y` against `x`
    pub fn new(
        name: impl Into<String>,
        x: Vec<f64>,
        y: Vec<f64>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            x_label: x_label.into(),
            y_label: y_label.into(),
            title: title.into(),
        }
    }

    /// Fail unless both series have the same, non-zero length
    pub fn validate(&self) -> Result<()> {
        if self.x.len() != self.y.len() {
            return Err(FourierError::shape_mismatch(
                self.x.len(),
                self.y.len(),
                format!("plot {}", self.name),
            ));
        }
        if self.x.is_empty() {
            return Err(FourierError::invalid(format!(
                "plot {} has no points",
                self.name
            )));
        }
        Ok(())
    }

    /// (x, y) pairs with non-finite points removed
    pub fn finite_points(&self) -> Vec<(f64, f64)> {
        self.x
            .iter()
            .zip(self.y.iter())
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(&x, &y)| (x, y))
            .collect()
    }
}

/// Machine-checkable summary of one run
///
/// Serialized field names are part of the output contract and must not
/// change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    #[serde(rename = "linearity_max_error_fft")]
    pub linearity_max_error: f64,
    #[serde(rename = "time_shift_max_error_fft")]
    pub time_shift_max_error: f64,
    #[serde(rename = "time_scaling_max_error_fft")]
    pub time_scaling_max_error: f64,
    #[serde(rename = "sampling_rate_Hz")]
    pub sampling_rate_hz: f64,
    #[serde(rename = "N_samples")]
    pub n_samples: usize,
    pub duration_s: f64,
    pub rect_width_s: f64,
    #[serde(rename = "sine_freq_Hz")]
    pub sine_freq_hz: f64,
    pub time_shift_s: f64,
    #[serde(rename = "time_scale_a")]
    pub time_scale: f64,
}

impl RunReport {
    /// Assemble the report from the run configuration and one result per property
    pub fn new(config: &RunConfig, results: &[VerificationResult]) -> Result<Self> {
        let error_of = |property: Property| {
            results
                .iter()
                .find(|r| r.property() == property)
                .map(|r| r.max_error())
                .ok_or_else(|| {
                    FourierError::invalid(format!("missing {} result", property.display_name()))
                })
        };

        Ok(Self {
            linearity_max_error: error_of(Property::Linearity)?,
            time_shift_max_error: error_of(Property::TimeShift)?,
            time_scaling_max_error: error_of(Property::TimeScaling)?,
            sampling_rate_hz: config.sampling_rate_hz,
            n_samples: config.sample_count(),
            duration_s: config.duration_s,
            rect_width_s: config.rect_width_s,
            sine_freq_hz: config.sine_freq_hz,
            time_shift_s: config.time_shift_s,
            time_scale: config.time_scale,
        })
    }

    /// Maximum error recorded for `property`
    pub fn max_error(&self, property: Property) -> f64 {
        match property {
            Property::Linearity => self.linearity_max_error,
            Property::TimeShift => self.time_shift_max_error,
            Property::TimeScaling => self.time_scaling_max_error,
        }
    }

    /// Flat (key, value) view in serialization order
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![
            (Property::Linearity.report_key(), self.linearity_max_error),
            (Property::TimeShift.report_key(), self.time_shift_max_error),
            (Property::TimeScaling.report_key(), self.time_scaling_max_error),
            ("sampling_rate_Hz", self.sampling_rate_hz),
            ("N_samples", self.n_samples as f64),
            ("duration_s", self.duration_s),
            ("rect_width_s", self.rect_width_s),
            ("sine_freq_Hz", self.sine_freq_hz),
            ("time_shift_s", self.time_shift_s),
            ("time_scale_a", self.time_scale),
        ]
    }
}

/// Destination for plots and the final report
#[cfg_attr(test, mockall::automock)]
pub trait ReportSink {
    /// Render one labelled line plot
    fn render_plot(&mut self, plot: &PlotRequest) -> Result<()>;

    /// Persist the run report
    fn write_report(&mut self, report: &RunReport) -> Result<()>;
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn render_plot(&mut self, plot: &PlotRequest) -> Result<()> {
        (**self).render_plot(plot)
    }

    fn write_report(&mut self, report: &RunReport) -> Result<()> {
        (**self).write_report(report)
    }
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn render_plot(&mut self, plot: &PlotRequest) -> Result<()> {
        (**self).render_plot(plot)
    }

    fn write_report(&mut self, report: &RunReport) -> Result<()> {
        (**self).write_report(report)
    }
}

/// Forwards the report to the inner sink and skips every plot
#[derive(Debug)]
pub struct ReportOnly<S> {
    inner: S,
    skipped: usize,
}

impl<S: ReportSink> ReportOnly<S> {
    /// Wrap `inner`, which still receives the report
    pub fn new(inner: S) -> Self {
        Self { inner, skipped: 0 }
    }

    /// Number of plots dropped so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Unwrap the inner sink
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: ReportSink> ReportSink for ReportOnly<S> {
    fn render_plot(&mut self, plot: &PlotRequest) -> Result<()> {
        plot.validate()?;
        tracing::debug!("Skipping plot {}", plot.name);
        self.skipped += 1;
        Ok(())
    }

    fn write_report(&mut self, report: &RunReport) -> Result<()> {
        self.inner.write_report(report)
    }
}
