//! Filesystem report sink: SVG line plots and a pretty-printed JSON report.
//!
//! Each plot lands in `<dir>/<name>.svg`, the report in
//! `<dir>/resultados.json`. The directory must already exist.

use plotters::prelude::*;
use std::fmt::Display;
use std::ops::Range;
use std::path::{Path, PathBuf};

use super::{PlotRequest, ReportSink, RunReport};
use crate::error::{FourierError, Result};

/// Report filename inside the output directory
pub const REPORT_FILE_NAME: &str = "resultados.json";

/// Default plot size in pixels
pub const DEFAULT_PLOT_SIZE: (u32, u32) = (1024, 768);

/// Writes plots and the report into one directory
#[derive(Debug, Clone)]
pub struct FileReportSink {
    dir: PathBuf,
    plot_size: (u32, u32),
    written: Vec<PathBuf>,
}

impl FileReportSink {
    /// Create a sink writing into `dir`, which must exist
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(FourierError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("output directory {:?} does not exist", dir),
            )));
        }

        Ok(Self {
            dir,
            plot_size: DEFAULT_PLOT_SIZE,
            written: Vec::new(),
        })
    }

    /// Set the plot size in pixels
    pub fn with_plot_size(mut self, width: u32, height: u32) -> Self {
        self.plot_size = (width, height);
        self
    }

    /// Output directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a plot with this name is written to
    pub fn plot_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.svg", name))
    }

    /// Path of the JSON report
    pub fn report_path(&self) -> PathBuf {
        self.dir.join(REPORT_FILE_NAME)
    }

    /// Every artifact written so far, in order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

fn render_error(path: &Path, e: impl Display) -> FourierError {
    FourierError::Render(format!("{:?}: {}", path, e))
}

/// Axis range covering `values`, padded so flat series still get a span
fn padded_range(values: impl Iterator<Item = f64>, pad_fraction: f64) -> Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return -1.0..1.0;
    }

    let span = max - min;
    if span <= f64::EPSILON * max.abs().max(1.0) {
        let pad = min.abs().max(1.0) * 0.5;
        return (min - pad)..(max + pad);
    }
    let pad = span * pad_fraction;
    (min - pad)..(max + pad)
}

impl ReportSink for FileReportSink {
    fn render_plot(&mut self, plot: &PlotRequest) -> Result<()> {
        plot.validate()?;

        let path = self.plot_path(&plot.name);
        let points = plot.finite_points();
        let x_range = padded_range(points.iter().map(|p| p.0), 0.0);
        let y_range = padded_range(points.iter().map(|p| p.1), 0.05);

        {
            let root = SVGBackend::new(&path, self.plot_size).into_drawing_area();
            root.fill(&WHITE).map_err(|e| render_error(&path, e))?;

            let mut chart = ChartBuilder::on(&root)
                .caption(&plot.title, ("sans-serif", 22))
                .margin(12)
                .x_label_area_size(48)
                .y_label_area_size(72)
                .build_cartesian_2d(x_range, y_range)
                .map_err(|e| render_error(&path, e))?;

            chart
                .configure_mesh()
                .x_desc(plot.x_label.as_str())
                .y_desc(plot.y_label.as_str())
                .draw()
                .map_err(|e| render_error(&path, e))?;

            chart
                .draw_series(LineSeries::new(points, &BLUE))
                .map_err(|e| render_error(&path, e))?;

            root.present().map_err(|e| render_error(&path, e))?;
        }

        tracing::debug!("Wrote plot {:?}", path);
        self.written.push(path);
        Ok(())
    }

    fn write_report(&mut self, report: &RunReport) -> Result<()> {
        let path = self.report_path();

        let content = serde_json::to_string_pretty(report)
            .map_err(|e| FourierError::Serialization(format!("Failed to encode report: {}", e)))?;

        std::fs::write(&path, content).map_err(|e| {
            FourierError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write report {:?}: {}", path, e),
            ))
        })?;

        tracing::info!("Wrote report {:?}", path);
        self.written.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> RunReport {
        RunReport {
            linearity_max_error: 1e-12,
            time_shift_max_error: 0.5,
            time_scaling_max_error: 250.0,
            sampling_rate_hz: 2000.0,
            n_samples: 2000,
            duration_s: 1.0,
            rect_width_s: 0.2,
            sine_freq_hz: 50.0,
            time_shift_s: 0.05,
            time_scale: 2.0,
        }
    }

    #[test]
    fn test_padded_range() {
        let r = padded_range([0.0, 10.0].into_iter(), 0.1);
        assert!((r.start + 1.0).abs() < 1e-12);
        assert!((r.end - 11.0).abs() < 1e-12);

        // Flat series still spans something
        let flat = padded_range([3.0, 3.0].into_iter(), 0.1);
        assert!(flat.start < 3.0 && flat.end > 3.0);

        // No finite values
        assert_eq!(padded_range(std::iter::empty::<f64>(), 0.1), -1.0..1.0);
    }

    #[test]
    fn test_missing_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            FileReportSink::new(&missing),
            Err(FourierError::Io(_))
        ));
    }

    #[test]
    fn test_write_report_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileReportSink::new(dir.path()).unwrap();
        sink.write_report(&report()).unwrap();

        let content = std::fs::read_to_string(dir.path().join(REPORT_FILE_NAME)).unwrap();
        let parsed: RunReport = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, report());
        assert!(content.contains("\"sampling_rate_Hz\""));
        assert_eq!(sink.written().len(), 1);
    }

    #[test]
    fn test_render_plot_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileReportSink::new(dir.path())
            .unwrap()
            .with_plot_size(320, 240);

        let x: Vec<f64> = (0..50).map(|i| i as f64 * 0.1).collect();
        let y: Vec<f64> = x.iter().map(|v| v.sin()).collect();
        let plot = PlotRequest::new("03_seno_tiempo", x, y, "Time (s)", "Amplitude", "Sine");
        sink.render_plot(&plot).unwrap();

        let path = dir.path().join("03_seno_tiempo.svg");
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert_eq!(sink.written(), &[path]);
    }

    #[test]
    fn test_render_plot_rejects_mismatched_series() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileReportSink::new(dir.path()).unwrap();
        let plot = PlotRequest::new("bad", vec![0.0, 1.0], vec![0.0], "x", "y", "t");
        assert!(matches!(
            sink.render_plot(&plot),
            Err(FourierError::ShapeMismatch { .. })
        ));
        assert!(!dir.path().join("bad.svg").exists());
    }
}
