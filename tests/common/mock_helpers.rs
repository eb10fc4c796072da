//! In-memory report sink for driving a full run without touching disk

use fourier_props::{FourierError, PlotRequest, ReportSink, Result, RunReport};

/// Records every plot and report it receives
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub plots: Vec<PlotRequest>,
    pub reports: Vec<RunReport>,
    /// Fail the plot with this name instead of recording it
    pub fail_on: Option<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(name: &str) -> Self {
        Self {
            fail_on: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn plot(&self, name: &str) -> Option<&PlotRequest> {
        self.plots.iter().find(|p| p.name == name)
    }

    pub fn plot_names(&self) -> Vec<&str> {
        self.plots.iter().map(|p| p.name.as_str()).collect()
    }
}

impl ReportSink for RecordingSink {
    fn render_plot(&mut self, plot: &PlotRequest) -> Result<()> {
        if self.fail_on.as_deref() == Some(plot.name.as_str()) {
            return Err(FourierError::Render(format!("refusing {}", plot.name)));
        }
        plot.validate()?;
        self.plots.push(plot.clone());
        Ok(())
    }

    fn write_report(&mut self, report: &RunReport) -> Result<()> {
        self.reports.push(report.clone());
        Ok(())
    }
}
