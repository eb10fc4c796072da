//! One complete analysis run
//!
//! [`AnalysisRun`] drives the pipeline end to end:
//!
//! 1. Build the time axis and the three test signals
//! 2. Plot each signal and its magnitude/phase spectrum
//! 3. Check linearity, time shift and time scaling
//! 4. Plot the linearity and time-shift artifacts
//! 5. Hand the [`RunReport`] to the sink
//!
//! Any failure aborts before the report is written. Plots rendered before
//! the failure stay where the sink put them.

use crate::analysis::Spectrum;
use crate::config::RunConfig;
use crate::error::{Result, ResultExt};
use crate::report::{PlotRequest, ReportSink, RunReport};
use crate::signal::{Signal, SignalGenerator, TimeAxis};
use crate::verify::{PropertyVerifier, VerificationResult};

const TIME_LABEL: &str = "Time (s)";
const AMPLITUDE_LABEL: &str = "Amplitude";
const FREQUENCY_LABEL: &str = "Frequency (Hz)";
const PHASE_LABEL: &str = "Phase (rad)";

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// One result per property, in check order
    pub results: Vec<VerificationResult>,
    /// The record handed to the sink
    pub report: RunReport,
}

/// Test signals of a run, all aligned to the same axis
#[derive(Debug, Clone)]
pub struct SignalSet {
    pub rect: Signal,
    pub step: Signal,
    pub sine: Signal,
}

/// Validated configuration plus the time axis built from it
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    config: RunConfig,
    axis: TimeAxis,
}

impl AnalysisRun {
    /// Validate `config` and build the time axis
    pub fn new(config: RunConfig) -> Result<Self> {
        config.validate().context("Invalid run configuration")?;
        let axis = TimeAxis::new(config.sampling_rate_hz, config.duration_s)?;
        Ok(Self { config, axis })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn axis(&self) -> &TimeAxis {
        &self.axis
    }

    /// Generate the rectangular pulse, unit step and sinusoid
    pub fn signals(&self) -> Result<SignalSet> {
        let generator = SignalGenerator::new(&self.axis);
        Ok(SignalSet {
            rect: generator.rectangular_pulse(
                self.config.rect_width_s,
                self.config.rect_center_s,
                self.config.rect_amplitude,
            )?,
            step: generator.unit_step()?,
            sine: generator.sinusoid(self.config.sine_freq_hz)?,
        })
    }

    /// Run the whole pipeline against `sink`
    pub fn execute<S: ReportSink + ?Sized>(&self, sink: &mut S) -> Result<RunSummary> {
        let config = &self.config;
        tracing::info!(
            "Starting analysis: fs={} Hz, T={} s, N={}",
            config.sampling_rate_hz,
            config.duration_s,
            self.axis.len()
        );

        let signals = self.signals()?;
        let mut verifier = PropertyVerifier::new(&self.axis);

        // Time domain
        self.plot_time(sink, "01_rect_tiempo", &signals.rect, "Rectangular pulse")?;
        self.plot_time(sink, "02_step_tiempo", &signals.step, "Unit step")?;
        self.plot_time(
            sink,
            "03_seno_tiempo",
            &signals.sine,
            &format!("Sinusoid {} Hz", config.sine_freq_hz),
        )?;

        // Spectra
        for (prefix, signal) in [
            ("04_rect", &signals.rect),
            ("05_step", &signals.step),
            ("06_seno", &signals.sine),
        ] {
            let spectrum = verifier
                .transform(signal)
                .with_context(|| format!("Failed to transform {}", prefix))?;
            plot_spectrum(sink, prefix, &spectrum)?;
        }

        // Linearity: a*sine + b*rect
        let linearity = verifier.verify_linearity(
            &signals.sine,
            &signals.rect,
            config.linearity_a,
            config.linearity_b,
        )?;
        self.plot_time(
            sink,
            "07_linealidad_tiempo",
            &linearity.combined,
            "Linearity: a*sine + b*pulse",
        )?;
        render(
            sink,
            PlotRequest::new(
                "08_linealidad_mag",
                linearity.spectrum.centered_frequencies().to_vec(),
                linearity.spectrum.magnitude(),
                FREQUENCY_LABEL,
                "|X_L(f)|",
                "Linearity: |FFT{a*x1 + b*x2}|",
            ),
        )?;

        // Time shift of the sinusoid
        let shift = verifier.verify_time_shift(&signals.sine, config.time_shift_s)?;
        self.plot_time(
            sink,
            "09_desplazamiento_tiempo",
            &shift.shifted,
            &format!(
                "Time-shifted sinusoid (t0 = {} ms)",
                config.time_shift_s * 1000.0
            ),
        )?;
        render(
            sink,
            PlotRequest::new(
                "10_desplazamiento_fase",
                shift.spectrum.centered_frequencies().to_vec(),
                shift.spectrum.phase(),
                FREQUENCY_LABEL,
                PHASE_LABEL,
                "Time shift: phase of FFT{x(t - t0)}",
            ),
        )?;

        // Time scaling of the sinusoid
        let scaling = verifier.verify_time_scaling(&signals.sine, config.time_scale)?;

        let results = vec![linearity.result, shift.result, scaling.result];
        for result in &results {
            tracing::info!(
                "{} max error: {:e}",
                result.property().display_name(),
                result.max_error()
            );
        }

        let report = RunReport::new(config, &results)?;
        sink.write_report(&report).context("Failed to write run report")?;

        Ok(RunSummary { results, report })
    }

    fn plot_time<S: ReportSink + ?Sized>(
        &self,
        sink: &mut S,
        name: &str,
        signal: &Signal,
        title: &str,
    ) -> Result<()> {
        render(
            sink,
            PlotRequest::new(
                name,
                self.axis.times().to_vec(),
                signal.values().to_vec(),
                TIME_LABEL,
                AMPLITUDE_LABEL,
                title,
            ),
        )
    }
}

fn plot_spectrum<S: ReportSink + ?Sized>(
    sink: &mut S,
    prefix: &str,
    spectrum: &Spectrum,
) -> Result<()> {
    let freqs = spectrum.centered_frequencies().to_vec();
    render(
        sink,
        PlotRequest::new(
            format!("{}_mag", prefix),
            freqs.clone(),
            spectrum.magnitude(),
            FREQUENCY_LABEL,
            "|X(f)|",
            format!("Magnitude spectrum: {}", prefix),
        ),
    )?;
    render(
        sink,
        PlotRequest::new(
            format!("{}_fase", prefix),
            freqs,
            spectrum.phase(),
            FREQUENCY_LABEL,
            PHASE_LABEL,
            format!("Phase spectrum: {}", prefix),
        ),
    )
}

fn render<S: ReportSink + ?Sized>(sink: &mut S, plot: PlotRequest) -> Result<()> {
    tracing::debug!("Rendering plot {}", plot.name);
    sink.render_plot(&plot)
        .with_context(|| format!("Failed to render plot {}", plot.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FourierError;
    use crate::report::MockReportSink;
    use crate::verify::Property;
    use mockall::predicate::function;
    use mockall::Sequence;

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = RunConfig {
            sampling_rate_hz: -1.0,
            ..Default::default()
        };
        let err = AnalysisRun::new(config).unwrap_err();
        assert!(matches!(err.root(), FourierError::InvalidParameter(_)));
    }

    #[test]
    fn test_signals_aligned_to_axis() {
        let run = AnalysisRun::new(RunConfig::default()).unwrap();
        let signals = run.signals().unwrap();
        assert_eq!(signals.rect.len(), 2000);
        assert_eq!(signals.step.len(), 2000);
        assert_eq!(signals.sine.len(), 2000);
    }

    #[test]
    fn test_execute_renders_all_plots_then_report() {
        let run = AnalysisRun::new(RunConfig::default()).unwrap();
        let mut sink = MockReportSink::new();
        let mut seq = Sequence::new();

        sink.expect_render_plot()
            .times(13)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        sink.expect_write_report()
            .with(function(|r: &RunReport| {
                r.n_samples == 2000 && r.linearity_max_error < 1e-9
            }))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let summary = run.execute(&mut sink).unwrap();
        let properties: Vec<Property> = summary.results.iter().map(|r| r.property()).collect();
        assert_eq!(properties, Property::all().to_vec());
    }

    #[test]
    fn test_plot_failure_aborts_before_report() {
        let run = AnalysisRun::new(RunConfig::default()).unwrap();
        let mut sink = MockReportSink::new();

        sink.expect_render_plot()
            .returning(|_| Err(FourierError::Render("disk full".to_string())));
        sink.expect_write_report().never();

        let err = run.execute(&mut sink).unwrap_err();
        assert!(err.to_string().contains("01_rect_tiempo"));
        assert!(matches!(err.root(), FourierError::Render(_)));
    }

    #[test]
    fn test_plot_names_match_artifact_list() {
        let run = AnalysisRun::new(RunConfig::default()).unwrap();
        let names = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let captured = names.clone();

        let mut sink = MockReportSink::new();
        sink.expect_render_plot().returning(move |plot| {
            assert_eq!(plot.x.len(), plot.y.len());
            captured.lock().unwrap().push(plot.name.clone());
            Ok(())
        });
        sink.expect_write_report().returning(|_| Ok(()));

        run.execute(&mut sink).unwrap();

        let names = names.lock().unwrap();
        assert_eq!(
            *names,
            vec![
                "01_rect_tiempo",
                "02_step_tiempo",
                "03_seno_tiempo",
                "04_rect_mag",
                "04_rect_fase",
                "05_step_mag",
                "05_step_fase",
                "06_seno_mag",
                "06_seno_fase",
                "07_linealidad_tiempo",
                "08_linealidad_mag",
                "09_desplazamiento_tiempo",
                "10_desplazamiento_fase",
            ]
        );
    }
}
