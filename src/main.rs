//! fourier-props - command line entry point
//!
//! Generates the test signals, plots them with their spectra, checks the
//! linearity, time-shift and time-scaling properties of the DFT and writes
//! the maximum errors to `<output>/resultados.json`.

use anyhow::Context;
use clap::{Parser, ValueHint};
use fourier_props::{AnalysisRun, FileReportSink, ReportOnly, ReportSink, RunConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Verify Fourier transform properties on synthetic signals"
)]
struct Cli {
    /// Directory receiving the plots and the JSON report
    #[arg(long, short, default_value = "outputs", value_hint = ValueHint::DirPath)]
    output: PathBuf,

    /// Run configuration file (TOML if the extension is .toml, JSON otherwise)
    #[arg(long, short, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Sampling rate in Hz
    #[arg(long)]
    sampling_rate: Option<f64>,

    /// Signal duration in seconds
    #[arg(long)]
    duration: Option<f64>,

    /// Sinusoid frequency in Hz
    #[arg(long)]
    sine_freq: Option<f64>,

    /// Rectangular pulse width in seconds
    #[arg(long)]
    rect_width: Option<f64>,

    /// Delay for the time-shift check in seconds
    #[arg(long, allow_hyphen_values = true)]
    time_shift: Option<f64>,

    /// Compression factor for the time-scaling check
    #[arg(long)]
    time_scale: Option<f64>,

    /// Only write the report, skip every plot
    #[arg(long)]
    no_plots: bool,
}

impl Cli {
    /// Start from the config file (or defaults) and apply command-line overrides
    fn run_config(&self) -> anyhow::Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };

        if let Some(v) = self.sampling_rate {
            config.sampling_rate_hz = v;
        }
        if let Some(v) = self.duration {
            config.duration_s = v;
        }
        if let Some(v) = self.sine_freq {
            config.sine_freq_hz = v;
        }
        if let Some(v) = self.rect_width {
            config.rect_width_s = v;
        }
        if let Some(v) = self.time_shift {
            config.time_shift_s = v;
        }
        if let Some(v) = self.time_scale {
            config.time_scale = v;
        }

        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,fourier_props=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = cli.run_config()?;
    let run = AnalysisRun::new(config)?;

    std::fs::create_dir_all(&cli.output)
        .with_context(|| format!("Failed to create output directory {:?}", cli.output))?;

    let file_sink = FileReportSink::new(&cli.output)?;
    let mut sink: Box<dyn ReportSink> = if cli.no_plots {
        Box::new(ReportOnly::new(file_sink))
    } else {
        Box::new(file_sink)
    };

    let summary = run.execute(&mut sink)?;

    for (key, value) in summary.report.entries() {
        println!("{:<28} {}", key, value);
    }
    tracing::info!("Done, outputs in {:?}", cli.output);

    Ok(())
}
