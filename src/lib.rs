//! # fourier-props: Fourier transform property checks
//!
//! Generates synthetic test signals (rectangular pulse, unit step,
//! sinusoid), computes their discrete Fourier spectra and numerically
//! verifies three properties of the transform (linearity, time shift and
//! time scaling), reporting the largest deviation between the directly
//! computed spectrum and the analytically predicted one.
//!
//! ## Architecture
//!
//! Data flows one way through the pipeline:
//!
//! - **Signal**: [`TimeAxis`], [`Signal`] and the [`SignalGenerator`]
//! - **Analysis**: [`SpectrumAnalyzer`] producing [`Spectrum`]s via rustfft
//! - **Verify**: [`PropertyVerifier`] producing one [`VerificationResult`]
//!   per property
//! - **Report**: the [`ReportSink`] output port; [`FileReportSink`] writes
//!   SVG plots and a JSON report
//!
//! [`AnalysisRun`] ties the stages together for one [`RunConfig`].
//!
//! ## Example
//!
//! ```no_run
//! use fourier_props::{AnalysisRun, FileReportSink, RunConfig};
//!
//! fn main() -> fourier_props::Result<()> {
//!     std::fs::create_dir_all("outputs")?;
//!     let mut sink = FileReportSink::new("outputs")?;
//!
//!     let run = AnalysisRun::new(RunConfig::default())?;
//!     let summary = run.execute(&mut sink)?;
//!
//!     for result in &summary.results {
//!         println!("{}: {:e}", result.property(), result.max_error());
//!     }
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod app;
pub mod config;
pub mod error;
pub mod report;
pub mod signal;
pub mod verify;

// Re-export commonly used types
pub use analysis::{Spectrum, SpectrumAnalyzer};
pub use app::{AnalysisRun, RunSummary};
pub use config::RunConfig;
pub use error::{FourierError, Result};
pub use report::{FileReportSink, PlotRequest, ReportOnly, ReportSink, RunReport};
pub use signal::{Signal, SignalGenerator, TimeAxis};
pub use verify::{Property, PropertyVerifier, VerificationResult};
