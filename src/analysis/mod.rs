//! Analysis module for signal processing
//!
//! This module provides:
//! - DFT computation with natural and zero-centered bin ordering
//! - Magnitude and phase spectra
//! - Peak detection

pub mod fft;

pub use fft::{fft_frequencies, fft_shift, wrapped_phase, Spectrum, SpectrumAnalyzer};
