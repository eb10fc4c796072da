//! Error handling for fourier-props
//!
//! This module defines the error taxonomy shared by the signal generator,
//! the spectrum analyzer, the property verifier and the report sinks, plus
//! a Result alias used throughout the crate.

use thiserror::Error;

/// Main error type for fourier-props operations
#[derive(Error, Debug)]
pub enum FourierError {
    /// Operands (two signals, a signal and a time axis, or plot series)
    /// have incompatible lengths
    #[error("Shape mismatch in {context}: expected {expected} samples, got {actual}")]
    ShapeMismatch {
        expected: usize,
        actual: usize,
        context: String,
    },

    /// A generation or verification parameter violates its precondition
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Errors related to configuration loading
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors raised by the plot backend
    #[error("Render error: {0}")]
    Render(String),

    /// Errors related to report encoding
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<FourierError>,
    },
}

impl FourierError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        FourierError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Build a shape mismatch error
    pub fn shape_mismatch(expected: usize, actual: usize, context: impl Into<String>) -> Self {
        FourierError::ShapeMismatch {
            expected,
            actual,
            context: context.into(),
        }
    }

    /// Build an invalid parameter error
    pub fn invalid(message: impl Into<String>) -> Self {
        FourierError::InvalidParameter(message.into())
    }

    /// Walk through any context wrappers to the underlying error
    pub fn root(&self) -> &FourierError {
        match self {
            FourierError::WithContext { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type alias for fourier-props operations
pub type Result<T> = std::result::Result<T, FourierError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}
