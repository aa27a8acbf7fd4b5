//! Unified error type for the ugreen-leds-lib crate.
//!
//! [`UgreenError`] wraps module-specific errors (`LedError`, `ProbeError`)
//! and domain-specific error kinds (`Config`, `Unavailable`).
//! `From` impls allow `?` to propagate across module boundaries seamlessly.

use std::fmt;

use crate::led::LedError;
use crate::probe::ProbeError;

/// Unified error type for ugreen-leds-lib operations.
#[derive(Debug)]
pub enum UgreenError {
    /// LED attribute read/write failure.
    Led(LedError),
    /// External tool or sysfs probe failure.
    Probe(ProbeError),
    /// Standard I/O error (config file read, thread spawn).
    Io(std::io::Error),
    /// Invalid or missing required configuration. Fatal to the affected monitor only.
    Config(String),
    /// A required LED or device node does not exist.
    Unavailable(String),
}

impl fmt::Display for UgreenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UgreenError::Led(e) => write!(f, "{e}"),
            UgreenError::Probe(e) => write!(f, "{e}"),
            UgreenError::Io(e) => write!(f, "I/O error: {e}"),
            UgreenError::Config(e) => write!(f, "Config error: {e}"),
            UgreenError::Unavailable(e) => write!(f, "Resource unavailable: {e}"),
        }
    }
}

impl std::error::Error for UgreenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UgreenError::Led(e) => Some(e),
            UgreenError::Probe(e) => Some(e),
            UgreenError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LedError> for UgreenError {
    fn from(e: LedError) -> Self {
        UgreenError::Led(e)
    }
}

impl From<ProbeError> for UgreenError {
    fn from(e: ProbeError) -> Self {
        UgreenError::Probe(e)
    }
}

impl From<std::io::Error> for UgreenError {
    fn from(e: std::io::Error) -> Self {
        UgreenError::Io(e)
    }
}

/// Crate-level Result alias using [`UgreenError`].
pub type Result<T> = std::result::Result<T, UgreenError>;
