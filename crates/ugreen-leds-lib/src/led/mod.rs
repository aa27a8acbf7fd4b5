//! LED control — sysfs class backend, typed handle, RGB color model.

mod color;
mod handle;
#[doc(hidden)]
pub mod mock;
mod sysfs;

use std::fmt;

pub use color::{DEFAULT_COLOR, Rgb, parse_rgb};
pub use handle::{Led, Trigger};
pub use sysfs::{SYSFS_LEDS_ROOT, SysfsLeds};

// ── Error type ──

/// LED attribute errors.
///
/// String payloads follow the convention **"context: details"** where
/// *context* is `<led>/<attribute>` and *details* describes what went wrong.
#[derive(Debug)]
pub enum LedError {
    NotFound(String),
    WriteFailed(String),
    ReadFailed(String),
}

impl fmt::Display for LedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedError::NotFound(name) => write!(f, "LED not found: {name}"),
            LedError::WriteFailed(e) => write!(f, "LED write failed: {e}"),
            LedError::ReadFailed(e) => write!(f, "LED read failed: {e}"),
        }
    }
}

impl std::error::Error for LedError {}

pub type Result<T> = std::result::Result<T, LedError>;

// ── Trait ──

/// An LED class: a set of named LEDs with string attributes.
///
/// Production code uses [`SysfsLeds`]; tests use [`mock::MockLeds`].
pub trait LedClass: Send + Sync {
    fn exists(&self, name: &str) -> bool;
    fn write(&self, name: &str, attr: &str, value: &str) -> Result<()>;
    /// Read an attribute, trimmed of surrounding whitespace.
    fn read(&self, name: &str, attr: &str) -> Result<String>;
}
