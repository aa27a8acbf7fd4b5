//! ugreen-leds — disk and network health indicators for UGREEN NAS front-panel LEDs.

pub mod config;
pub mod disk;
pub mod error;
pub mod led;
pub mod modules;
pub mod net;
pub mod probe;
pub mod service;
pub mod shutdown;

pub use error::UgreenError;
