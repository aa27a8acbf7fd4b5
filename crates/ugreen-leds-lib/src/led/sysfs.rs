//! `/sys/class/leds` backend.

use std::path::{Path, PathBuf};

use super::{LedClass, LedError, Result};

pub const SYSFS_LEDS_ROOT: &str = "/sys/class/leds";

/// LED class backed by a sysfs directory (one subdirectory per LED).
#[derive(Debug, Clone)]
pub struct SysfsLeds {
    root: PathBuf,
}

impl Default for SysfsLeds {
    fn default() -> Self {
        Self::new(SYSFS_LEDS_ROOT)
    }
}

impl SysfsLeds {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        SysfsLeds { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl LedClass for SysfsLeds {
    fn exists(&self, name: &str) -> bool {
        self.root.join(name).exists()
    }

    fn write(&self, name: &str, attr: &str, value: &str) -> Result<()> {
        if !self.exists(name) {
            return Err(LedError::NotFound(format!("{name}/{attr}")));
        }
        std::fs::write(self.root.join(name).join(attr), value)
            .map_err(|e| LedError::WriteFailed(format!("{name}/{attr}: {e}")))
    }

    fn read(&self, name: &str, attr: &str) -> Result<String> {
        std::fs::read_to_string(self.root.join(name).join(attr))
            .map(|s| s.trim().to_string())
            .map_err(|e| LedError::ReadFailed(format!("{name}/{attr}: {e}")))
    }
}
