//! Health signal sources — traits + system backend (sysfs and external tools).
//!
//! Every signal the monitors consume goes through [`DiskProbe`] or
//! [`NetProbe`], so the monitors run unchanged against [`mock`] fakes.

#[doc(hidden)]
pub mod mock;
mod system;

use std::fmt;

pub use system::{SYSFS_ROOT, SystemProbe};

// ── Error type ──

/// Probe errors.
///
/// String payloads follow the convention **"context: details"** where
/// *context* names the tool or sysfs path.
#[derive(Debug)]
pub enum ProbeError {
    /// External command could not be spawned or exited unsuccessfully.
    ToolFailed(String),
    /// A sysfs attribute or directory could not be read.
    ReadFailed(String),
    /// Output was read but did not contain the expected value.
    Parse(String),
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::ToolFailed(e) => write!(f, "Tool failed: {e}"),
            ProbeError::ReadFailed(e) => write!(f, "Read failed: {e}"),
            ProbeError::Parse(e) => write!(f, "Parse error: {e}"),
        }
    }
}

impl std::error::Error for ProbeError {}

pub type Result<T> = std::result::Result<T, ProbeError>;

// ── Traits ──

/// Block-device, SMART and storage-pool signals.
pub trait DiskProbe: Send + Sync {
    /// Entries of `/sys/block` as `(device, symlink target)`.
    fn block_links(&self) -> Result<Vec<(String, String)>>;

    /// `lsblk -S -o name,<column>,tran` output.
    fn scsi_listing(&self, column: &str) -> Result<String>;

    /// System product name from DMI, if obtainable.
    fn product_name(&self) -> Option<String>;

    /// Exit status of `smartctl -H /dev/<device> -n standby,0`.
    ///
    /// A process killed by a signal reports `-1`. `Err` means the tool could
    /// not be run at all.
    fn smart_health(&self, device: &str) -> Result<i32>;

    /// `zpool status -L` output.
    fn pool_status(&self) -> Result<String>;

    /// Underlying devices of a device-mapper node, sorted by name.
    fn dm_slaves(&self, dm: &str) -> Result<Vec<String>>;

    /// Raw contents of `/sys/class/block/<device>/stat`.
    fn block_stat(&self, device: &str) -> Result<String>;

    /// Whether the device node statistics file is present.
    fn device_present(&self, device: &str) -> bool {
        self.block_stat(device).is_ok()
    }
}

/// Network interface and reachability signals.
pub trait NetProbe: Send + Sync {
    /// Link speed in Mbps from `/sys/class/net/<iface>/speed`.
    fn link_speed(&self, iface: &str) -> Result<i64>;

    /// `ip route` output.
    fn routes(&self) -> Result<String>;

    /// One echo probe with a bounded timeout. `true` if answered.
    fn ping(&self, addr: &str) -> bool;
}
