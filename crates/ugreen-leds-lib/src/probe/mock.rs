//! In-memory probes for unit and integration tests.
//!
//! Always compiled (zero runtime cost), hidden from public docs.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{DiskProbe, NetProbe, ProbeError, Result};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

// ── Disk probe ──

#[derive(Default)]
struct DiskInner {
    links: Vec<(String, String)>,
    /// lsblk column → canned output.
    listings: HashMap<String, String>,
    product: Option<String>,
    /// device → smartctl exit status (absent = 0).
    smart: HashMap<String, i32>,
    smart_unavailable: bool,
    smart_calls: Vec<String>,
    pool_status: Option<String>,
    slaves: HashMap<String, Vec<String>>,
    /// device → stat contents (absent = device node missing).
    stats: HashMap<String, String>,
}

/// Mock disk probe. Every setter may be called while monitors are running.
#[derive(Default)]
pub struct MockDiskProbe {
    inner: Mutex<DiskInner>,
}

impl MockDiskProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_links(&self, links: &[(&str, &str)]) {
        lock(&self.inner).links = links
            .iter()
            .map(|(d, t)| (d.to_string(), t.to_string()))
            .collect();
    }

    pub fn set_listing(&self, column: &str, output: &str) {
        lock(&self.inner)
            .listings
            .insert(column.to_string(), output.to_string());
    }

    pub fn set_product(&self, product: Option<&str>) {
        lock(&self.inner).product = product.map(str::to_string);
    }

    pub fn set_smart(&self, device: &str, code: i32) {
        lock(&self.inner).smart.insert(device.to_string(), code);
    }

    /// Make `smart_health` fail as if smartctl were not installed.
    pub fn set_smart_unavailable(&self, unavailable: bool) {
        lock(&self.inner).smart_unavailable = unavailable;
    }

    /// Devices passed to `smart_health`, in call order.
    pub fn smart_calls(&self) -> Vec<String> {
        lock(&self.inner).smart_calls.clone()
    }

    /// `None` makes `pool_status` fail.
    pub fn set_pool_status(&self, output: Option<&str>) {
        lock(&self.inner).pool_status = output.map(str::to_string);
    }

    pub fn set_slaves(&self, dm: &str, slaves: &[&str]) {
        lock(&self.inner).slaves.insert(
            dm.to_string(),
            slaves.iter().map(|s| s.to_string()).collect(),
        );
    }

    pub fn set_stat(&self, device: &str, stat: &str) {
        lock(&self.inner)
            .stats
            .insert(device.to_string(), stat.to_string());
    }

    /// Simulate the device node disappearing.
    pub fn remove_device(&self, device: &str) {
        lock(&self.inner).stats.remove(device);
    }
}

impl DiskProbe for MockDiskProbe {
    fn block_links(&self) -> Result<Vec<(String, String)>> {
        Ok(lock(&self.inner).links.clone())
    }

    fn scsi_listing(&self, column: &str) -> Result<String> {
        lock(&self.inner)
            .listings
            .get(column)
            .cloned()
            .ok_or_else(|| ProbeError::ToolFailed(format!("lsblk: no mock listing for {column}")))
    }

    fn product_name(&self) -> Option<String> {
        lock(&self.inner).product.clone()
    }

    fn smart_health(&self, device: &str) -> Result<i32> {
        let mut inner = lock(&self.inner);
        inner.smart_calls.push(device.to_string());
        if inner.smart_unavailable {
            return Err(ProbeError::ToolFailed("smartctl: not found".into()));
        }
        Ok(inner.smart.get(device).copied().unwrap_or(0))
    }

    fn pool_status(&self) -> Result<String> {
        lock(&self.inner)
            .pool_status
            .clone()
            .ok_or_else(|| ProbeError::ToolFailed("zpool: exit status: 1".into()))
    }

    fn dm_slaves(&self, dm: &str) -> Result<Vec<String>> {
        lock(&self.inner)
            .slaves
            .get(dm)
            .cloned()
            .ok_or_else(|| ProbeError::ReadFailed(format!("{dm}/slaves: missing")))
    }

    fn block_stat(&self, device: &str) -> Result<String> {
        lock(&self.inner)
            .stats
            .get(device)
            .cloned()
            .ok_or_else(|| ProbeError::ReadFailed(format!("{device}/stat: missing")))
    }
}

// ── Network probe ──

#[derive(Default)]
struct NetInner {
    speeds: HashMap<String, i64>,
    routes: Option<String>,
    reachable: Vec<String>,
    pings: Vec<String>,
}

#[derive(Default)]
pub struct MockNetProbe {
    inner: Mutex<NetInner>,
}

impl MockNetProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_speed(&self, iface: &str, speed: i64) {
        lock(&self.inner).speeds.insert(iface.to_string(), speed);
    }

    /// Simulate an unreadable speed attribute.
    pub fn clear_speed(&self, iface: &str) {
        lock(&self.inner).speeds.remove(iface);
    }

    /// `None` makes `routes` fail.
    pub fn set_routes(&self, output: Option<&str>) {
        lock(&self.inner).routes = output.map(str::to_string);
    }

    pub fn set_reachable(&self, addr: &str, reachable: bool) {
        let mut inner = lock(&self.inner);
        inner.reachable.retain(|a| a != addr);
        if reachable {
            inner.reachable.push(addr.to_string());
        }
    }

    /// Addresses passed to `ping`, in call order.
    pub fn pings(&self) -> Vec<String> {
        lock(&self.inner).pings.clone()
    }
}

impl NetProbe for MockNetProbe {
    fn link_speed(&self, iface: &str) -> Result<i64> {
        lock(&self.inner)
            .speeds
            .get(iface)
            .copied()
            .ok_or_else(|| ProbeError::ReadFailed(format!("{iface}/speed: missing")))
    }

    fn routes(&self) -> Result<String> {
        lock(&self.inner)
            .routes
            .clone()
            .ok_or_else(|| ProbeError::ToolFailed("ip: exit status: 1".into()))
    }

    fn ping(&self, addr: &str) -> bool {
        let mut inner = lock(&self.inner);
        inner.pings.push(addr.to_string());
        inner.reachable.iter().any(|a| a == addr)
    }
}
