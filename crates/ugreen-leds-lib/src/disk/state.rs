//! Per-disk health state and the slot table shared by the disk loops.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::led::Led;

/// Effective health of a disk, derived from its failure flags.
///
/// Priority: `Offline > SmartFailed > PoolFaulted > Healthy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiskHealth {
    Healthy,
    PoolFaulted,
    SmartFailed,
    Offline,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiskState {
    /// Sticky until restart.
    pub smart_failed: bool,
    /// Cleared when the pool reports the member healthy again.
    pub pool_faulted: bool,
    /// Sticky until restart.
    pub offline: bool,
    /// Previous raw block statistics snapshot.
    pub last_activity: Option<String>,
}

impl DiskState {
    pub fn health(&self) -> DiskHealth {
        if self.offline {
            DiskHealth::Offline
        } else if self.smart_failed {
            DiskHealth::SmartFailed
        } else if self.pool_faulted {
            DiskHealth::PoolFaulted
        } else {
            DiskHealth::Healthy
        }
    }
}

/// A bound slot: LED, device and mutable health state.
#[derive(Debug)]
pub struct DiskEntry {
    led: Led,
    device: String,
    state: Mutex<DiskState>,
}

impl DiskEntry {
    pub fn new(led: Led, device: impl Into<String>) -> Self {
        DiskEntry {
            led,
            device: device.into(),
            state: Mutex::new(DiskState::default()),
        }
    }

    pub fn led(&self) -> &Led {
        &self.led
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    /// Lock the state. Hold the guard only for flag updates and the LED
    /// write that follows from them.
    pub fn lock(&self) -> MutexGuard<'_, DiskState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn health(&self) -> DiskHealth {
        self.lock().health()
    }
}

/// Slot bindings, fixed once startup finishes.
#[derive(Debug, Default)]
pub struct DiskTable {
    entries: Vec<DiskEntry>,
    device_to_led: HashMap<String, String>,
}

impl DiskTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a binding. A device or LED already bound is ignored.
    pub fn insert(&mut self, entry: DiskEntry) -> bool {
        let taken = self
            .entries
            .iter()
            .any(|e| e.device == entry.device || e.led.name() == entry.led.name());
        if taken {
            return false;
        }
        self.device_to_led
            .insert(entry.device.clone(), entry.led.name().to_string());
        self.entries.push(entry);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiskEntry> {
        self.entries.iter()
    }

    pub fn by_led(&self, led: &str) -> Option<&DiskEntry> {
        self.entries.iter().find(|e| e.led.name() == led)
    }

    pub fn device_to_led(&self) -> &HashMap<String, String> {
        &self.device_to_led
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::led::mock::MockLeds;
    use std::sync::Arc;

    fn entry(leds: &Arc<MockLeds>, led: &str, device: &str) -> DiskEntry {
        DiskEntry::new(Led::new(leds.clone(), led), device)
    }

    // ── Health priority ──

    #[test]
    fn default_is_healthy() {
        assert_eq!(DiskState::default().health(), DiskHealth::Healthy);
    }

    #[test]
    fn offline_beats_everything() {
        let s = DiskState {
            offline: true,
            smart_failed: true,
            pool_faulted: true,
            ..DiskState::default()
        };
        assert_eq!(s.health(), DiskHealth::Offline);
    }

    #[test]
    fn smart_beats_pool() {
        let s = DiskState {
            smart_failed: true,
            pool_faulted: true,
            ..DiskState::default()
        };
        assert_eq!(s.health(), DiskHealth::SmartFailed);
    }

    #[test]
    fn pool_only() {
        let s = DiskState {
            pool_faulted: true,
            ..DiskState::default()
        };
        assert_eq!(s.health(), DiskHealth::PoolFaulted);
    }

    #[test]
    fn health_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(DiskHealth::SmartFailed).unwrap(),
            "smart_failed"
        );
    }

    // ── DiskTable ──

    #[test]
    fn table_lookup() {
        let leds = Arc::new(MockLeds::with_leds(&["disk1", "disk2"]));
        let mut table = DiskTable::new();
        assert!(table.insert(entry(&leds, "disk1", "sda")));
        assert!(table.insert(entry(&leds, "disk2", "sdb")));
        assert_eq!(table.len(), 2);
        assert_eq!(table.by_led("disk2").unwrap().device(), "sdb");
        assert_eq!(table.by_led("disk1").unwrap().device(), "sda");
        assert!(table.by_led("disk3").is_none());
        assert_eq!(table.device_to_led()["sdb"], "disk2");
    }

    #[test]
    fn table_rejects_duplicate_bindings() {
        let leds = Arc::new(MockLeds::with_leds(&["disk1", "disk2"]));
        let mut table = DiskTable::new();
        assert!(table.insert(entry(&leds, "disk1", "sda")));
        assert!(!table.insert(entry(&leds, "disk2", "sda")));
        assert!(!table.insert(entry(&leds, "disk1", "sdb")));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn entry_state_updates_through_lock() {
        let leds = Arc::new(MockLeds::with_leds(&["disk1"]));
        let e = entry(&leds, "disk1", "sda");
        e.lock().pool_faulted = true;
        assert_eq!(e.health(), DiskHealth::PoolFaulted);
        e.lock().pool_faulted = false;
        assert_eq!(*e.lock(), DiskState::default());
    }
}
