//! In-memory LED class for unit and integration tests.
//!
//! Always compiled (zero runtime cost), hidden from public docs.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{LedClass, LedError, Result};

#[derive(Default)]
struct Inner {
    present: HashSet<String>,
    /// Attribute storage: LED name → attribute → last written value.
    attrs: HashMap<String, HashMap<String, String>>,
    /// Recorded writes in order: (led, attr, value).
    writes: Vec<(String, String, String)>,
    fail_writes: bool,
}

/// Mock LED class. Writes to a present LED are stored and recorded;
/// reads return the last written value.
#[derive(Default)]
pub struct MockLeds {
    inner: Mutex<Inner>,
}

impl MockLeds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a class with the given LEDs present.
    pub fn with_leds(names: &[&str]) -> Self {
        let mock = Self::new();
        for name in names {
            mock.add_led(name);
        }
        mock
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_led(&self, name: &str) {
        self.lock().present.insert(name.to_string());
    }

    /// Set an attribute without recording a write (simulates an external writer).
    pub fn set_attr(&self, name: &str, attr: &str, value: &str) {
        self.lock()
            .attrs
            .entry(name.to_string())
            .or_default()
            .insert(attr.to_string(), value.to_string());
    }

    pub fn attr(&self, name: &str, attr: &str) -> Option<String> {
        self.lock()
            .attrs
            .get(name)
            .and_then(|a| a.get(attr))
            .cloned()
    }

    /// All recorded writes for one LED as (attr, value), in order.
    pub fn writes_for(&self, name: &str) -> Vec<(String, String)> {
        self.lock()
            .writes
            .iter()
            .filter(|(led, _, _)| led == name)
            .map(|(_, attr, value)| (attr.clone(), value.clone()))
            .collect()
    }

    /// Number of writes to one attribute of one LED.
    pub fn count(&self, name: &str, attr: &str) -> usize {
        self.lock()
            .writes
            .iter()
            .filter(|(led, a, _)| led == name && a == attr)
            .count()
    }

    pub fn total_writes(&self) -> usize {
        self.lock().writes.len()
    }

    pub fn clear_writes(&self) {
        self.lock().writes.clear();
    }

    /// If set, every write returns an error.
    pub fn fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }
}

impl LedClass for MockLeds {
    fn exists(&self, name: &str) -> bool {
        self.lock().present.contains(name)
    }

    fn write(&self, name: &str, attr: &str, value: &str) -> Result<()> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(LedError::WriteFailed(format!(
                "{name}/{attr}: mock failure injected"
            )));
        }
        if !inner.present.contains(name) {
            return Err(LedError::NotFound(format!("{name}/{attr}")));
        }
        inner
            .attrs
            .entry(name.to_string())
            .or_default()
            .insert(attr.to_string(), value.trim().to_string());
        inner
            .writes
            .push((name.to_string(), attr.to_string(), value.to_string()));
        Ok(())
    }

    fn read(&self, name: &str, attr: &str) -> Result<String> {
        self.lock()
            .attrs
            .get(name)
            .and_then(|a| a.get(attr))
            .cloned()
            .ok_or_else(|| LedError::ReadFailed(format!("{name}/{attr}: not set")))
    }
}
