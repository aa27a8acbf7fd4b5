//! Disk health monitor — slot LED initialization and the four polling loops.
//!
//! Each loop runs on its own thread and only touches disks that are still
//! [`DiskHealth::Healthy`], except the pool loop which also handles recovery.
//! An entry's lock is held while its flags change and while the resulting
//! color is written, so two loops can never leave a lower-priority color on
//! the LED. External commands always run without the lock.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use super::mapping::{DiskMapping, plan_slots};
use super::pool::{PoolMap, bind_members, is_fail_state, parse_status};
use super::state::{DiskEntry, DiskHealth, DiskTable};
use crate::config::DiskConfig;
use crate::error::Result;
use crate::led::{Led, LedClass, Rgb, Trigger};
use crate::probe::DiskProbe;
use crate::shutdown::{Shutdown, interval_secs, run_every};

const SMART_FALLBACK_SECS: f64 = 360.0;
const POOL_FALLBACK_SECS: f64 = 5.0;
const ONLINE_FALLBACK_SECS: f64 = 5.0;
const ACTIVITY_FALLBACK_SECS: f64 = 0.1;

/// oneshot blink timing, milliseconds.
const BLINK_DELAY_MS: u32 = 100;

/// Whether a `smartctl` exit status signals a failure.
///
/// Bit 5 ("SMART status ok, but some attribute was once below threshold")
/// is ignored. A process killed by a signal reports `-1` and counts as
/// failed.
pub fn smart_failed(status: i32) -> bool {
    status & !32 != 0
}

pub struct DiskMonitor {
    config: DiskConfig,
    probe: Arc<dyn DiskProbe>,
    table: DiskTable,
    pool_map: PoolMap,
}

impl DiskMonitor {
    /// Resolve slots, initialize every slot LED and build the pool map.
    ///
    /// Configuration errors are returned before any LED is written.
    pub fn init(
        config: &DiskConfig,
        leds: Arc<dyn LedClass>,
        probe: Arc<dyn DiskProbe>,
    ) -> Result<Self> {
        let mapping = plan_slots(config, probe.as_ref())?;
        let table = bind_slots(&mapping, config, &leds);
        log::info!(
            "disk monitor: {} of {} slots bound ({} mapping)",
            table.len(),
            mapping.slots.len(),
            mapping.method
        );

        let pool_map = if config.check_zpool {
            build_pool_map(&table, probe.as_ref(), config.debug_zpool)
        } else {
            PoolMap::default()
        };

        Ok(DiskMonitor {
            config: config.clone(),
            probe,
            table,
            pool_map,
        })
    }

    pub fn table(&self) -> &DiskTable {
        &self.table
    }

    pub fn pool_map(&self) -> &PoolMap {
        &self.pool_map
    }

    // ── Loop bodies ──

    /// One SMART pass over every healthy disk.
    pub fn check_smart(&self) {
        for entry in self.table.iter() {
            if entry.health() != DiskHealth::Healthy {
                continue;
            }
            let status = match self.probe.smart_health(entry.device()) {
                Ok(status) => status,
                Err(e) => {
                    log::warn!("SMART check skipped for /dev/{}: {e}", entry.device());
                    continue;
                }
            };
            if !smart_failed(status) {
                continue;
            }
            let mut state = entry.lock();
            state.smart_failed = true;
            if state.health() == DiskHealth::SmartFailed {
                paint(entry.led(), self.config.color_smart_fail);
            }
            log::warn!(
                "SMART disk failure detected on /dev/{} (status {status}) -> LED {}",
                entry.device(),
                entry.led().name()
            );
        }
    }

    /// One pool pass. `logged` holds pool devices whose failure was already
    /// reported; it is owned by the pool loop.
    pub fn check_pool(&self, logged: &mut HashSet<String>) {
        let output = match self.probe.pool_status() {
            Ok(output) => output,
            Err(e) => {
                log::warn!("pool status unavailable, skipping: {e}");
                return;
            }
        };

        for member in parse_status(&output) {
            if member.state.is_empty() {
                continue;
            }
            let led = self.pool_map.lookup(
                &member.name,
                self.table.device_to_led(),
                self.probe.as_ref(),
            );
            let Some(entry) = led.and_then(|l| self.table.by_led(l)) else {
                if self.config.debug_zpool {
                    log::warn!("pool device /dev/{} not found in LED mapping", member.name);
                }
                continue;
            };

            if is_fail_state(&member.state) {
                let mut state = entry.lock();
                state.pool_faulted = true;
                if state.health() == DiskHealth::PoolFaulted {
                    paint(entry.led(), self.config.color_zpool_fail);
                }
                drop(state);
                if logged.insert(member.name.clone()) {
                    log::warn!(
                        "pool disk failure detected on /dev/{} (state: {}) -> LED {}",
                        member.name,
                        member.state,
                        entry.led().name()
                    );
                }
            } else {
                let mut state = entry.lock();
                let was = state.health();
                state.pool_faulted = false;
                if was == DiskHealth::PoolFaulted && state.health() == DiskHealth::Healthy {
                    paint(entry.led(), self.config.color_disk_health);
                    log::info!(
                        "pool disk /dev/{} recovered (state: {})",
                        member.name,
                        member.state
                    );
                }
                drop(state);
                logged.remove(&member.name);
            }
        }
    }

    /// One presence pass: a healthy disk whose statistics vanished goes offline.
    pub fn check_online(&self) {
        for entry in self.table.iter() {
            if entry.health() != DiskHealth::Healthy {
                continue;
            }
            if self.probe.device_present(entry.device()) {
                continue;
            }
            let mut state = entry.lock();
            state.offline = true;
            paint(entry.led(), self.config.color_disk_unavail);
            drop(state);
            log::warn!(
                "disk /dev/{} went offline -> LED {}",
                entry.device(),
                entry.led().name()
            );
        }
    }

    /// One activity pass: blink every healthy disk whose I/O counters moved.
    pub fn check_activity(&self) {
        for entry in self.table.iter() {
            if entry.health() != DiskHealth::Healthy {
                continue;
            }
            let Ok(stat) = self.probe.block_stat(entry.device()) else {
                continue;
            };
            let mut state = entry.lock();
            if state.health() != DiskHealth::Healthy
                || state.last_activity.as_deref() == Some(stat.as_str())
            {
                continue;
            }
            state.last_activity = Some(stat);
            if let Err(e) = entry.led().shot() {
                log::debug!("{}: {e}", entry.led().name());
            }
        }
    }

    /// Run all enabled loops until shutdown.
    pub fn run(&self, shutdown: &Shutdown) {
        let c = &self.config;
        thread::scope(|s| {
            if c.check_smart {
                let interval = interval_secs(c.check_smart_interval as f64, SMART_FALLBACK_SECS);
                spawn_loop(s, "disk-smart", move || {
                    run_every(interval, shutdown, || self.check_smart());
                });
            }
            if c.check_zpool {
                let interval = interval_secs(c.check_zpool_interval as f64, POOL_FALLBACK_SECS);
                spawn_loop(s, "disk-pool", move || {
                    let mut logged = HashSet::new();
                    run_every(interval, shutdown, || self.check_pool(&mut logged));
                });
            }
            let interval =
                interval_secs(c.check_disk_online_interval as f64, ONLINE_FALLBACK_SECS);
            spawn_loop(s, "disk-online", move || {
                run_every(interval, shutdown, || self.check_online());
            });
            let interval = interval_secs(c.led_refresh_interval, ACTIVITY_FALLBACK_SECS);
            spawn_loop(s, "disk-activity", move || {
                run_every(interval, shutdown, || self.check_activity());
            });
        });
        log::debug!("disk monitor stopped");
    }
}

fn spawn_loop<'scope, 'env>(
    s: &'scope thread::Scope<'scope, 'env>,
    name: &str,
    f: impl FnOnce() + Send + 'scope,
) {
    if let Err(e) = thread::Builder::new().name(name.to_string()).spawn_scoped(s, f) {
        log::error!("cannot start {name} loop: {e}");
    }
}

fn paint(led: &Led, color: Rgb) {
    if let Err(e) = led.set_color(color) {
        log::warn!("{}: {e}", led.name());
    }
}

/// Initialize slot LEDs from a resolved mapping and register bound disks.
fn bind_slots(mapping: &DiskMapping, config: &DiskConfig, leds: &Arc<dyn LedClass>) -> DiskTable {
    let mut table = DiskTable::new();
    for slot in &mapping.slots {
        let led = Led::new(leds.clone(), slot.led.as_str());
        if !led.exists() {
            log::debug!("{} not present, skipping slot", slot.led);
            continue;
        }
        let Some(device) = slot.bound_device() else {
            log::debug!("{}: no disk for {}", slot.led, slot.key);
            if let Err(e) = led.disable() {
                log::warn!("{}: {e}", slot.led);
            }
            continue;
        };
        if let Err(e) = init_slot_led(&led, config) {
            log::warn!("cannot initialize {}: {e}", slot.led);
            continue;
        }
        log::info!(
            "mapped {} {} -> {device} -> {}",
            mapping.method,
            slot.key,
            slot.led
        );
        table.insert(DiskEntry::new(led, device));
    }
    table
}

fn init_slot_led(led: &Led, config: &DiskConfig) -> crate::led::Result<()> {
    led.set_trigger(Trigger::Oneshot)?;
    led.set_invert(true)?;
    led.set_delay_on(BLINK_DELAY_MS)?;
    led.set_delay_off(BLINK_DELAY_MS)?;
    led.set_color(config.color_disk_health)?;
    led.set_brightness(config.brightness_disk_leds)
}

fn build_pool_map(table: &DiskTable, probe: &dyn DiskProbe, verbose: bool) -> PoolMap {
    match probe.pool_status() {
        Ok(output) => {
            let bindings = bind_members(&parse_status(&output), table.device_to_led(), probe);
            PoolMap::from_bindings(&bindings, verbose)
        }
        Err(e) => {
            log::warn!("cannot build pool mapping: {e}");
            PoolMap::default()
        }
    }
}
