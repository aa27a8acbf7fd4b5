//! Service orchestration — start every enabled monitor on its own thread.
//!
//! Monitors are independent: a startup failure in one (missing LED, bad
//! mapping configuration) is logged and returned, the others keep running.
//! [`run`] returns once every monitor thread has finished, which after
//! startup only happens on shutdown.

use std::sync::Arc;
use std::thread;

use crate::config::Config;
use crate::disk::DiskMonitor;
use crate::error::{Result, UgreenError};
use crate::led::LedClass;
use crate::net::NetMonitor;
use crate::probe::{DiskProbe, NetProbe};
use crate::shutdown::Shutdown;

/// Backends the monitors run against.
#[derive(Clone)]
pub struct Backends {
    pub leds: Arc<dyn LedClass>,
    pub disk: Arc<dyn DiskProbe>,
    pub net: Arc<dyn NetProbe>,
}

/// A monitor that stopped with an error.
#[derive(Debug)]
pub struct MonitorFailure {
    /// `disk` or `net:<iface>`.
    pub monitor: String,
    pub error: UgreenError,
}

fn run_disk(config: &Config, backends: &Backends, shutdown: &Shutdown) -> Result<()> {
    let monitor = DiskMonitor::init(&config.disk, backends.leds.clone(), backends.disk.clone())?;
    monitor.run(shutdown);
    Ok(())
}

fn run_net(
    config: &Config,
    index: usize,
    iface: &str,
    backends: &Backends,
    shutdown: &Shutdown,
) -> Result<()> {
    let started = NetMonitor::start(
        &config.network,
        index,
        iface,
        backends.leds.clone(),
        backends.net.clone(),
    )?;
    if let Some(monitor) = started {
        monitor.run(shutdown);
    }
    Ok(())
}

fn spawn_monitor<'scope, 'env>(
    s: &'scope thread::Scope<'scope, 'env>,
    name: &str,
    f: impl FnOnce() -> Result<()> + Send + 'scope,
) -> std::io::Result<thread::ScopedJoinHandle<'scope, Result<()>>> {
    thread::Builder::new().name(name.to_string()).spawn_scoped(s, f)
}

/// Run all enabled monitors until shutdown. Returns monitors that failed.
pub fn run(config: &Config, backends: &Backends, shutdown: &Shutdown) -> Vec<MonitorFailure> {
    let mut failures = Vec::new();

    thread::scope(|s| {
        let mut started = Vec::new();
        if config.disk.enable {
            let handle = spawn_monitor(s, "disk", move || run_disk(config, backends, shutdown));
            started.push(("disk".to_string(), handle));
        }
        for (index, iface) in config.network.interfaces.iter().enumerate() {
            let name = format!("net:{iface}");
            let handle = spawn_monitor(s, &name, move || {
                run_net(config, index, iface, backends, shutdown)
            });
            started.push((name, handle));
        }
        if started.is_empty() {
            log::warn!("no monitors enabled");
        }

        for (name, handle) in started {
            let result = match handle {
                Ok(h) => h
                    .join()
                    .unwrap_or_else(|_| Err(UgreenError::Unavailable(format!("{name} panicked")))),
                Err(e) => Err(UgreenError::Io(e)),
            };
            if let Err(error) = result {
                failures.push(MonitorFailure {
                    monitor: name,
                    error,
                });
            }
        }
    });

    for f in &failures {
        log::error!("{} monitor: {}", f.monitor, f.error);
    }
    log::info!("service stopped");
    failures
}
