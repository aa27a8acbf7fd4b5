//! `run` subcommand — the long-running LED service.

use std::path::Path;
use std::sync::Arc;

use ugreen_leds_lib::led::SysfsLeds;
use ugreen_leds_lib::modules::{self, PROC_MODULES};
use ugreen_leds_lib::probe::SystemProbe;
use ugreen_leds_lib::service::{self, Backends};
use ugreen_leds_lib::shutdown::Shutdown;

use super::*;

pub(super) fn cmd_run(config_path: &Path) -> Result<()> {
    log::info!(
        "ugreen-leds {} starting (config: {})",
        env!("CARGO_PKG_VERSION"),
        config_path.display()
    );

    let config = load_config(config_path);
    if let Err(errors) = config.validate() {
        for e in &errors {
            log::warn!("config: {e}");
        }
    }

    modules::check_modules(Path::new(PROC_MODULES));

    let shutdown = Shutdown::new();
    let on_signal = shutdown.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        log::info!("shutdown requested");
        on_signal.request();
    }) {
        log::warn!("cannot install signal handler: {e}");
    }

    let probe = Arc::new(SystemProbe::new(config.tools.clone()));
    let backends = Backends {
        leds: Arc::new(SysfsLeds::default()),
        disk: probe.clone(),
        net: probe,
    };

    let failures = service::run(&config, &backends, &shutdown);
    if !failures.is_empty() && !shutdown.is_requested() {
        let names: Vec<&str> = failures.iter().map(|f| f.monitor.as_str()).collect();
        return Err(UgreenError::Unavailable(format!(
            "all monitors stopped: {} failed",
            names.join(", ")
        )));
    }
    Ok(())
}
