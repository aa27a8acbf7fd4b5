//! Per-interface network monitor driving one netdev LED.

use std::sync::Arc;

use super::color::link_color;
use crate::config::NetworkConfig;
use crate::error::{Result, UgreenError};
use crate::led::{Led, LedClass, Rgb, Trigger};
use crate::probe::NetProbe;
use crate::shutdown::{Shutdown, interval_secs, run_every};

const CHECK_FALLBACK_SECS: f64 = 60.0;

/// LED owned by the interface at `index` in `NETWORK_INTERFACES`:
/// `netdev`, `netdev2`, `netdev3`, ...
pub fn netdev_led_name(index: usize) -> String {
    match index {
        0 => "netdev".to_string(),
        i => format!("netdev{}", i + 1),
    }
}

/// Gateway address from `ip route`: the first line mentioning `default`
/// that carries a `via <addr>` pair.
pub fn parse_default_gateway(routes: &str) -> Option<String> {
    routes
        .lines()
        .filter(|l| l.contains("default"))
        .find_map(|l| {
            let fields: Vec<&str> = l.split_whitespace().collect();
            fields
                .windows(2)
                .find(|w| w[0] == "via")
                .map(|w| w[1].to_string())
        })
}

pub struct NetMonitor {
    config: NetworkConfig,
    iface: String,
    led: Led,
    probe: Arc<dyn NetProbe>,
}

impl std::fmt::Debug for NetMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetMonitor")
            .field("iface", &self.iface)
            .field("led", &self.led)
            .finish()
    }
}

impl NetMonitor {
    /// Set up the LED for `iface`.
    ///
    /// Returns `Ok(None)` when no check is enabled; nothing is written then.
    /// A missing LED is [`UgreenError::Unavailable`].
    pub fn start(
        config: &NetworkConfig,
        index: usize,
        iface: &str,
        leds: Arc<dyn LedClass>,
        probe: Arc<dyn NetProbe>,
    ) -> Result<Option<Self>> {
        if !config.any_check_enabled() {
            log::debug!("{iface}: no network checks enabled");
            return Ok(None);
        }
        let led = Led::new(leds, netdev_led_name(index));
        if !led.exists() {
            return Err(UgreenError::Unavailable(format!(
                "LED {} for {iface} does not exist",
                led.name()
            )));
        }

        led.set_trigger(Trigger::Netdev)?;
        led.set_device_name(iface)?;
        led.set_link(true)?;
        led.set_tx(config.blink_tx)?;
        led.set_rx(config.blink_rx)?;
        led.set_interval(config.blink_interval)?;
        led.set_color(config.color_normal)?;
        led.set_brightness(config.brightness_led)?;
        log::info!("network monitor: {iface} -> LED {}", led.name());

        Ok(Some(NetMonitor {
            config: config.clone(),
            iface: iface.to_string(),
            led,
            probe,
        }))
    }

    pub fn iface(&self) -> &str {
        &self.iface
    }

    pub fn led(&self) -> &Led {
        &self.led
    }

    /// Whether the default gateway answers. No gateway counts as unreachable.
    pub fn gateway_reachable(&self) -> bool {
        let routes = match self.probe.routes() {
            Ok(routes) => routes,
            Err(e) => {
                log::warn!("{}: cannot read routes: {e}", self.iface);
                return false;
            }
        };
        match parse_default_gateway(&routes) {
            Some(gw) => self.probe.ping(&gw),
            None => {
                log::debug!("{}: no default gateway", self.iface);
                false
            }
        }
    }

    /// Color the LED should show right now.
    pub fn current_color(&self) -> Rgb {
        if self.config.check_gateway_connectivity && !self.gateway_reachable() {
            return self.config.color_gateway_unreachable;
        }
        if !self.config.check_link_speed && !self.config.check_link_speed_dynamic {
            return self.config.color_normal;
        }
        let speed = match self.probe.link_speed(&self.iface) {
            Ok(speed) => Some(speed),
            Err(e) => {
                log::debug!("{}: {e}", self.iface);
                None
            }
        };
        link_color(&self.config, speed)
    }

    /// Evaluate once and write the color. Returns the color written.
    pub fn tick(&self) -> Rgb {
        let color = self.current_color();
        if let Err(e) = self.led.set_color(color) {
            log::warn!("{}: {e}", self.led.name());
        }
        color
    }

    /// Tick every `CHECK_NETDEV_INTERVAL` seconds until shutdown.
    pub fn run(&self, shutdown: &Shutdown) {
        let interval = interval_secs(self.config.check_interval as f64, CHECK_FALLBACK_SECS);
        let mut last = self.config.color_normal;
        run_every(interval, shutdown, || {
            let color = self.tick();
            if color != last {
                log::info!("{}: LED {} color {color}", self.iface, self.led.name());
                last = color;
            }
        });
        log::debug!("{}: network monitor stopped", self.iface);
    }
}
