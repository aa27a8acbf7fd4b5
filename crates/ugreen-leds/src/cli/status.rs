//! `status` subcommand — read back the LED class attributes.

use std::path::Path;
use std::sync::Arc;

use ugreen_leds_lib::config::DiskConfig;
use ugreen_leds_lib::disk::SLOT_LEDS;
use ugreen_leds_lib::led::{Led, LedClass, Rgb, SysfsLeds};
use ugreen_leds_lib::net::netdev_led_name;

use super::*;

/// Active trigger from a sysfs `trigger` listing (`none [oneshot] netdev`).
fn active_trigger(listing: &str) -> &str {
    listing
        .split_whitespace()
        .find_map(|t| t.strip_prefix('[')?.strip_suffix(']'))
        .unwrap_or(listing)
}

/// What a disk LED's color says about the disk.
fn classify_disk(color: Rgb, brightness: Option<&str>, config: &DiskConfig) -> &'static str {
    if brightness == Some("0") {
        return "off";
    }
    if color == config.color_disk_health {
        "healthy"
    } else if color == config.color_disk_standby {
        "standby"
    } else if [
        config.color_disk_unavail,
        config.color_zpool_fail,
        config.color_smart_fail,
    ]
    .contains(&color)
    {
        "fault"
    } else {
        "unknown"
    }
}

fn read_led(leds: &Arc<dyn LedClass>, name: &str, disk: Option<&DiskConfig>) -> LedStatusJson {
    let led = Led::new(leds.clone(), name);
    if !led.exists() {
        return LedStatusJson {
            led: name.to_string(),
            present: false,
            trigger: None,
            color: None,
            brightness: None,
            state: None,
        };
    }
    let trigger = led.read("trigger").ok().map(|t| active_trigger(&t).to_string());
    let brightness = led.read("brightness").ok();
    let color = led.color().ok();
    let state = match (disk, color) {
        (Some(config), Some(c)) => Some(classify_disk(c, brightness.as_deref(), config).to_string()),
        _ => None,
    };
    LedStatusJson {
        led: name.to_string(),
        present: true,
        trigger,
        color: color.map(|c| c.to_string()),
        brightness,
        state,
    }
}

fn print_led(s: &LedStatusJson, w: usize) {
    if !s.present {
        kv_indent(&format!("{}:", s.led), "(not present)", w);
        return;
    }
    let mut line = format!(
        "{:<10}{:<14}brightness {}",
        s.trigger.as_deref().unwrap_or("?"),
        s.color.as_deref().unwrap_or("?"),
        s.brightness.as_deref().unwrap_or("?"),
    );
    if let Some(state) = &s.state {
        line.push_str(&format!("  [{state}]"));
    }
    kv_indent(&format!("{}:", s.led), line, w);
}

pub(super) fn cmd_status(config_path: &Path, leds_root: &Path, json: bool) -> Result<()> {
    let config = load_config(config_path);
    let leds: Arc<dyn LedClass> = Arc::new(SysfsLeds::new(leds_root));

    let disks: Vec<LedStatusJson> = SLOT_LEDS
        .iter()
        .map(|name| read_led(&leds, name, Some(&config.disk)))
        .collect();

    let net_names: Vec<String> = if config.network.interfaces.is_empty() {
        vec![netdev_led_name(0)]
    } else {
        (0..config.network.interfaces.len()).map(netdev_led_name).collect()
    };
    let network: Vec<LedStatusJson> = net_names.iter().map(|n| read_led(&leds, n, None)).collect();

    if json {
        return print_json(&StatusOutput {
            version: env!("CARGO_PKG_VERSION").to_string(),
            leds_root: leds_root.display().to_string(),
            disks,
            network,
        });
    }

    let w = kv_width(&["Version:", "LEDs:"], &["netdev10:"]);
    kv("Version:", env!("CARGO_PKG_VERSION"), w);
    kv("LEDs:", leds_root.display(), w);

    if disks.iter().chain(&network).all(|s| !s.present) {
        println!();
        println!("No UGREEN LEDs found (is the led-ugreen driver loaded?)");
        return Ok(());
    }

    println!();
    println!("Disks:");
    for s in &disks {
        print_led(s, w);
    }
    println!();
    println!("Network:");
    for s in &network {
        print_led(s, w);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ugreen_leds_lib::led::mock::MockLeds;

    // ── active_trigger ──

    #[test]
    fn active_trigger_picks_bracketed_entry() {
        assert_eq!(active_trigger("none [oneshot] netdev timer"), "oneshot");
        assert_eq!(active_trigger("[none] oneshot"), "none");
    }

    #[test]
    fn active_trigger_plain_value_passes_through() {
        assert_eq!(active_trigger("netdev"), "netdev");
    }

    // ── classify_disk ──

    #[test]
    fn classify_by_configured_colors() {
        let config = DiskConfig {
            color_disk_health: Rgb::new(255, 255, 255),
            color_disk_standby: Rgb::new(0, 0, 255),
            color_zpool_fail: Rgb::new(255, 165, 0),
            ..DiskConfig::default()
        };
        assert_eq!(classify_disk(Rgb::new(255, 255, 255), Some("255"), &config), "healthy");
        assert_eq!(classify_disk(Rgb::new(0, 0, 255), Some("255"), &config), "standby");
        assert_eq!(classify_disk(Rgb::new(255, 165, 0), Some("255"), &config), "fault");
        assert_eq!(classify_disk(Rgb::new(255, 0, 0), Some("255"), &config), "fault");
        assert_eq!(classify_disk(Rgb::new(1, 2, 3), Some("255"), &config), "unknown");
    }

    #[test]
    fn zero_brightness_is_off() {
        let config = DiskConfig::default();
        assert_eq!(classify_disk(config.color_disk_health, Some("0"), &config), "off");
    }

    // ── read_led ──

    #[test]
    fn read_led_missing() {
        let leds: Arc<dyn LedClass> = Arc::new(MockLeds::new());
        let s = read_led(&leds, "disk1", Some(&DiskConfig::default()));
        assert!(!s.present);
        assert!(s.color.is_none());
    }

    #[test]
    fn read_led_reports_attributes_and_state() {
        let mock = Arc::new(MockLeds::with_leds(&["disk1"]));
        mock.set_attr("disk1", "trigger", "none [oneshot] netdev");
        mock.set_attr("disk1", "color", "255 0 0");
        mock.set_attr("disk1", "brightness", "255");
        let leds: Arc<dyn LedClass> = mock;
        let s = read_led(&leds, "disk1", Some(&DiskConfig::default()));
        assert!(s.present);
        assert_eq!(s.trigger.as_deref(), Some("oneshot"));
        assert_eq!(s.color.as_deref(), Some("255 0 0"));
        assert_eq!(s.state.as_deref(), Some("fault"));
    }

    #[test]
    fn network_led_has_no_state() {
        let mock = Arc::new(MockLeds::with_leds(&["netdev"]));
        mock.set_attr("netdev", "color", "255 255 255");
        let leds: Arc<dyn LedClass> = mock;
        let s = read_led(&leds, "netdev", None);
        assert!(s.present);
        assert!(s.state.is_none());
    }
}
