use std::path::Path;

use ugreen_leds_lib::led::Rgb;

use super::*;

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

fn tier(color: Option<Rgb>) -> String {
    color.map_or_else(|| "-".to_string(), |c| c.to_string())
}

pub(super) fn cmd_config(config_path: &Path, json: bool) -> Result<()> {
    let config = load_config(config_path);
    let exists = config_path.exists();
    let problems: Vec<String> = match config.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => errors.iter().map(ToString::to_string).collect(),
    };

    if json {
        return print_json(&ConfigOutput {
            config_file: config_path.display().to_string(),
            config_file_exists: exists,
            settings: config,
            problems,
        });
    }

    let d = &config.disk;
    let n = &config.network;
    let w = kv_width(
        &["Config file:", "Disk:", "Network:", "Tools:"],
        &["CHECK_LINK_SPEED_DYNAMIC:"],
    );

    let file_display = if exists {
        config_path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", config_path.display())
    };
    kv("Config file:", file_display, w);

    println!();
    kv("Disk:", on_off(d.enable), w);
    kv_indent("MAPPING_METHOD:", &d.mapping_method, w);
    if !d.disk_serial.is_empty() {
        kv_indent("DISK_SERIAL:", d.disk_serial.join(" "), w);
    }
    kv_indent(
        "CHECK_SMART:",
        format!("{} (every {}s)", on_off(d.check_smart), d.check_smart_interval),
        w,
    );
    kv_indent(
        "CHECK_ZPOOL:",
        format!("{} (every {}s)", on_off(d.check_zpool), d.check_zpool_interval),
        w,
    );
    kv_indent("ONLINE_INTERVAL:", format!("{}s", d.check_disk_online_interval), w);
    kv_indent("LED_REFRESH:", format!("{}s", d.led_refresh_interval), w);
    kv_indent("BRIGHTNESS:", d.brightness_disk_leds, w);
    kv_indent("COLOR_HEALTH:", d.color_disk_health, w);
    kv_indent("COLOR_STANDBY:", d.color_disk_standby, w);
    kv_indent("COLOR_UNAVAIL:", d.color_disk_unavail, w);
    kv_indent("COLOR_ZPOOL_FAIL:", d.color_zpool_fail, w);
    kv_indent("COLOR_SMART_FAIL:", d.color_smart_fail, w);

    println!();
    let ifaces = if n.interfaces.is_empty() {
        "off".to_string()
    } else {
        n.interfaces.join(", ")
    };
    kv("Network:", ifaces, w);
    kv_indent("CHECK_INTERVAL:", format!("{}s", n.check_interval), w);
    kv_indent("CHECK_GATEWAY:", on_off(n.check_gateway_connectivity), w);
    kv_indent("CHECK_LINK_SPEED:", on_off(n.check_link_speed), w);
    kv_indent("CHECK_LINK_SPEED_DYNAMIC:", on_off(n.check_link_speed_dynamic), w);
    if n.check_link_speed_dynamic {
        kv_indent(
            "GRADIENT:",
            format!(
                "{} @ {} Mbps -> {} @ {} Mbps",
                n.dynamic_color_low, n.dynamic_speed_low, n.dynamic_color_high, n.dynamic_speed_high
            ),
            w,
        );
    }
    kv_indent("BRIGHTNESS:", n.brightness_led, w);
    kv_indent("COLOR_NORMAL:", n.color_normal, w);
    kv_indent("COLOR_UNREACHABLE:", n.color_gateway_unreachable, w);
    kv_indent(
        "LINK TIERS:",
        format!(
            "100={} 1000={} 2000={} 2500={} 5000={} 10000={}",
            tier(n.color_link_100),
            tier(n.color_link_1000),
            tier(n.color_link_2000),
            tier(n.color_link_2500),
            tier(n.color_link_5000),
            tier(n.color_link_10000),
        ),
        w,
    );
    kv_indent(
        "BLINK:",
        format!("tx={} rx={} interval={}ms", n.blink_tx, n.blink_rx, n.blink_interval),
        w,
    );

    println!();
    let t = &config.tools;
    kv("Tools:", "", w);
    kv_indent("smartctl:", &t.smartctl, w);
    kv_indent("zpool:", &t.zpool, w);
    kv_indent("lsblk:", &t.lsblk, w);
    kv_indent("dmidecode:", &t.dmidecode, w);
    kv_indent("ip:", &t.ip, w);
    kv_indent("ping:", &t.ping, w);

    if !problems.is_empty() {
        println!();
        println!("Problems:");
        for p in &problems {
            println!("  {p}");
        }
    }

    Ok(())
}
