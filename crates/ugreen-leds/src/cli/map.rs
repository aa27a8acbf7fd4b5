use std::path::Path;

use ugreen_leds_lib::disk::{mapping, pool};
use ugreen_leds_lib::probe::{DiskProbe, SystemProbe};

use super::*;

pub(super) fn cmd_map(config_path: &Path, json: bool) -> Result<()> {
    let config = load_config(config_path);
    let probe = SystemProbe::new(config.tools.clone());
    let disks = mapping::plan_slots(&config.disk, &probe)?;

    let pool = if config.disk.check_zpool {
        Some(pool_bindings(&disks, &probe)?)
    } else {
        None
    };

    if json {
        return print_json(&MapOutput { disks, pool });
    }

    let w = kv_width(&["Method:", "Model:", "Slots:"], &["disk8:"]);
    kv("Method:", disks.method, w);
    kv("Model:", disks.product.as_deref().unwrap_or("(unknown)"), w);

    println!();
    println!("Slots:");
    for slot in &disks.slots {
        let target = match (&slot.device, slot.present) {
            (Some(dev), true) => dev.clone(),
            (Some(dev), false) => format!("{dev} (no block stats, off)"),
            (None, _) => "(empty, off)".to_string(),
        };
        kv_indent(&format!("{}:", slot.led), format!("{:<12}{target}", slot.key), w);
    }

    if let Some(bindings) = &pool {
        println!();
        println!("Pool members:");
        if bindings.is_empty() {
            println!("  (none)");
        }
        for b in bindings {
            let led = b.led.as_deref().unwrap_or("-");
            let base = b.base.as_deref().unwrap_or("?");
            kv_indent(
                &format!("{}:", b.member),
                format!("{:<10}{base} -> {led}", b.state),
                w.max(14),
            );
        }
    }

    Ok(())
}

fn pool_bindings(disks: &DiskMapping, probe: &dyn DiskProbe) -> Result<Vec<PoolBinding>> {
    let status = probe.pool_status()?;
    let members = pool::parse_status(&status);
    Ok(pool::bind_members(&members, &disks.device_to_led(), probe))
}
