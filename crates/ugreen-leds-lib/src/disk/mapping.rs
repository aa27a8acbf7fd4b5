//! Disk identity resolution — which block device sits behind which slot LED.
//!
//! Three strategies produce a `key → device` map: the `ataN` component of
//! the `/sys/block` symlink target, the SCSI `H:C:T:L` address, or the drive
//! serial number. Slot keys (the order in which keys are assigned to
//! `disk1..disk8`) come from the chassis model profile or, for serial
//! mapping, from the configured serial list.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::models::{DEFAULT_ORDER, detect_model};
use crate::config::DiskConfig;
use crate::error::{Result, UgreenError};
use crate::probe::DiskProbe;

/// Slot LED names, left to right.
pub const SLOT_LEDS: [&str; 8] = [
    "disk1", "disk2", "disk3", "disk4", "disk5", "disk6", "disk7", "disk8",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingMethod {
    Ata,
    Hctl,
    Serial,
}

impl MappingMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            MappingMethod::Ata => "ata",
            MappingMethod::Hctl => "hctl",
            MappingMethod::Serial => "serial",
        }
    }
}

impl fmt::Display for MappingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MappingMethod {
    type Err = UgreenError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ata" => Ok(MappingMethod::Ata),
            "hctl" => Ok(MappingMethod::Hctl),
            "serial" => Ok(MappingMethod::Serial),
            other => Err(UgreenError::Config(format!(
                "unsupported mapping method: {other}"
            ))),
        }
    }
}

/// Strip a trailing numeric partition suffix (`sda1` → `sda`).
pub fn strip_partition(device: &str) -> &str {
    device.trim_end_matches(|c: char| c.is_ascii_digit())
}

// ── Discovery ──

/// Map `ataN → device` from `/sys/block` symlink targets.
pub fn parse_ata_links(links: &[(String, String)]) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for (device, target) in links {
        let port = target.split('/').find(|c| {
            c.strip_prefix("ata")
                .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
        });
        if let Some(port) = port {
            map.insert(port.to_string(), device.clone());
        }
    }
    map
}

/// Map `key → device` from `lsblk -S -o name,<key>,tran` output.
///
/// Only SATA-attached rows are considered.
pub fn parse_scsi_listing(output: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in output.lines().filter(|l| l.contains("sata")) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if let [device, key, ..] = fields[..] {
            map.insert(key.to_string(), device.to_string());
        }
    }
    map
}

/// Discover the `key → device` map for a mapping method.
pub fn discover(method: MappingMethod, probe: &dyn DiskProbe) -> Result<HashMap<String, String>> {
    match method {
        MappingMethod::Ata => Ok(parse_ata_links(&probe.block_links()?)),
        MappingMethod::Hctl | MappingMethod::Serial => {
            Ok(parse_scsi_listing(&probe.scsi_listing(method.as_str())?))
        }
    }
}

/// Slot keys in LED order, with the detected product name (if any).
///
/// Serial mapping without serials is a configuration error; this is checked
/// before anything else so no LED is touched.
pub fn slot_keys(
    method: MappingMethod,
    config: &DiskConfig,
    probe: &dyn DiskProbe,
) -> Result<(Vec<String>, Option<String>)> {
    if method == MappingMethod::Serial {
        if config.disk_serial.is_empty() {
            return Err(UgreenError::Config(
                "serial mapping method requires DISK_SERIAL".into(),
            ));
        }
        return Ok((config.disk_serial.clone(), None));
    }

    let product = probe.product_name();
    let profile = match product.as_deref().and_then(detect_model) {
        Some(p) => p,
        None => {
            match &product {
                Some(name) => log::warn!("unknown model \"{name}\", using default slot order"),
                None => log::warn!("cannot determine model, using default slot order"),
            }
            &DEFAULT_ORDER
        }
    };
    let keys = match method {
        MappingMethod::Hctl => profile.hctl_keys(),
        _ => profile.ata_keys(),
    };
    Ok((keys, product))
}

// ── Planning ──

/// One slot of a resolved mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotPlan {
    pub led: String,
    pub key: String,
    /// Device the key resolved to, if any.
    pub device: Option<String>,
    /// Whether the device's block statistics are present.
    pub present: bool,
}

impl SlotPlan {
    /// The device this slot will be bound to, if any.
    pub fn bound_device(&self) -> Option<&str> {
        self.device.as_deref().filter(|_| self.present)
    }
}

/// Result of disk identity resolution, without any LED writes.
#[derive(Debug, Clone, Serialize)]
pub struct DiskMapping {
    pub method: MappingMethod,
    pub product: Option<String>,
    pub slots: Vec<SlotPlan>,
}

impl DiskMapping {
    /// `device → LED` for every bound slot.
    pub fn device_to_led(&self) -> HashMap<String, String> {
        self.slots
            .iter()
            .filter_map(|s| Some((s.bound_device()?.to_string(), s.led.clone())))
            .collect()
    }
}

/// Resolve slots for the configured mapping method.
///
/// Slots beyond the number of keys are left out entirely.
pub fn plan_slots(config: &DiskConfig, probe: &dyn DiskProbe) -> Result<DiskMapping> {
    let method: MappingMethod = config.mapping_method.parse()?;
    let (keys, product) = slot_keys(method, config, probe)?;
    let devices = discover(method, probe)?;

    let slots = SLOT_LEDS
        .iter()
        .zip(keys)
        .map(|(led, key)| {
            let device = devices.get(&key).cloned();
            let present = device.as_deref().is_some_and(|d| probe.device_present(d));
            SlotPlan {
                led: led.to_string(),
                key,
                device,
                present,
            }
        })
        .collect();

    Ok(DiskMapping {
        method,
        product,
        slots,
    })
}
