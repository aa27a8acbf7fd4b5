//! Storage-pool membership — map `zpool status -L` device names to slot LEDs.

use std::collections::HashMap;

use serde::Serialize;

use super::mapping::strip_partition;
use crate::probe::DiskProbe;

/// Member states that mark a disk as failed from the pool's point of view.
pub const POOL_FAIL_STATES: [&str; 5] = ["OFFLINE", "FAULTED", "UNAVAIL", "REMOVED", "CORRUPT"];

pub fn is_fail_state(state: &str) -> bool {
    POOL_FAIL_STATES.contains(&state)
}

/// A device row from `zpool status -L`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolMember {
    /// Name as printed by the pool (`sda1`, `dm-2`, ...).
    pub name: String,
    /// Member state; empty if the row had no state column.
    pub state: String,
}

/// Extract device rows: trimmed lines whose first token starts with `sd` or `dm`.
pub fn parse_status(output: &str) -> Vec<PoolMember> {
    output
        .lines()
        .map(str::trim)
        .filter(|l| l.starts_with("sd") || l.starts_with("dm"))
        .filter_map(|l| {
            let mut fields = l.split_whitespace();
            Some(PoolMember {
                name: fields.next()?.to_string(),
                state: fields.next().unwrap_or_default().to_string(),
            })
        })
        .collect()
}

/// Resolve a pool device name to its whole-disk base device.
///
/// `sdXN` drops the partition number. `dm-N` resolves through the first
/// (sorted) slave of the device-mapper node. Anything else is unsupported.
pub fn base_device(name: &str, probe: &dyn DiskProbe) -> Option<String> {
    if name.starts_with("dm-") {
        return match probe.dm_slaves(name) {
            Ok(slaves) => slaves.first().map(|s| strip_partition(s).to_string()),
            Err(e) => {
                log::debug!("cannot resolve {name}: {e}");
                None
            }
        };
    }
    if name.starts_with("sd") {
        return Some(strip_partition(name).to_string());
    }
    log::debug!("unsupported pool device name: {name}");
    None
}

/// Resolved pool member, as shown by `ugreen-leds map`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolBinding {
    pub member: String,
    pub state: String,
    pub base: Option<String>,
    pub led: Option<String>,
}

/// Resolve every member of a status listing against `device → LED`.
pub fn bind_members(
    members: &[PoolMember],
    device_to_led: &HashMap<String, String>,
    probe: &dyn DiskProbe,
) -> Vec<PoolBinding> {
    members
        .iter()
        .map(|m| {
            let base = base_device(&m.name, probe);
            let led = base.as_ref().and_then(|b| device_to_led.get(b)).cloned();
            PoolBinding {
                member: m.name.clone(),
                state: m.state.clone(),
                base,
                led,
            }
        })
        .collect()
}

/// Pool device name → LED name, holding both raw and base names.
#[derive(Debug, Clone, Default)]
pub struct PoolMap {
    map: HashMap<String, String>,
}

impl PoolMap {
    /// Build from resolved bindings. Unresolved members are left out.
    pub fn from_bindings(bindings: &[PoolBinding], verbose: bool) -> Self {
        let mut map = HashMap::new();
        for b in bindings {
            let (Some(base), Some(led)) = (&b.base, &b.led) else {
                continue;
            };
            map.insert(b.member.clone(), led.clone());
            map.insert(base.clone(), led.clone());
            if verbose {
                log::info!("pool device {} -> {base} -> LED {led}", b.member);
            } else {
                log::debug!("pool device {} -> {base} -> LED {led}", b.member);
            }
        }
        PoolMap { map }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str)
    }

    /// Find the LED for a pool device: raw name, then base name in the pool
    /// map, then base name in `device → LED`.
    pub fn lookup<'a>(
        &'a self,
        name: &str,
        device_to_led: &'a HashMap<String, String>,
        probe: &dyn DiskProbe,
    ) -> Option<&'a str> {
        if let Some(led) = self.get(name) {
            return Some(led);
        }
        let base = base_device(name, probe)?;
        self.get(&base)
            .or_else(|| device_to_led.get(&base).map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::mock::MockDiskProbe;

    const STATUS: &str = "\
  pool: tank
 state: DEGRADED
config:

\tNAME        STATE     READ WRITE CKSUM
\ttank        DEGRADED     0     0     0
\t  raidz1-0  DEGRADED     0     0     0
\t    sda1    ONLINE       0     0     0
\t    sdb1    FAULTED      3     0     0  too many errors
\t    dm-0    ONLINE       0     0     0
\t    dm_crypt_x ONLINE    0     0     0

errors: No known data errors
";

    fn d2l(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(d, l)| (d.to_string(), l.to_string()))
            .collect()
    }

    // ── States ──

    #[test]
    fn fail_states() {
        for s in POOL_FAIL_STATES {
            assert!(is_fail_state(s));
        }
        for s in ["ONLINE", "AVAIL", "DEGRADED", "INUSE", ""] {
            assert!(!is_fail_state(s), "{s}");
        }
    }

    // ── parse_status ──

    #[test]
    fn parse_status_device_rows() {
        let members = parse_status(STATUS);
        let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["sda1", "sdb1", "dm-0", "dm_crypt_x"]);
        assert_eq!(members[1].state, "FAULTED");
    }

    #[test]
    fn parse_status_row_without_state() {
        let members = parse_status("  sdc\n");
        assert_eq!(
            members,
            vec![PoolMember {
                name: "sdc".into(),
                state: String::new()
            }]
        );
    }

    #[test]
    fn parse_status_ignores_pool_and_vdev_rows() {
        assert!(parse_status("tank ONLINE\nmirror-0 ONLINE\nstate: ONLINE\n").is_empty());
    }

    // ── base_device ──

    #[test]
    fn base_device_strips_partition() {
        let probe = MockDiskProbe::new();
        assert_eq!(base_device("sda1", &probe).as_deref(), Some("sda"));
        assert_eq!(base_device("sdb", &probe).as_deref(), Some("sdb"));
    }

    #[test]
    fn base_device_resolves_dm_slave() {
        let probe = MockDiskProbe::new();
        probe.set_slaves("dm-0", &["sdc2", "sdd2"]);
        assert_eq!(base_device("dm-0", &probe).as_deref(), Some("sdc"));
    }

    #[test]
    fn base_device_dm_without_slaves() {
        let probe = MockDiskProbe::new();
        assert_eq!(base_device("dm-1", &probe), None);
        probe.set_slaves("dm-2", &[]);
        assert_eq!(base_device("dm-2", &probe), None);
    }

    #[test]
    fn base_device_unsupported_dm_name() {
        let probe = MockDiskProbe::new();
        assert_eq!(base_device("dm_crypt_x", &probe), None);
    }

    // ── PoolMap ──

    #[test]
    fn map_holds_raw_and_base_names() {
        let probe = MockDiskProbe::new();
        probe.set_slaves("dm-0", &["sdc1"]);
        let devices = d2l(&[("sda", "disk1"), ("sdb", "disk2"), ("sdc", "disk3")]);
        let bindings = bind_members(&parse_status(STATUS), &devices, &probe);
        let map = PoolMap::from_bindings(&bindings, false);

        assert_eq!(map.get("sda1"), Some("disk1"));
        assert_eq!(map.get("sda"), Some("disk1"));
        assert_eq!(map.get("sdb1"), Some("disk2"));
        assert_eq!(map.get("dm-0"), Some("disk3"));
        assert_eq!(map.get("sdc"), Some("disk3"));
        assert_eq!(map.len(), 6);
    }

    #[test]
    fn map_skips_members_outside_slots() {
        let probe = MockDiskProbe::new();
        let bindings = bind_members(&parse_status("sdz1 ONLINE\n"), &HashMap::new(), &probe);
        assert_eq!(bindings[0].base.as_deref(), Some("sdz"));
        assert_eq!(bindings[0].led, None);
        assert!(PoolMap::from_bindings(&bindings, true).is_empty());
    }

    #[test]
    fn lookup_priority() {
        let probe = MockDiskProbe::new();
        let devices = d2l(&[("sda", "disk1"), ("sdb", "disk2")]);
        let bindings = bind_members(&parse_status("sda1 ONLINE\n"), &devices, &probe);
        let map = PoolMap::from_bindings(&bindings, false);

        // Raw name hit.
        assert_eq!(map.lookup("sda1", &devices, &probe), Some("disk1"));
        // New partition of a mapped disk: base name in pool map.
        assert_eq!(map.lookup("sda9", &devices, &probe), Some("disk1"));
        // Never seen at startup: base name in device map.
        assert_eq!(map.lookup("sdb3", &devices, &probe), Some("disk2"));
        assert_eq!(map.lookup("sdq1", &devices, &probe), None);
    }
}
