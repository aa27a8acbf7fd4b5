//! Kernel LED trigger module check.

use std::path::Path;

pub const PROC_MODULES: &str = "/proc/modules";

/// Trigger modules the monitors rely on.
pub const REQUIRED_MODULES: [&str; 2] = ["ledtrig_oneshot", "ledtrig_netdev"];

/// Names from `required` that do not appear in a `/proc/modules` listing.
pub fn missing_modules<'a>(listing: &str, required: &[&'a str]) -> Vec<&'a str> {
    let loaded: Vec<&str> = listing
        .lines()
        .filter_map(|l| l.split_whitespace().next())
        .collect();
    required
        .iter()
        .copied()
        .filter(|m| !loaded.contains(m))
        .collect()
}

/// Warn about each required module missing from `path`. Never fatal.
///
/// Returns the missing names. An unreadable listing (built-in triggers,
/// no procfs) is logged at debug level and reports nothing missing.
pub fn check_modules(path: &Path) -> Vec<&'static str> {
    let listing = match std::fs::read_to_string(path) {
        Ok(listing) => listing,
        Err(e) => {
            log::debug!("cannot read {}: {e}", path.display());
            return Vec::new();
        }
    };
    let missing = missing_modules(&listing, &REQUIRED_MODULES);
    for m in &missing {
        log::warn!("kernel module {m} is not loaded; LED triggers may not work");
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
led_ugreen 16384 0 - Live 0x0000000000000000 (O)
ledtrig_oneshot 12288 8 - Live 0x0000000000000000
i2c_dev 24576 0 - Live 0x0000000000000000
";

    #[test]
    fn reports_missing() {
        assert_eq!(missing_modules(LISTING, &REQUIRED_MODULES), vec!["ledtrig_netdev"]);
    }

    #[test]
    fn all_loaded() {
        let listing = format!("{LISTING}ledtrig_netdev 16384 1 - Live 0x0\n");
        assert!(missing_modules(&listing, &REQUIRED_MODULES).is_empty());
    }

    #[test]
    fn prefix_is_not_a_match() {
        assert_eq!(
            missing_modules("ledtrig_netdev_extra 1 0 - Live 0x0\n", &["ledtrig_netdev"]),
            vec!["ledtrig_netdev"]
        );
    }

    #[test]
    fn check_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modules");
        std::fs::write(&path, LISTING).unwrap();
        assert_eq!(check_modules(&path), vec!["ledtrig_netdev"]);
    }

    #[test]
    fn check_unreadable_reports_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_modules(&dir.path().join("missing")).is_empty());
    }
}
