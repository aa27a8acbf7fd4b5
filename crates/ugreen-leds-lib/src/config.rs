//! Service configuration — shell-variable style `KEY=VALUE` file.
//!
//! The file is sourced by the packaging scripts as well, so it keeps the
//! shell syntax: optional single/double quotes, `#` comment lines, blank
//! lines. Unset or empty keys keep their hardcoded defaults and a missing
//! file is not an error.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::disk::MappingMethod;
use crate::led::{Rgb, parse_rgb};

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/ugreen-leds.conf";

/// Environment variable consulted when `DISK_SERIAL` is not set in the file.
pub const DISK_SERIAL_ENV: &str = "DISK_SERIAL";

#[derive(Debug, Clone, Serialize)]
pub struct DiskConfig {
    pub enable: bool,
    /// `ata`, `hctl` or `serial`.
    pub mapping_method: String,
    /// Serial numbers in slot order (serial mapping only).
    pub disk_serial: Vec<String>,
    pub check_smart: bool,
    /// Seconds.
    pub check_smart_interval: i64,
    /// Seconds (fractional).
    pub led_refresh_interval: f64,
    pub check_zpool: bool,
    pub check_zpool_interval: i64,
    pub debug_zpool: bool,
    pub check_disk_online_interval: i64,
    pub color_disk_health: Rgb,
    pub color_disk_unavail: Rgb,
    pub color_disk_standby: Rgb,
    pub color_zpool_fail: Rgb,
    pub color_smart_fail: Rgb,
    pub brightness_disk_leds: i32,
}

impl Default for DiskConfig {
    fn default() -> Self {
        DiskConfig {
            enable: true,
            mapping_method: "ata".into(),
            disk_serial: Vec::new(),
            check_smart: true,
            check_smart_interval: 360,
            led_refresh_interval: 0.1,
            check_zpool: false,
            check_zpool_interval: 5,
            debug_zpool: false,
            check_disk_online_interval: 5,
            color_disk_health: Rgb::new(255, 255, 255),
            color_disk_unavail: Rgb::new(255, 0, 0),
            color_disk_standby: Rgb::new(0, 0, 255),
            color_zpool_fail: Rgb::new(255, 0, 0),
            color_smart_fail: Rgb::new(255, 0, 0),
            brightness_disk_leds: 255,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkConfig {
    /// Interfaces to monitor; empty disables the network monitor.
    pub interfaces: Vec<String>,
    pub color_normal: Rgb,
    pub color_gateway_unreachable: Rgb,
    pub color_link_purple_default: Rgb,
    pub color_link_100: Option<Rgb>,
    pub color_link_1000: Option<Rgb>,
    pub color_link_2000: Option<Rgb>,
    pub color_link_2500: Option<Rgb>,
    pub color_link_5000: Option<Rgb>,
    pub color_link_10000: Option<Rgb>,
    pub brightness_led: i32,
    /// Seconds.
    pub check_interval: i64,
    pub check_gateway_connectivity: bool,
    pub check_link_speed: bool,
    pub check_link_speed_dynamic: bool,
    pub dynamic_color_low: Rgb,
    pub dynamic_color_high: Rgb,
    /// Mbps.
    pub dynamic_speed_low: i64,
    /// Mbps.
    pub dynamic_speed_high: i64,
    pub blink_tx: i32,
    pub blink_rx: i32,
    /// Milliseconds.
    pub blink_interval: i32,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            interfaces: Vec::new(),
            color_normal: Rgb::new(255, 255, 255),
            color_gateway_unreachable: Rgb::new(255, 0, 0),
            color_link_purple_default: Rgb::new(128, 0, 128),
            color_link_100: None,
            color_link_1000: None,
            color_link_2000: None,
            color_link_2500: None,
            color_link_5000: None,
            color_link_10000: None,
            brightness_led: 255,
            check_interval: 60,
            check_gateway_connectivity: false,
            check_link_speed: false,
            check_link_speed_dynamic: false,
            dynamic_color_low: Rgb::new(255, 0, 0),
            dynamic_color_high: Rgb::new(0, 255, 0),
            dynamic_speed_low: 0,
            dynamic_speed_high: 10000,
            blink_tx: 1,
            blink_rx: 1,
            blink_interval: 200,
        }
    }
}

impl NetworkConfig {
    pub fn enabled(&self) -> bool {
        !self.interfaces.is_empty()
    }

    /// Whether any check needs the monitor to run at all.
    pub fn any_check_enabled(&self) -> bool {
        self.check_gateway_connectivity || self.check_link_speed || self.check_link_speed_dynamic
    }
}

/// Paths (or bare names resolved via `PATH`) of the external tools.
#[derive(Debug, Clone, Serialize)]
pub struct ToolPaths {
    pub smartctl: String,
    pub zpool: String,
    pub lsblk: String,
    pub dmidecode: String,
    pub ip: String,
    pub ping: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        ToolPaths {
            smartctl: "smartctl".into(),
            zpool: "zpool".into(),
            lsblk: "lsblk".into(),
            dmidecode: "dmidecode".into(),
            ip: "ip".into(),
            ping: "ping".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Config {
    pub disk: DiskConfig,
    pub network: NetworkConfig,
    pub tools: ToolPaths,
}

/// Validation errors that [`Config::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A brightness value outside 0–255.
    InvalidBrightness { field: &'static str, value: i32 },
    /// `MAPPING_METHOD` is not one of `ata`, `hctl`, `serial`.
    InvalidMappingMethod(String),
    /// Serial mapping selected without any serial numbers.
    MissingSerials,
    /// Dynamic link-speed color enabled with equal low/high thresholds.
    DegenerateGradient(i64),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidBrightness { field, value } => {
                write!(f, "Invalid {field}: {value} (expected 0-255)")
            }
            ValidationError::InvalidMappingMethod(m) => {
                write!(f, "Invalid MAPPING_METHOD: {m} (expected ata, hctl or serial)")
            }
            ValidationError::MissingSerials => {
                write!(f, "MAPPING_METHOD=serial requires DISK_SERIAL")
            }
            ValidationError::DegenerateGradient(speed) => write!(
                f,
                "CHECK_LINK_SPEED_DYNAMIC thresholds are both {speed}, falling back to the normal color"
            ),
        }
    }
}

// ── Parsing ──

/// Split a shell-variable file into `KEY → VALUE`. Later assignments win.
pub fn parse_vars(text: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        vars.insert(key.trim().to_string(), unquote(value.trim()).to_string());
    }
    vars
}

fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Typed accessors over the parsed variables, collecting warnings for
/// values that fail to parse.
struct Vars {
    map: HashMap<String, String>,
    warnings: Vec<String>,
}

impl Vars {
    fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    fn bool(&self, key: &str, target: &mut bool) {
        if let Some(v) = self.get(key) {
            *target = v == "true";
        }
    }

    fn string(&self, key: &str, target: &mut String) {
        if let Some(v) = self.get(key) {
            *target = v.to_string();
        }
    }

    fn list(&self, key: &str, target: &mut Vec<String>) {
        if let Some(v) = self.get(key) {
            *target = v.split_whitespace().map(str::to_string).collect();
        }
    }

    fn rgb(&self, key: &str, target: &mut Rgb) {
        if let Some(v) = self.get(key) {
            *target = parse_rgb(v);
        }
    }

    fn opt_rgb(&self, key: &str, target: &mut Option<Rgb>) {
        if let Some(v) = self.get(key) {
            *target = Some(parse_rgb(v));
        }
    }

    fn num<T: std::str::FromStr>(&mut self, key: &str, target: &mut T) {
        let Some(v) = self.get(key) else {
            return;
        };
        match v.parse() {
            Ok(n) => *target = n,
            Err(_) => {
                let warning = format!("{key}: cannot parse \"{v}\" as a number, using default");
                self.warnings.push(warning);
            }
        }
    }
}

impl Config {
    /// Parse configuration text, returning the config and any parse warnings.
    pub fn parse(text: &str) -> (Self, Vec<String>) {
        let mut vars = Vars {
            map: parse_vars(text),
            warnings: Vec::new(),
        };
        let mut cfg = Config::default();

        let d = &mut cfg.disk;
        vars.bool("DISK_MONITOR_ENABLE", &mut d.enable);
        vars.string("MAPPING_METHOD", &mut d.mapping_method);
        vars.list("DISK_SERIAL", &mut d.disk_serial);
        vars.bool("CHECK_SMART", &mut d.check_smart);
        vars.num("CHECK_SMART_INTERVAL", &mut d.check_smart_interval);
        vars.num("LED_REFRESH_INTERVAL", &mut d.led_refresh_interval);
        vars.bool("CHECK_ZPOOL", &mut d.check_zpool);
        vars.num("CHECK_ZPOOL_INTERVAL", &mut d.check_zpool_interval);
        vars.bool("DEBUG_ZPOOL", &mut d.debug_zpool);
        vars.num(
            "CHECK_DISK_ONLINE_INTERVAL",
            &mut d.check_disk_online_interval,
        );
        vars.rgb("COLOR_DISK_HEALTH", &mut d.color_disk_health);
        vars.rgb("COLOR_DISK_UNAVAIL", &mut d.color_disk_unavail);
        vars.rgb("COLOR_DISK_STANDBY", &mut d.color_disk_standby);
        vars.rgb("COLOR_ZPOOL_FAIL", &mut d.color_zpool_fail);
        vars.rgb("COLOR_SMART_FAIL", &mut d.color_smart_fail);
        vars.num("BRIGHTNESS_DISK_LEDS", &mut d.brightness_disk_leds);

        let n = &mut cfg.network;
        vars.list("NETWORK_INTERFACES", &mut n.interfaces);
        vars.rgb("COLOR_NETDEV_NORMAL", &mut n.color_normal);
        vars.rgb(
            "COLOR_NETDEV_GATEWAY_UNREACHABLE",
            &mut n.color_gateway_unreachable,
        );
        vars.rgb(
            "COLOR_NETDEV_LINK_PURPLE_DEFAULT",
            &mut n.color_link_purple_default,
        );
        vars.opt_rgb("COLOR_NETDEV_LINK_100", &mut n.color_link_100);
        vars.opt_rgb("COLOR_NETDEV_LINK_1000", &mut n.color_link_1000);
        vars.opt_rgb("COLOR_NETDEV_LINK_2000", &mut n.color_link_2000);
        vars.opt_rgb("COLOR_NETDEV_LINK_2500", &mut n.color_link_2500);
        vars.opt_rgb("COLOR_NETDEV_LINK_5000", &mut n.color_link_5000);
        vars.opt_rgb("COLOR_NETDEV_LINK_10000", &mut n.color_link_10000);
        vars.num("BRIGHTNESS_NETDEV_LED", &mut n.brightness_led);
        vars.num("CHECK_NETDEV_INTERVAL", &mut n.check_interval);
        vars.bool(
            "CHECK_GATEWAY_CONNECTIVITY",
            &mut n.check_gateway_connectivity,
        );
        vars.bool("CHECK_LINK_SPEED", &mut n.check_link_speed);
        vars.bool("CHECK_LINK_SPEED_DYNAMIC", &mut n.check_link_speed_dynamic);
        vars.rgb(
            "CHECK_LINK_SPEED_DYNAMIC_COLOR_LOW",
            &mut n.dynamic_color_low,
        );
        vars.rgb(
            "CHECK_LINK_SPEED_DYNAMIC_COLOR_HIGH",
            &mut n.dynamic_color_high,
        );
        vars.num(
            "CHECK_LINK_SPEED_DYNAMIC_SPEED_LOW",
            &mut n.dynamic_speed_low,
        );
        vars.num(
            "CHECK_LINK_SPEED_DYNAMIC_SPEED_HIGH",
            &mut n.dynamic_speed_high,
        );
        vars.num("NETDEV_BLINK_TX", &mut n.blink_tx);
        vars.num("NETDEV_BLINK_RX", &mut n.blink_rx);
        vars.num("NETDEV_BLINK_INTERVAL", &mut n.blink_interval);

        let t = &mut cfg.tools;
        vars.string("SMARTCTL_PATH", &mut t.smartctl);
        vars.string("ZPOOL_PATH", &mut t.zpool);
        vars.string("LSBLK_PATH", &mut t.lsblk);
        vars.string("DMIDECODE_PATH", &mut t.dmidecode);
        vars.string("IP_PATH", &mut t.ip);
        vars.string("PING_PATH", &mut t.ping);

        (cfg, vars.warnings)
    }

    /// Load config from an arbitrary path, returning the config and any warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be read.
    /// An empty `DISK_SERIAL` falls back to the environment variable of the same name.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        let (mut config, warnings) = match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => (Self::default(), vec![]),
            Err(e) => {
                let warning = format!(
                    "cannot read config file ({}), using defaults: {e}",
                    path.display()
                );
                (Self::default(), vec![warning])
            }
        };
        if config.disk.disk_serial.is_empty()
            && let Ok(env) = std::env::var(DISK_SERIAL_ENV)
        {
            config.disk.disk_serial = env.split_whitespace().map(str::to_string).collect();
        }
        (config, warnings)
    }

    /// Load config from a path, logging warnings.
    pub fn load(path: &Path) -> Self {
        let (config, warnings) = Self::load_from(path);
        for w in &warnings {
            log::warn!("{w}");
        }
        config
    }

    /// Validate the entire config, collecting all errors.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("BRIGHTNESS_DISK_LEDS", self.disk.brightness_disk_leds),
            ("BRIGHTNESS_NETDEV_LED", self.network.brightness_led),
        ] {
            if !(0..=255).contains(&value) {
                errors.push(ValidationError::InvalidBrightness { field, value });
            }
        }

        if self.disk.enable {
            match self.disk.mapping_method.parse::<MappingMethod>() {
                Ok(MappingMethod::Serial) if self.disk.disk_serial.is_empty() => {
                    errors.push(ValidationError::MissingSerials);
                }
                Ok(_) => {}
                Err(_) => errors.push(ValidationError::InvalidMappingMethod(
                    self.disk.mapping_method.clone(),
                )),
            }
        }

        let n = &self.network;
        if n.enabled() && n.check_link_speed_dynamic && n.dynamic_speed_low == n.dynamic_speed_high
        {
            errors.push(ValidationError::DegenerateGradient(n.dynamic_speed_low));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse_vars ──

    #[test]
    fn vars_skip_comments_and_blank_lines() {
        let vars = parse_vars("# comment\n\n  # indented comment\nA=1\n\nB=2\n");
        assert_eq!(vars.len(), 2);
        assert_eq!(vars["A"], "1");
        assert_eq!(vars["B"], "2");
    }

    #[test]
    fn vars_strip_matching_quotes() {
        let vars = parse_vars("A=\"255 0 0\"\nB='x y'\nC=\"unbalanced'\n");
        assert_eq!(vars["A"], "255 0 0");
        assert_eq!(vars["B"], "x y");
        assert_eq!(vars["C"], "\"unbalanced'");
    }

    #[test]
    fn vars_ignore_lines_without_equals() {
        let vars = parse_vars("export\nA=1\n");
        assert_eq!(vars.len(), 1);
    }

    #[test]
    fn vars_split_on_first_equals() {
        let vars = parse_vars("A = b=c\n");
        assert_eq!(vars["A"], "b=c");
    }

    #[test]
    fn vars_later_assignment_wins() {
        let vars = parse_vars("A=1\nA=2\n");
        assert_eq!(vars["A"], "2");
    }

    // ── Config defaults ──

    #[test]
    fn defaults() {
        let c = Config::default();
        assert!(c.disk.enable);
        assert_eq!(c.disk.mapping_method, "ata");
        assert!(c.disk.check_smart);
        assert_eq!(c.disk.check_smart_interval, 360);
        assert_eq!(c.disk.led_refresh_interval, 0.1);
        assert!(!c.disk.check_zpool);
        assert_eq!(c.disk.check_zpool_interval, 5);
        assert_eq!(c.disk.check_disk_online_interval, 5);
        assert_eq!(c.disk.color_disk_standby, Rgb::new(0, 0, 255));
        assert_eq!(c.disk.brightness_disk_leds, 255);
        assert!(!c.network.enabled());
        assert_eq!(c.network.check_interval, 60);
        assert_eq!(c.network.color_link_purple_default, Rgb::new(128, 0, 128));
        assert_eq!(c.network.color_link_100, None);
        assert_eq!(c.network.dynamic_speed_high, 10000);
        assert_eq!(c.network.blink_interval, 200);
        assert_eq!(c.tools.smartctl, "smartctl");
    }

    #[test]
    fn empty_text_gives_defaults() {
        let (c, warnings) = Config::parse("");
        assert!(warnings.is_empty());
        assert_eq!(c.disk.mapping_method, "ata");
        assert!(c.network.interfaces.is_empty());
    }

    // ── Config::parse ──

    #[test]
    fn parse_full_file() {
        let text = r#"
# disk
MAPPING_METHOD=hctl
CHECK_SMART_INTERVAL=60
LED_REFRESH_INTERVAL=0.25
CHECK_ZPOOL=true
COLOR_DISK_HEALTH="0 255 0"
BRIGHTNESS_DISK_LEDS=64
# network
NETWORK_INTERFACES="eth0 eth1"
CHECK_LINK_SPEED=true
COLOR_NETDEV_LINK_1000='0 0 255'
CHECK_NETDEV_INTERVAL=10
SMARTCTL_PATH=/usr/sbin/smartctl
"#;
        let (c, warnings) = Config::parse(text);
        assert!(warnings.is_empty());
        assert_eq!(c.disk.mapping_method, "hctl");
        assert_eq!(c.disk.check_smart_interval, 60);
        assert_eq!(c.disk.led_refresh_interval, 0.25);
        assert!(c.disk.check_zpool);
        assert_eq!(c.disk.color_disk_health, Rgb::new(0, 255, 0));
        assert_eq!(c.disk.brightness_disk_leds, 64);
        assert_eq!(c.network.interfaces, vec!["eth0", "eth1"]);
        assert!(c.network.enabled());
        assert!(c.network.check_link_speed);
        assert_eq!(c.network.color_link_1000, Some(Rgb::new(0, 0, 255)));
        assert_eq!(c.network.color_link_2500, None);
        assert_eq!(c.network.check_interval, 10);
        assert_eq!(c.tools.smartctl, "/usr/sbin/smartctl");
    }

    #[test]
    fn bool_is_true_only_for_literal_true() {
        let (c, _) = Config::parse("CHECK_SMART=yes\nCHECK_ZPOOL=true\nDEBUG_ZPOOL=TRUE\n");
        assert!(!c.disk.check_smart);
        assert!(c.disk.check_zpool);
        assert!(!c.disk.debug_zpool);
    }

    #[test]
    fn empty_value_keeps_default() {
        let (c, _) = Config::parse("MAPPING_METHOD=\nCHECK_SMART=\"\"\n");
        assert_eq!(c.disk.mapping_method, "ata");
        assert!(c.disk.check_smart);
    }

    #[test]
    fn bad_number_warns_and_keeps_default() {
        let (c, warnings) = Config::parse("CHECK_SMART_INTERVAL=soon\nLED_REFRESH_INTERVAL=x\n");
        assert_eq!(c.disk.check_smart_interval, 360);
        assert_eq!(c.disk.led_refresh_interval, 0.1);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("CHECK_SMART_INTERVAL"));
    }

    #[test]
    fn negative_interval_is_accepted_verbatim() {
        let (c, warnings) = Config::parse("CHECK_ZPOOL_INTERVAL=-3\n");
        assert!(warnings.is_empty());
        assert_eq!(c.disk.check_zpool_interval, -3);
    }

    #[test]
    fn malformed_color_is_white() {
        let (c, _) = Config::parse("COLOR_SMART_FAIL=\"255 0\"\n");
        assert_eq!(c.disk.color_smart_fail, Rgb::new(255, 255, 255));
    }

    #[test]
    fn serial_list_from_file() {
        let (c, _) = Config::parse("MAPPING_METHOD=serial\nDISK_SERIAL=\"WD-A  WD-B\"\n");
        assert_eq!(c.disk.disk_serial, vec!["WD-A", "WD-B"]);
    }

    // ── load_from ──

    #[test]
    fn load_missing_file_is_defaults_without_warning() {
        let dir = tempfile::tempdir().unwrap();
        let (c, warnings) = Config::load_from(&dir.path().join("nope.conf"));
        assert!(warnings.is_empty());
        assert_eq!(c.disk.mapping_method, "ata");
    }

    #[test]
    fn load_unreadable_path_warns() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be read as a file.
        let (c, warnings) = Config::load_from(dir.path());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("using defaults"));
        assert!(c.disk.enable);
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ugreen-leds.conf");
        std::fs::write(&path, "DISK_MONITOR_ENABLE=false\nNETWORK_INTERFACES=enp2s0\n").unwrap();
        let (c, warnings) = Config::load_from(&path);
        assert!(warnings.is_empty());
        assert!(!c.disk.enable);
        assert_eq!(c.network.interfaces, vec!["enp2s0"]);
    }

    // ── validate ──

    #[test]
    fn validate_defaults_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_collects_all_errors() {
        let (c, _) = Config::parse(
            "BRIGHTNESS_DISK_LEDS=300\nBRIGHTNESS_NETDEV_LED=-1\nMAPPING_METHOD=usb\n",
        );
        let errors = c.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::InvalidBrightness {
            field: "BRIGHTNESS_DISK_LEDS",
            value: 300
        }));
        assert!(errors.contains(&ValidationError::InvalidMappingMethod("usb".into())));
    }

    #[test]
    fn validate_serial_without_serials() {
        let mut c = Config::default();
        c.disk.mapping_method = "serial".into();
        c.disk.disk_serial.clear();
        assert_eq!(c.validate(), Err(vec![ValidationError::MissingSerials]));
    }

    #[test]
    fn validate_mapping_ignored_when_disk_monitor_disabled() {
        let (c, _) = Config::parse("DISK_MONITOR_ENABLE=false\nMAPPING_METHOD=usb\n");
        assert!(c.validate().is_ok());
    }

    #[test]
    fn validate_degenerate_gradient() {
        let (c, _) = Config::parse(
            "NETWORK_INTERFACES=eth0\nCHECK_LINK_SPEED_DYNAMIC=true\n\
             CHECK_LINK_SPEED_DYNAMIC_SPEED_LOW=1000\nCHECK_LINK_SPEED_DYNAMIC_SPEED_HIGH=1000\n",
        );
        assert_eq!(
            c.validate(),
            Err(vec![ValidationError::DegenerateGradient(1000)])
        );
    }

    #[test]
    fn validation_error_display() {
        assert_eq!(
            ValidationError::MissingSerials.to_string(),
            "MAPPING_METHOD=serial requires DISK_SERIAL"
        );
        assert_eq!(
            ValidationError::InvalidBrightness {
                field: "BRIGHTNESS_NETDEV_LED",
                value: 999
            }
            .to_string(),
            "Invalid BRIGHTNESS_NETDEV_LED: 999 (expected 0-255)"
        );
    }

    // ── Serialization ──

    #[test]
    fn serializes_colors_as_strings() {
        let json = serde_json::to_value(Config::default()).unwrap();
        assert_eq!(json["disk"]["color_disk_health"], "255 255 255");
        assert!(json["network"]["color_link_100"].is_null());
        assert_eq!(json["tools"]["zpool"], "zpool");
    }
}
