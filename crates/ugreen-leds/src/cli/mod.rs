//! CLI subcommands — run the service, inspect configuration, mapping and LEDs.

mod config_cmd;
mod map;
mod run;
mod status;

use std::path::{Path, PathBuf};

use clap::Subcommand;
use serde::Serialize;

pub(super) use ugreen_leds_lib::config::Config;
pub(super) use ugreen_leds_lib::disk::{DiskMapping, PoolBinding};
pub(super) use ugreen_leds_lib::error::{Result, UgreenError};

const PADDING: usize = 2;

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn format_kv(key: &str, value: impl std::fmt::Display, w: usize) -> String {
    format!("{key:<width$}{value}", width = w)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{}", format_kv(key, value, w));
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {}", format_kv(key, value, w - 2));
}

pub(super) fn print_json(value: &impl Serialize) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| UgreenError::Config(format!("JSON serialization failed: {e}")))?;
    println!("{text}");
    Ok(())
}

/// Load config from `path`, logging parse warnings.
pub(super) fn load_config(path: &Path) -> Config {
    Config::load(path)
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: String,
    pub config_file_exists: bool,
    pub settings: Config,
    pub problems: Vec<String>,
}

#[derive(Serialize)]
pub(super) struct MapOutput {
    pub disks: DiskMapping,
    /// `None` when pool checking is disabled.
    pub pool: Option<Vec<PoolBinding>>,
}

#[derive(Serialize)]
pub(super) struct LedStatusJson {
    pub led: String,
    pub present: bool,
    pub trigger: Option<String>,
    pub color: Option<String>,
    pub brightness: Option<String>,
    /// Disk LEDs only: healthy, standby, fault, off or unknown.
    pub state: Option<String>,
}

#[derive(Serialize)]
pub(super) struct StatusOutput {
    pub version: String,
    pub leds_root: String,
    pub disks: Vec<LedStatusJson>,
    pub network: Vec<LedStatusJson>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the LED service until interrupted
    Run,

    /// Show the effective configuration
    Config,

    /// Resolve disk slots (and pool members) without touching any LED
    Map,

    /// Show the current state of the disk and network LEDs
    Status {
        /// LED class directory
        #[arg(long, value_name = "PATH", default_value = ugreen_leds_lib::led::SYSFS_LEDS_ROOT)]
        leds_root: PathBuf,
    },
}

/// Warn if `--json` was passed to a command that doesn't support it.
fn warn_json_unsupported(cmd_name: &str) {
    log::warn!("--json is not supported for `{cmd_name}` (ignored)");
}

pub fn run(cmd: Command, config_path: &Path, json: bool) -> Result<()> {
    match cmd {
        Command::Run => {
            if json {
                warn_json_unsupported("run");
            }
            run::cmd_run(config_path)
        }
        Command::Config => config_cmd::cmd_config(config_path, json),
        Command::Map => map::cmd_map(config_path, json),
        Command::Status { leds_root } => status::cmd_status(config_path, &leds_root, json),
    }
}

#[cfg(test)]
mod format_tests {
    use super::*;

    #[test]
    fn kv_width_top_only() {
        let w = kv_width(&["Short:", "Longer key:"], &[]);
        // "Longer key:" = 11 + PADDING = 13
        assert_eq!(w, 13);
    }

    #[test]
    fn kv_width_indent_drives_width() {
        let w = kv_width(&["A:"], &["Very long indent key:"]);
        // 21 + PADDING + 2 = 25
        assert_eq!(w, 25);
    }

    #[test]
    fn kv_width_empty_both() {
        assert_eq!(kv_width(&[], &[]), 0);
    }

    #[test]
    fn values_align_across_levels() {
        let w = kv_width(&["Config file:"], &["MAPPING_METHOD:"]);
        let top = format_kv("Config file:", "V", w);
        let indent = format!("  {}", format_kv("MAPPING_METHOD:", "V", w - 2));
        assert_eq!(top.find('V'), indent.find('V'));
    }

    #[test]
    fn format_kv_overlong_key_is_not_padded() {
        assert_eq!(format_kv("ExactWidth:", "val", 10), "ExactWidth:val");
        assert_eq!(format_kv("Key:", "value", 10), "Key:      value");
    }
}
