//! Production probe: reads sysfs and shells out to system tools.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::{DiskProbe, NetProbe, ProbeError, Result};
use crate::config::ToolPaths;

pub const SYSFS_ROOT: &str = "/sys";

#[derive(Debug, Clone)]
pub struct SystemProbe {
    tools: ToolPaths,
    sysfs: PathBuf,
}

impl SystemProbe {
    pub fn new(tools: ToolPaths) -> Self {
        Self::with_sysfs(tools, SYSFS_ROOT)
    }

    /// Probe with a custom sysfs root (tests, chroots).
    pub fn with_sysfs(tools: ToolPaths, sysfs: impl Into<PathBuf>) -> Self {
        SystemProbe {
            tools,
            sysfs: sysfs.into(),
        }
    }

    fn sys_block(&self) -> PathBuf {
        self.sysfs.join("block")
    }

    fn class_block(&self, device: &str) -> PathBuf {
        self.sysfs.join("class/block").join(device)
    }
}

/// Run a tool and return its stdout. Non-zero exit is an error.
fn run_tool(program: &str, args: &[&str]) -> Result<String> {
    let out = Command::new(program)
        .args(args)
        .stderr(Stdio::null())
        .output()
        .map_err(|e| ProbeError::ToolFailed(format!("{program}: {e}")))?;
    if !out.status.success() {
        return Err(ProbeError::ToolFailed(format!("{program}: {}", out.status)));
    }
    Ok(String::from_utf8_lossy(&out.stdout).into_owned())
}

fn read_path(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| ProbeError::ReadFailed(format!("{}: {e}", path.display())))
}

impl DiskProbe for SystemProbe {
    fn block_links(&self) -> Result<Vec<(String, String)>> {
        let dir = self.sys_block();
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| ProbeError::ReadFailed(format!("{}: {e}", dir.display())))?;
        let mut links = Vec::new();
        for entry in entries.flatten() {
            let Ok(target) = std::fs::read_link(entry.path()) else {
                continue;
            };
            links.push((
                entry.file_name().to_string_lossy().into_owned(),
                target.to_string_lossy().into_owned(),
            ));
        }
        links.sort();
        Ok(links)
    }

    fn scsi_listing(&self, column: &str) -> Result<String> {
        let columns = format!("name,{column},tran");
        run_tool(&self.tools.lsblk, &["-S", "-o", &columns])
    }

    fn product_name(&self) -> Option<String> {
        run_tool(&self.tools.dmidecode, &["--string", "system-product-name"])
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn smart_health(&self, device: &str) -> Result<i32> {
        let dev_path = format!("/dev/{device}");
        let status = Command::new(&self.tools.smartctl)
            .args(["-H", &dev_path, "-n", "standby,0"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| ProbeError::ToolFailed(format!("{}: {e}", self.tools.smartctl)))?;
        Ok(status.code().unwrap_or(-1))
    }

    fn pool_status(&self) -> Result<String> {
        run_tool(&self.tools.zpool, &["status", "-L"])
    }

    fn dm_slaves(&self, dm: &str) -> Result<Vec<String>> {
        let dir = self.sys_block().join(dm).join("slaves");
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| ProbeError::ReadFailed(format!("{}: {e}", dir.display())))?;
        let mut slaves: Vec<String> = entries
            .flatten()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        slaves.sort();
        Ok(slaves)
    }

    fn block_stat(&self, device: &str) -> Result<String> {
        read_path(&self.class_block(device).join("stat"))
    }

    fn device_present(&self, device: &str) -> bool {
        self.class_block(device).join("stat").exists()
    }
}

impl NetProbe for SystemProbe {
    fn link_speed(&self, iface: &str) -> Result<i64> {
        let path = self.sysfs.join("class/net").join(iface).join("speed");
        let text = read_path(&path)?;
        text.trim()
            .parse()
            .map_err(|_| ProbeError::Parse(format!("{}: {:?}", path.display(), text.trim())))
    }

    fn routes(&self) -> Result<String> {
        run_tool(&self.tools.ip, &["route"])
    }

    fn ping(&self, addr: &str) -> bool {
        Command::new(&self.tools.ping)
            .args(["-q", "-c", "1", "-W", "1", addr])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|s| s.success())
    }
}
