//! Best-effort system queries: battery, Wi-Fi, hardware specs.
//!
//! Relies on OS commands and proc files where available; absence of a
//! datapoint is an ordinary answer ("No battery detected."), not an error.

use crate::provider_trait::ActionProvider;
use async_trait::async_trait;
use std::process::Command;
use voxdesk_core::ActionError;

fn run_cmd(args: &[&str]) -> Option<String> {
    let (program, rest) = args.split_first()?;
    let out = Command::new(program).args(rest).output().ok()?;
    if !out.status.success() {
        return None;
    }
    let s = String::from_utf8(out.stdout).ok()?;
    let trimmed = s.trim().to_owned();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

pub struct BatteryProvider;

fn battery_status() -> Option<String> {
    if cfg!(target_os = "linux") {
        let supplies = std::fs::read_dir("/sys/class/power_supply").ok()?;
        for entry in supplies.flatten() {
            if !entry.file_name().to_string_lossy().starts_with("BAT") {
                continue;
            }
            let capacity = std::fs::read_to_string(entry.path().join("capacity")).ok()?;
            let status = std::fs::read_to_string(entry.path().join("status"))
                .unwrap_or_else(|_| "Unknown".to_string());
            return Some(format!(
                "Battery at {}% ({}).",
                capacity.trim(),
                status.trim().to_lowercase()
            ));
        }
        return None;
    }
    if cfg!(target_os = "macos") {
        let out = run_cmd(&["pmset", "-g", "batt"])?;
        let line = out.lines().find(|l| l.contains('%'))?;
        let percent = line.split('%').next()?.split_whitespace().last()?;
        let state = if line.contains("discharging") {
            "discharging"
        } else if line.contains("charging") {
            "charging"
        } else {
            "charged"
        };
        return Some(format!("Battery at {percent}% ({state})."));
    }
    if cfg!(target_os = "windows") {
        let out = run_cmd(&[
            "wmic",
            "path",
            "Win32_Battery",
            "get",
            "EstimatedChargeRemaining",
            "/value",
        ])?;
        let percent = out
            .lines()
            .find_map(|l| l.trim().strip_prefix("EstimatedChargeRemaining="))?;
        return Some(format!("Battery at {percent}%."));
    }
    None
}

#[async_trait]
impl ActionProvider for BatteryProvider {
    fn name(&self) -> &str {
        "battery"
    }

    async fn perform(&self, _param: Option<&str>) -> Result<String, ActionError> {
        Ok(battery_status().unwrap_or_else(|| "No battery detected.".to_string()))
    }
}

pub struct WifiProvider;

fn wifi_name() -> Option<String> {
    if cfg!(target_os = "linux") {
        if let Some(ssid) = run_cmd(&["iwgetid", "-r"]) {
            return Some(ssid);
        }
        let out = run_cmd(&["nmcli", "-t", "-f", "active,ssid", "dev", "wifi"])?;
        return out
            .lines()
            .find_map(|l| l.strip_prefix("yes:"))
            .map(|s| s.to_string());
    }
    if cfg!(target_os = "macos") {
        let out = run_cmd(&["networksetup", "-getairportnetwork", "en0"])?;
        return out
            .strip_prefix("Current Wi-Fi Network: ")
            .map(|s| s.trim().to_string());
    }
    if cfg!(target_os = "windows") {
        let out = run_cmd(&["netsh", "wlan", "show", "interfaces"])?;
        return out.lines().find_map(|l| {
            let l = l.trim();
            if l.starts_with("SSID") && !l.starts_with("SSID B") {
                l.split_once(':').map(|(_, v)| v.trim().to_string())
            } else {
                None
            }
        });
    }
    None
}

#[async_trait]
impl ActionProvider for WifiProvider {
    fn name(&self) -> &str {
        "wifi"
    }

    async fn perform(&self, _param: Option<&str>) -> Result<String, ActionError> {
        Ok(match wifi_name() {
            Some(ssid) => format!("Connected to Wi-Fi network '{ssid}'."),
            None => "Not connected to any Wi-Fi network.".to_string(),
        })
    }
}

pub struct SpecsProvider;

fn cpu_model() -> Option<String> {
    if cfg!(target_os = "macos") {
        return run_cmd(&["sysctl", "-n", "machdep.cpu.brand_string"]);
    }
    if cfg!(target_os = "linux") {
        let content = std::fs::read_to_string("/proc/cpuinfo").ok()?;
        for line in content.lines() {
            if let Some(rest) = line.strip_prefix("model name") {
                if let Some((_, v)) = rest.split_once(':') {
                    let v = v.trim();
                    if !v.is_empty() {
                        return Some(v.to_string());
                    }
                }
            }
        }
    }
    if cfg!(target_os = "windows") {
        let out = run_cmd(&["wmic", "cpu", "get", "Name", "/value"])?;
        return out
            .lines()
            .find_map(|l| l.trim().strip_prefix("Name="))
            .map(|s| s.to_string());
    }
    None
}

fn total_memory_bytes() -> Option<u64> {
    if cfg!(target_os = "macos") {
        return run_cmd(&["sysctl", "-n", "hw.memsize"])?.parse::<u64>().ok();
    }
    if cfg!(target_os = "linux") {
        let content = std::fs::read_to_string("/proc/meminfo").ok()?;
        for line in content.lines() {
            if let Some(rest) = line.strip_prefix("MemTotal:") {
                let kb = rest.split_whitespace().next()?.parse::<u64>().ok()?;
                return Some(kb.saturating_mul(1024));
            }
        }
    }
    None
}

#[async_trait]
impl ActionProvider for SpecsProvider {
    fn name(&self) -> &str {
        "specs"
    }

    async fn perform(&self, _param: Option<&str>) -> Result<String, ActionError> {
        let cpu = cpu_model().unwrap_or_else(|| "unknown CPU".to_string());
        let memory = total_memory_bytes()
            .map(|b| format!("{:.1} GB", b as f64 / 1e9))
            .unwrap_or_else(|| "unknown memory".to_string());
        Ok(format!(
            "Running {} ({}); CPU: {}; Memory: {}.",
            std::env::consts::OS,
            std::env::consts::ARCH,
            cpu,
            memory
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_battery_provider_always_answers() {
        let response = BatteryProvider.perform(None).await.unwrap();
        assert!(response.contains("Battery at") || response == "No battery detected.");
    }

    #[tokio::test]
    async fn test_wifi_provider_always_answers() {
        let response = WifiProvider.perform(None).await.unwrap();
        assert!(
            response.starts_with("Connected to Wi-Fi network")
                || response == "Not connected to any Wi-Fi network."
        );
    }

    #[tokio::test]
    async fn test_specs_provider_reports_current_os() {
        let response = SpecsProvider.perform(None).await.unwrap();
        assert!(response.contains(std::env::consts::OS));
        assert!(response.contains(std::env::consts::ARCH));
    }

    #[test]
    fn test_run_cmd_missing_program_is_none() {
        assert!(run_cmd(&["definitely-not-a-real-binary-xyz"]).is_none());
    }
}
