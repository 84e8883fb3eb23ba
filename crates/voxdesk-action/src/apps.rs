use crate::provider_trait::ActionProvider;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Command;
use voxdesk_core::apps::{self, Launch};
use voxdesk_core::ActionError;

/// Launches an application from the canonical table.
pub struct OpenAppProvider;

#[async_trait]
impl ActionProvider for OpenAppProvider {
    fn name(&self) -> &str {
        "open_app"
    }

    async fn perform(&self, param: Option<&str>) -> Result<String, ActionError> {
        let key = param.ok_or(ActionError::MissingParam)?;
        let entry = apps::by_key(key).ok_or_else(|| ActionError::UnknownApp(key.to_string()))?;

        match entry.launch {
            Launch::Programs(candidates) => spawn_first(candidates)?,
            Launch::Url(url) => open_with_platform_opener(url)?,
            Launch::UserDir(dir) => {
                let path = user_dir(dir)?;
                open_with_platform_opener(&path.to_string_lossy())?;
            }
        }

        tracing::debug!(app = %entry.key, "launched");
        Ok(format!("Opened {}.", entry.display))
    }
}

/// Terminates an application's processes. Whether anything was actually
/// running is reported in the response phrasing.
pub struct CloseAppProvider;

#[async_trait]
impl ActionProvider for CloseAppProvider {
    fn name(&self) -> &str {
        "close_app"
    }

    async fn perform(&self, param: Option<&str>) -> Result<String, ActionError> {
        let key = param.ok_or(ActionError::MissingParam)?;
        let entry = apps::by_key(key).ok_or_else(|| ActionError::UnknownApp(key.to_string()))?;

        let mut any_killed = false;
        for process in entry.process_names {
            if kill_process(process)? {
                any_killed = true;
            }
        }

        if any_killed {
            Ok(format!("Closed {}.", entry.display))
        } else {
            Ok(format!("{} was not running.", entry.display))
        }
    }
}

fn spawn_first(candidates: &[&str]) -> Result<(), ActionError> {
    for program in candidates {
        if Command::new(program).spawn().is_ok() {
            return Ok(());
        }
    }
    Err(ActionError::LaunchFailed(format!(
        "none of {candidates:?} could be started"
    )))
}

fn open_with_platform_opener(target: &str) -> Result<(), ActionError> {
    let result = if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", "start", "", target]).spawn()
    } else if cfg!(target_os = "macos") {
        Command::new("open").arg(target).spawn()
    } else {
        Command::new("xdg-open").arg(target).spawn()
    };
    result
        .map(|_| ())
        .map_err(|e| ActionError::LaunchFailed(format!("opener failed for {target}: {e}")))
}

fn user_dir(name: &str) -> Result<PathBuf, ActionError> {
    let dirs = directories::UserDirs::new()
        .ok_or_else(|| ActionError::SystemQuery("no home directory".to_string()))?;
    let path = match name {
        "Downloads" => dirs.download_dir().map(|p| p.to_path_buf()),
        "Documents" => dirs.document_dir().map(|p| p.to_path_buf()),
        _ => None,
    };
    Ok(path.unwrap_or_else(|| dirs.home_dir().join(name)))
}

/// `true` when a matching process existed and was signalled.
fn kill_process(process: &str) -> Result<bool, ActionError> {
    let output = if cfg!(target_os = "windows") {
        Command::new("taskkill").args(["/IM", process, "/F"]).output()
    } else {
        Command::new("pkill").args(["-f", process]).output()
    };
    match output {
        // Non-zero exit means no process matched.
        Ok(out) => Ok(out.status.success()),
        Err(e) => Err(ActionError::ProcessControl(format!("{process}: {e}"))),
    }
}
