use crate::provider_trait::ActionProvider;
use async_trait::async_trait;
use chrono::Local;
use std::path::{Path, PathBuf};
use std::process::Command;
use voxdesk_core::ActionError;

/// Captures the screen with the platform tool and writes a timestamped PNG
/// into the configured directory.
pub struct ScreenshotProvider {
    dir: PathBuf,
}

impl ScreenshotProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

fn capture(path: &Path) -> Result<(), ActionError> {
    let target = path.to_string_lossy();

    let candidates: Vec<Vec<String>> = if cfg!(target_os = "macos") {
        vec![vec![
            "screencapture".to_string(),
            "-x".to_string(),
            target.to_string(),
        ]]
    } else if cfg!(target_os = "windows") {
        let script = format!(
            "Add-Type -AssemblyName System.Windows.Forms,System.Drawing; \
             $b=[System.Windows.Forms.SystemInformation]::VirtualScreen; \
             $bmp=New-Object Drawing.Bitmap $b.Width,$b.Height; \
             [Drawing.Graphics]::FromImage($bmp).CopyFromScreen($b.X,$b.Y,0,0,$bmp.Size); \
             $bmp.Save('{target}')"
        );
        vec![vec![
            "powershell".to_string(),
            "-NoProfile".to_string(),
            "-Command".to_string(),
            script,
        ]]
    } else {
        vec![
            vec![
                "gnome-screenshot".to_string(),
                "-f".to_string(),
                target.to_string(),
            ],
            vec![
                "import".to_string(),
                "-window".to_string(),
                "root".to_string(),
                target.to_string(),
            ],
            vec!["grim".to_string(), target.to_string()],
        ]
    };

    for candidate in &candidates {
        let (program, args) = candidate.split_first().expect("candidate is never empty");
        if let Ok(status) = Command::new(program).args(args).status() {
            if status.success() && path.exists() {
                return Ok(());
            }
        }
    }

    Err(ActionError::SystemQuery(
        "no screenshot tool available".to_string(),
    ))
}

#[async_trait]
impl ActionProvider for ScreenshotProvider {
    fn name(&self) -> &str {
        "screenshot"
    }

    async fn perform(&self, _param: Option<&str>) -> Result<String, ActionError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| ActionError::SystemQuery(format!("screenshot dir: {e}")))?;

        let filename = format!("screenshot-{}.png", Local::now().format("%Y%m%d-%H%M%S"));
        let path = self.dir.join(filename);
        capture(&path)?;
        Ok(format!("Screenshot saved to {}.", path.display()))
    }
}
