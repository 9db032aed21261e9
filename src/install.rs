//! Desktop install affordance: when the app could integrate with the
//! desktop but has not yet, a deferred install signal is captured at
//! startup and an install control revealed. Triggering it replays the
//! signal once (writes the launcher entry), then the signal is cleared.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

const DESKTOP_FILE: &str = "slate.desktop";

/// A captured, deferred install signal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPrompt {
    desktop_file: PathBuf,
    exec: PathBuf,
}

/// Capture the install signal for this session, if any: the launcher
/// entry does not exist yet and the executable path is known.
pub fn capture_install_signal() -> Option<InstallPrompt> {
    let applications_dir = dirs::data_dir()?.join("applications");
    let exec = std::env::current_exe().ok()?;
    capture_at(&applications_dir, &exec)
}

pub fn capture_at(applications_dir: &Path, exec: &Path) -> Option<InstallPrompt> {
    let desktop_file = applications_dir.join(DESKTOP_FILE);
    if desktop_file.exists() {
        debug!(file = %desktop_file.display(), "already installed, no install signal");
        return None;
    }
    Some(InstallPrompt {
        desktop_file,
        exec: exec.to_path_buf(),
    })
}

impl InstallPrompt {
    /// Replay the deferred signal: write the launcher entry
    pub fn prompt(&self) -> io::Result<PathBuf> {
        if let Some(dir) = self.desktop_file.parent() {
            fs::create_dir_all(dir)?;
        }
        let entry = format!(
            "[Desktop Entry]\n\
             Type=Application\n\
             Name=Slate\n\
             Comment=Task list with day buckets\n\
             Exec={}\n\
             Terminal=true\n\
             Categories=Utility;\n",
            self.exec.display()
        );
        fs::write(&self.desktop_file, entry)?;
        info!(file = %self.desktop_file.display(), "installed launcher entry");
        Ok(self.desktop_file.clone())
    }
}
