//! Opening the application in the user's browser

use std::process::{Child, Command, Stdio};
use std::thread;

use crate::error::TrayError;

/// Opens a URI in a browser
pub trait Browser: Send + Sync {
    fn browse(&self, uri: &str) -> Result<(), TrayError>;
}

/// Delegates to the platform's default URL handler
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn browse(&self, uri: &str) -> Result<(), TrayError> {
        let child = opener(uri)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| TrayError::Browser(e.to_string()))?;
        reap(child);
        Ok(())
    }
}

/// Wait for the opener in the background so it never lingers as a zombie
fn reap(mut child: Child) {
    let spawned = thread::Builder::new()
        .name("browser-opener".to_string())
        .spawn(move || match child.wait() {
            Ok(status) if !status.success() => {
                tracing::error!("URL opener exited with {}", status)
            }
            Ok(_) => {}
            Err(e) => tracing::error!("Failed to wait for the URL opener: {}", e),
        });
    if let Err(e) = spawned {
        tracing::warn!("Could not watch the URL opener: {}", e);
    }
}

#[cfg(target_os = "windows")]
fn opener(uri: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "", uri]);
    command
}

#[cfg(target_os = "macos")]
fn opener(uri: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(uri);
    command
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn opener(uri: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(uri);
    command
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    #[cfg(target_os = "linux")]
    #[test]
    fn finished_openers_are_reaped() {
        let child = Command::new("true").spawn().unwrap();
        let pid = child.id();
        reap(child);

        // A zombie keeps its /proc entry until its parent waits for it
        let deadline = Instant::now() + Duration::from_secs(5);
        while std::path::Path::new(&format!("/proc/{}", pid)).exists() {
            assert!(Instant::now() < deadline, "opener {} was never reaped", pid);
            std::thread::sleep(Duration::from_millis(20));
        }
    }

    #[test]
    fn opener_passes_the_uri_last() {
        let command = opener("http://127.0.0.1:8080");
        let last = command.get_args().last().and_then(|a| a.to_str());
        assert_eq!(last, Some("http://127.0.0.1:8080"));
    }
}
