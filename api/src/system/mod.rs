//! Desktop integration
//!
//! The tray icon, the browser opener and the process-wide shutdown
//! handle. None of this is required for the HTTP API to work: every
//! failure here is logged and the server keeps running.

use std::sync::Arc;

pub mod browser;
#[cfg(all(
    feature = "desktop-tray",
    any(target_os = "linux", target_os = "windows")
))]
pub mod desktop_tray;
pub mod shutdown;
pub mod tray;

pub use browser::{Browser, SystemBrowser};
pub use shutdown::{listen_for_signals, Shutdown};
pub use tray::{HeadlessTray, TrayLauncher};

/// The tray backend for this build: native when compiled with the
/// `desktop-tray` feature on a supported OS, headless otherwise
pub fn native_tray() -> Arc<dyn tray::SystemTray> {
    #[cfg(all(
        feature = "desktop-tray",
        any(target_os = "linux", target_os = "windows")
    ))]
    {
        Arc::new(desktop_tray::DesktopTray::new())
    }
    #[cfg(not(all(
        feature = "desktop-tray",
        any(target_os = "linux", target_os = "windows")
    )))]
    {
        Arc::new(HeadlessTray)
    }
}

#[cfg(test)]
mod tests {
    use super::tray::SystemTray;
    use super::*;

    #[cfg(not(feature = "desktop-tray"))]
    #[test]
    fn builds_without_desktop_support_use_the_headless_tray() {
        assert!(!native_tray().is_supported());
    }
}
