//! System tray launcher
//!
//! Puts an icon in the desktop tray once the server is up. Activating the
//! icon opens the application in the default browser; its single menu
//! entry exits the process. Platforms without a tray only get a warning.

use std::path::PathBuf;
use std::sync::Arc;

use axum::http::Uri;
use tokio::sync::mpsc;

use super::{Browser, Shutdown};
use crate::config::Config;
use crate::error::TrayError;

/// What a tray interaction asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayAction {
    Open,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub action: TrayAction,
}

/// Everything a tray backend needs to show the icon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrayIcon {
    pub tooltip: String,
    /// Raw image file contents; backends fall back to a default icon
    pub image: Option<Vec<u8>>,
    /// Triggered by activating (clicking) the icon itself
    pub default_action: TrayAction,
    pub menu: Vec<MenuItem>,
}

/// A desktop tray backend
pub trait SystemTray: Send + Sync {
    fn is_supported(&self) -> bool;

    /// Show the icon; interactions are reported on `events`
    fn add(
        &self,
        icon: &TrayIcon,
        events: mpsc::UnboundedSender<TrayAction>,
    ) -> Result<(), TrayError>;

    /// Remove the icon registered under `tooltip`
    fn remove(&self, tooltip: &str);
}

/// Tray for headless environments: never supported
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessTray;

impl SystemTray for HeadlessTray {
    fn is_supported(&self) -> bool {
        false
    }

    fn add(
        &self,
        _icon: &TrayIcon,
        _events: mpsc::UnboundedSender<TrayAction>,
    ) -> Result<(), TrayError> {
        Err(TrayError::Unsupported)
    }

    fn remove(&self, _tooltip: &str) {}
}

pub struct TrayLauncher {
    tray: Arc<dyn SystemTray>,
    browser: Arc<dyn Browser>,
    shutdown: Shutdown,
    application_name: String,
    application_url: String,
    icon_path: Option<PathBuf>,
}

impl TrayLauncher {
    pub fn new(
        config: &Config,
        tray: Arc<dyn SystemTray>,
        browser: Arc<dyn Browser>,
        shutdown: Shutdown,
    ) -> Self {
        Self {
            tray,
            browser,
            shutdown,
            application_name: config.application_name.clone(),
            application_url: config.application_url(),
            icon_path: config.tray_icon.clone(),
        }
    }

    /// Add the tray icon, returning whether it is now shown
    ///
    /// Never fails: an unsupported platform or a broken icon only gets logged.
    /// Once shown, tray interactions are handled until the tray drops its
    /// event sender.
    pub async fn install(self: Arc<Self>) -> bool {
        if !self.tray.is_supported() {
            tracing::warn!("System tray not supported on this platform");
            return false;
        }

        tracing::debug!("Adding the application tray icon to the system tray");
        let (events, mut actions) = mpsc::unbounded_channel();
        let added = match self.icon().await {
            Ok(icon) => self.tray.add(&icon, events),
            Err(e) => Err(e),
        };

        match added {
            Ok(()) => {
                let launcher = self.clone();
                tokio::spawn(async move {
                    while let Some(action) = actions.recv().await {
                        launcher.handle(action);
                    }
                });
                true
            }
            Err(e) => {
                tracing::error!("Tray icon could not be added: {}", e);
                false
            }
        }
    }

    async fn icon(&self) -> Result<TrayIcon, TrayError> {
        self.application_url
            .parse::<Uri>()
            .map_err(|e| TrayError::Uri(format!("{}: {}", self.application_url, e)))?;

        let image = match &self.icon_path {
            Some(path) => Some(tokio::fs::read(path).await?),
            None => None,
        };

        Ok(TrayIcon {
            tooltip: self.application_name.clone(),
            image,
            default_action: TrayAction::Open,
            menu: vec![MenuItem {
                label: "Quitter".to_string(),
                action: TrayAction::Exit,
            }],
        })
    }

    /// Dispatch an interaction reported by the tray backend
    pub fn handle(&self, action: TrayAction) {
        match action {
            TrayAction::Open => self.open_application(),
            TrayAction::Exit => self.exit(),
        }
    }

    fn open_application(&self) {
        tracing::debug!(
            "Opening a new tab in the default browser with the URL : {}",
            self.application_url
        );
        if let Err(e) = self.browser.browse(&self.application_url) {
            tracing::error!("{}", e);
        }
    }

    fn exit(&self) {
        tracing::debug!("Removing the application tray icon from the system tray");
        self.tray.remove(&self.application_name);
        tracing::info!("Exiting the application");
        self.shutdown.trigger();
    }
}
