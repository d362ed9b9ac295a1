//! Native tray backend
//!
//! Available with the `desktop-tray` feature on Linux (AppIndicator over
//! GTK) and Windows. The icon is owned by a dedicated thread which pumps
//! the platform event loop and forwards clicks and menu selections to the
//! launcher. Dropping the icon on that thread is what removes it.

use std::sync::mpsc as std_mpsc;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use tokio::sync::mpsc;
use tray_icon::menu::{Menu, MenuEvent, MenuId, MenuItem as NativeMenuItem};
use tray_icon::{Icon, MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent};

use super::tray::{SystemTray, TrayAction, TrayIcon};
use crate::error::TrayError;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Side of the generated icon used when no image is configured
const DEFAULT_ICON_SIZE: u32 = 32;
const DEFAULT_ICON_COLOR: [u8; 4] = [0x1e, 0x88, 0xe5, 0xff];

/// Decoded icon pixels; platform icon handles are built on the tray thread
#[derive(Debug, PartialEq, Eq)]
struct Rgba {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

struct Running {
    tooltip: String,
    stop: std_mpsc::Sender<()>,
}

#[derive(Default)]
pub struct DesktopTray {
    running: Mutex<Option<Running>>,
}

impl DesktopTray {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SystemTray for DesktopTray {
    fn is_supported(&self) -> bool {
        display_available()
    }

    fn add(
        &self,
        icon: &TrayIcon,
        events: mpsc::UnboundedSender<TrayAction>,
    ) -> Result<(), TrayError> {
        let rgba = decode(icon.image.as_deref())?;
        let (ready_tx, ready_rx) = std_mpsc::channel();
        let (stop_tx, stop_rx) = std_mpsc::channel();

        let spec = icon.clone();
        thread::Builder::new()
            .name("tray-icon".to_string())
            .spawn(move || run(spec, rgba, events, stop_rx, ready_tx))
            .map_err(|e| TrayError::Backend(e.to_string()))?;

        ready_rx
            .recv()
            .map_err(|_| TrayError::Backend("tray thread exited early".to_string()))??;

        let mut running = self.running.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = running.replace(Running {
            tooltip: icon.tooltip.clone(),
            stop: stop_tx,
        }) {
            let _ = previous.stop.send(());
        }
        Ok(())
    }

    fn remove(&self, tooltip: &str) {
        let mut running = self.running.lock().unwrap_or_else(|e| e.into_inner());
        if running.as_ref().is_some_and(|r| r.tooltip == tooltip) {
            if let Some(r) = running.take() {
                let _ = r.stop.send(());
            }
        }
    }
}

/// Body of the tray thread
fn run(
    spec: TrayIcon,
    rgba: Rgba,
    events: mpsc::UnboundedSender<TrayAction>,
    stop: std_mpsc::Receiver<()>,
    ready: std_mpsc::Sender<Result<(), TrayError>>,
) {
    #[cfg(target_os = "linux")]
    if let Err(e) = gtk::init() {
        let _ = ready.send(Err(TrayError::Backend(e.to_string())));
        return;
    }

    let (tray, menu_actions) = match build(&spec, rgba) {
        Ok(built) => {
            let _ = ready.send(Ok(()));
            built
        }
        Err(e) => {
            let _ = ready.send(Err(e));
            return;
        }
    };

    loop {
        pump_events();

        // A dropped sender means the launcher is gone too
        if !matches!(stop.try_recv(), Err(std_mpsc::TryRecvError::Empty)) {
            break;
        }

        let mut actions = Vec::new();
        while let Ok(event) = MenuEvent::receiver().try_recv() {
            actions.extend(
                menu_actions
                    .iter()
                    .filter(|(id, _)| *id == event.id)
                    .map(|(_, action)| *action),
            );
        }
        while let Ok(event) = TrayIconEvent::receiver().try_recv() {
            if let TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            } = event
            {
                actions.push(spec.default_action);
            }
        }
        if actions.into_iter().any(|action| events.send(action).is_err()) {
            break;
        }

        thread::sleep(POLL_INTERVAL);
    }

    drop(tray);
    tracing::debug!("Tray icon removed");
}

fn build(
    spec: &TrayIcon,
    rgba: Rgba,
) -> Result<(tray_icon::TrayIcon, Vec<(MenuId, TrayAction)>), TrayError> {
    let menu = Menu::new();
    let mut actions = Vec::with_capacity(spec.menu.len());
    for item in &spec.menu {
        let native = NativeMenuItem::new(&item.label, true, None);
        menu.append(&native)
            .map_err(|e| TrayError::Backend(e.to_string()))?;
        actions.push((native.id().clone(), item.action));
    }

    let image = Icon::from_rgba(rgba.pixels, rgba.width, rgba.height)
        .map_err(|e| TrayError::Backend(e.to_string()))?;

    let tray = TrayIconBuilder::new()
        .with_tooltip(&spec.tooltip)
        .with_icon(image)
        .with_menu(Box::new(menu))
        .with_menu_on_left_click(false)
        .build()
        .map_err(|e| TrayError::Backend(e.to_string()))?;

    Ok((tray, actions))
}

/// Decode the configured image file, or generate a plain square
fn decode(file: Option<&[u8]>) -> Result<Rgba, TrayError> {
    match file {
        Some(bytes) => {
            let decoded = image::load_from_memory(bytes)
                .map_err(|e| TrayError::Backend(format!("unreadable icon image: {}", e)))?
                .into_rgba8();
            let (width, height) = decoded.dimensions();
            Ok(Rgba {
                pixels: decoded.into_raw(),
                width,
                height,
            })
        }
        None => Ok(Rgba {
            pixels: DEFAULT_ICON_COLOR.repeat((DEFAULT_ICON_SIZE * DEFAULT_ICON_SIZE) as usize),
            width: DEFAULT_ICON_SIZE,
            height: DEFAULT_ICON_SIZE,
        }),
    }
}

#[cfg(target_os = "linux")]
fn display_available() -> bool {
    std::env::var_os("DISPLAY").is_some() || std::env::var_os("WAYLAND_DISPLAY").is_some()
}

#[cfg(target_os = "windows")]
fn display_available() -> bool {
    true
}

#[cfg(target_os = "linux")]
fn pump_events() {
    while gtk::events_pending() {
        gtk::main_iteration_do(false);
    }
}

#[cfg(target_os = "windows")]
fn pump_events() {
    use windows_sys::Win32::UI::WindowsAndMessaging::{
        DispatchMessageW, PeekMessageW, TranslateMessage, MSG, PM_REMOVE,
    };

    // SAFETY: MSG is plain data, and the queue read belongs to this thread,
    // which also owns the tray's hidden window.
    unsafe {
        let mut msg: MSG = std::mem::zeroed();
        while PeekMessageW(&mut msg, std::ptr::null_mut(), 0, 0, PM_REMOVE) != 0 {
            TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}
