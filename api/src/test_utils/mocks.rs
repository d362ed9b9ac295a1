//! Mock implementations of port traits
//!
//! In-memory implementations that record what they were asked to do so
//! tests can verify behavior.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::mpsc;
use tracing::level_filters::LevelFilter;
use tracing::Level;

use crate::domain::entities::{Contact, ContactId};
use crate::domain::ports::ContactRepository;
use crate::error::{DomainError, TrayError};
use crate::loggable::LevelGate;
use crate::system::tray::{SystemTray, TrayAction, TrayIcon};
use crate::system::Browser;

// ============================================================================
// In-Memory Contact Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryContactRepository {
    contacts: Arc<RwLock<BTreeMap<ContactId, Contact>>>,
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a contact for testing
    pub fn with_contact(self, contact: Contact) -> Self {
        self.contacts.write().unwrap().insert(contact.id, contact);
        self
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn find_all(&self) -> Result<Vec<Contact>, DomainError> {
        let mut contacts: Vec<Contact> = self.contacts.read().unwrap().values().cloned().collect();
        contacts.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(contacts)
    }

    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, DomainError> {
        Ok(self.contacts.read().unwrap().get(id).cloned())
    }

    async fn create(&self, contact: &Contact) -> Result<Contact, DomainError> {
        let mut contacts = self.contacts.write().unwrap();
        if contacts.contains_key(&contact.id) {
            return Err(DomainError::Conflict(format!(
                "Contact {} already exists",
                contact.id
            )));
        }
        contacts.insert(contact.id, contact.clone());
        Ok(contact.clone())
    }

    async fn update(&self, contact: &Contact) -> Result<Contact, DomainError> {
        let mut contacts = self.contacts.write().unwrap();
        match contacts.get_mut(&contact.id) {
            Some(stored) => {
                *stored = contact.clone();
                Ok(contact.clone())
            }
            None => Err(DomainError::NotFound(format!(
                "Contact {} not found",
                contact.id
            ))),
        }
    }

    async fn delete(&self, id: &ContactId) -> Result<(), DomainError> {
        match self.contacts.write().unwrap().remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound(format!("Contact {} not found", id))),
        }
    }
}

// ============================================================================
// Recording System Tray
// ============================================================================

/// A tray that keeps the icons it was given and can simulate clicks
pub struct RecordingTray {
    supported: bool,
    fail_add: bool,
    events: Mutex<Option<mpsc::UnboundedSender<TrayAction>>>,
    pub added: Mutex<Vec<TrayIcon>>,
    pub removed: Mutex<Vec<String>>,
}

impl RecordingTray {
    pub fn supported() -> Self {
        Self {
            supported: true,
            fail_add: false,
            events: Mutex::new(None),
            added: Mutex::new(Vec::new()),
            removed: Mutex::new(Vec::new()),
        }
    }

    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::supported()
        }
    }

    /// Supported, but rejects every icon
    pub fn failing() -> Self {
        Self {
            fail_add: true,
            ..Self::supported()
        }
    }

    /// Report an interaction as a real tray backend would
    pub fn click(&self, action: TrayAction) {
        if let Some(events) = self.events.lock().unwrap().as_ref() {
            events.send(action).unwrap();
        }
    }
}

impl SystemTray for RecordingTray {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn add(
        &self,
        icon: &TrayIcon,
        events: mpsc::UnboundedSender<TrayAction>,
    ) -> Result<(), TrayError> {
        if self.fail_add {
            return Err(TrayError::Unsupported);
        }
        self.added.lock().unwrap().push(icon.clone());
        *self.events.lock().unwrap() = Some(events);
        Ok(())
    }

    fn remove(&self, tooltip: &str) {
        self.removed.lock().unwrap().push(tooltip.to_string());
    }
}

// ============================================================================
// Recording Browser
// ============================================================================

#[derive(Default)]
pub struct RecordingBrowser {
    pub opened: Mutex<Vec<String>>,
}

impl RecordingBrowser {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Browser for RecordingBrowser {
    fn browse(&self, uri: &str) -> Result<(), TrayError> {
        self.opened.lock().unwrap().push(uri.to_string());
        Ok(())
    }
}

// ============================================================================
// Fixed Log Levels
// ============================================================================

/// A level gate with a fixed maximum, independent of the global subscriber
#[derive(Debug, Clone, Copy)]
pub struct StaticLevels(pub LevelFilter);

impl LevelGate for StaticLevels {
    fn enabled(&self, level: Level) -> bool {
        level <= self.0
    }
}
