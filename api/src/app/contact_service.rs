//! Contact service

use std::sync::Arc;

use crate::domain::entities::{Contact, ContactId, ContactInput};
use crate::domain::ports::ContactRepository;
use crate::error::AppError;
use crate::loggable::{Loggable, MethodLogger};

/// Service for the contact book
pub struct ContactService<CR>
where
    CR: ContactRepository,
{
    contacts: Arc<CR>,
    logger: MethodLogger,
}

impl<CR> ContactService<CR>
where
    CR: ContactRepository,
{
    pub fn new(contacts: Arc<CR>, logger: MethodLogger) -> Self {
        Self { contacts, logger }
    }

    /// All contacts, ordered by name
    pub async fn list(&self) -> Result<Vec<Contact>, AppError> {
        let contacts = self
            .logger
            .try_call(Loggable::debug("list_contacts"), &(), || {
                self.contacts.find_all()
            })
            .await?;
        Ok(contacts)
    }

    pub async fn get(&self, id: &ContactId) -> Result<Option<Contact>, AppError> {
        let contact = self
            .logger
            .try_call(Loggable::debug("get_contact"), id, || {
                self.contacts.find_by_id(id)
            })
            .await?;
        Ok(contact)
    }

    /// Store a new contact under the id it carries
    pub async fn save(&self, input: ContactInput) -> Result<Contact, AppError> {
        let contact = self
            .logger
            .try_call(Loggable::info("save_contact"), &input, || async {
                let id = input.new_id()?;
                self.contacts.create(&input.to_contact(id)).await
            })
            .await?;

        tracing::debug!("Saved {}", contact);
        Ok(contact)
    }

    /// Replace the contact stored under `id`; an id in the payload is ignored
    pub async fn update(&self, id: &ContactId, input: ContactInput) -> Result<Contact, AppError> {
        let contact = self
            .logger
            .try_call(Loggable::info("update_contact"), &(id, &input), || async {
                self.contacts.update(&input.to_contact(*id)).await
            })
            .await?;
        Ok(contact)
    }

    pub async fn delete(&self, id: &ContactId) -> Result<(), AppError> {
        self.logger
            .try_call(Loggable::info("delete_contact"), id, || {
                self.contacts.delete(id)
            })
            .await?;
        Ok(())
    }
}
