//! SQLite adapter for ContactRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::map_db_err;
use crate::domain::entities::{Contact, ContactId};
use crate::domain::ports::ContactRepository;
use crate::entity::contacts;
use crate::error::DomainError;

/// SQLite implementation of ContactRepository
pub struct SqliteContactRepository {
    db: DatabaseConnection,
}

impl SqliteContactRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn active_model(contact: &Contact) -> contacts::ActiveModel {
    contacts::ActiveModel {
        id: Set(contact.id.0),
        name: Set(contact.name.clone()),
        nickname: Set(contact.nickname.clone()),
        number: Set(contact.number),
        favorite: Set(contact.favorite),
        picture: Set(contact.picture.clone()),
    }
}

#[async_trait]
impl ContactRepository for SqliteContactRepository {
    async fn find_all(&self) -> Result<Vec<Contact>, DomainError> {
        let results = contacts::Entity::find()
            .order_by_asc(contacts::Column::Name)
            .order_by_asc(contacts::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, DomainError> {
        let result = contacts::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(&self, contact: &Contact) -> Result<Contact, DomainError> {
        if self.find_by_id(&contact.id).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "Contact {} already exists",
                contact.id
            )));
        }

        let result = active_model(contact)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into())
    }

    async fn update(&self, contact: &Contact) -> Result<Contact, DomainError> {
        if self.find_by_id(&contact.id).await?.is_none() {
            return Err(DomainError::NotFound(format!(
                "Contact {} not found",
                contact.id
            )));
        }

        let result = active_model(contact)
            .update(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into())
    }

    async fn delete(&self, id: &ContactId) -> Result<(), DomainError> {
        let result = contacts::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!("Contact {} not found", id)));
        }

        Ok(())
    }
}

/// Convert SeaORM model to domain entity
impl From<contacts::Model> for Contact {
    fn from(model: contacts::Model) -> Self {
        Contact {
            id: ContactId(model.id),
            name: model.name,
            nickname: model.nickname,
            number: model.number,
            favorite: model.favorite,
            picture: model.picture,
        }
    }
}
