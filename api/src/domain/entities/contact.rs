//! Contact domain entity
//!
//! A standalone address-book entry. Contacts have no relationships and
//! their id is assigned by the caller.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

entity_id!(
    /// Externally assigned contact identifier
    ContactId
);

/// A contact
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub number: Option<i64>,
    pub favorite: bool,
    #[serde(with = "super::binary")]
    pub picture: Option<Vec<u8>>,
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Contact[ID: {}; Name: \"{}\"; Nickname: \"{}\"; Number: {}; Favorite: {}; Picture: {}]",
            self.id,
            self.name.as_deref().unwrap_or("null"),
            self.nickname.as_deref().unwrap_or("null"),
            self.number.map_or_else(|| "null".to_string(), |n| n.to_string()),
            self.favorite,
            self.picture.is_some()
        )
    }
}

/// Payload to create or update a contact
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInput {
    /// Required on creation, ignored on update (the path wins)
    #[serde(default)]
    pub id: Option<ContactId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub number: Option<i64>,
    #[serde(default)]
    pub favorite: Option<bool>,
    #[serde(default, with = "super::binary")]
    pub picture: Option<Vec<u8>>,
}

impl ContactInput {
    /// Build the contact to store under `id`; an unset favorite flag is false
    pub fn to_contact(&self, id: ContactId) -> Contact {
        Contact {
            id,
            name: self.name.clone(),
            nickname: self.nickname.clone(),
            number: self.number,
            favorite: self.favorite.unwrap_or(false),
            picture: self.picture.clone(),
        }
    }

    /// The id a new contact will be stored under
    pub fn new_id(&self) -> Result<ContactId, DomainError> {
        self.id
            .ok_or_else(|| DomainError::Validation("Contact id must be provided".to_string()))
    }
}
