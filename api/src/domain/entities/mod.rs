//! Domain entities
//!
//! Pure domain models representing the garage's business concepts.
//! These are separate from the SeaORM entities in the `entity` module.
//!
//! The aggregate tree is Car -> Intervention -> Operation -> OperationLine.
//! Children hold their parent's id, never the parent itself, and
//! serialization only walks parent to child.

/// Declares a transparent integer id newtype
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub mod binary;
pub mod car;
pub mod contact;
pub mod date;
pub mod intervention;
pub mod operation;
pub mod operation_line;

pub use car::{Car, CarId, CarInput, CarSort};
pub use contact::{Contact, ContactId, ContactInput};
pub use intervention::{Intervention, InterventionId, InterventionInput};
pub use operation::{Operation, OperationId, OperationInput};
pub use operation_line::{OperationLine, OperationLineId, OperationLineInput};

use crate::error::DomainError;

/// Reject blank values for required text columns
pub(crate) fn require_text(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Reject ids on children submitted as part of a brand new parent
pub(crate) fn require_new<T: std::fmt::Display>(
    kind: &str,
    id: Option<T>,
) -> Result<(), DomainError> {
    match id {
        Some(id) => Err(DomainError::Validation(format!(
            "New {} must not carry an id (got {})",
            kind, id
        ))),
        None => Ok(()),
    }
}
