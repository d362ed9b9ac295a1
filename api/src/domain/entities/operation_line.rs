//! Operation line domain entity
//!
//! Leaf of the aggregate: one part, consumable or task within an operation.

use serde::{Deserialize, Serialize};

use super::{require_new, require_text, OperationId};
use crate::error::DomainError;

entity_id!(
    /// Unique identifier for an operation line
    OperationLineId
);

/// A line of an operation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationLine {
    pub id: OperationLineId,
    /// Owning operation (never serialized)
    #[serde(skip_serializing)]
    pub operation_id: OperationId,
    pub label: String,
    pub quantity: Option<f64>,
    pub done: bool,
}

/// Payload to create or update an operation line
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationLineInput {
    #[serde(default)]
    pub id: Option<OperationLineId>,
    pub label: String,
    #[serde(default)]
    pub quantity: Option<f64>,
    /// Unset means not done
    #[serde(default)]
    pub done: Option<bool>,
}

impl OperationLineInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("label", &self.label)
    }

    pub fn ensure_new(&self) -> Result<(), DomainError> {
        require_new("operation line", self.id)
    }

    pub fn is_done(&self) -> bool {
        self.done.unwrap_or(false)
    }
}
