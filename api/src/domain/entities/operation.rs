//! Operation domain entity
//!
//! A unit of work performed during an intervention, made of lines.

use serde::{Deserialize, Serialize};

use super::{require_new, require_text, InterventionId, OperationLine, OperationLineInput};
use crate::error::DomainError;

entity_id!(
    /// Unique identifier for an operation
    OperationId
);

/// An operation with its lines
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub id: OperationId,
    /// Owning intervention (never serialized)
    #[serde(skip_serializing)]
    pub intervention_id: InterventionId,
    pub label: String,
    pub operation_lines: Vec<OperationLine>,
}

/// Payload to create or update an operation
///
/// `operation_lines: None` leaves the stored lines untouched. Lines are
/// cascaded on save but absent lines are never removed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationInput {
    #[serde(default)]
    pub id: Option<OperationId>,
    pub label: String,
    #[serde(default)]
    pub operation_lines: Option<Vec<OperationLineInput>>,
}

impl OperationInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("label", &self.label)?;
        for line in self.operation_lines.iter().flatten() {
            line.validate()?;
        }
        Ok(())
    }

    /// Check that neither the operation nor its lines claim an id
    pub fn ensure_new(&self) -> Result<(), DomainError> {
        require_new("operation", self.id)?;
        for line in self.operation_lines.iter().flatten() {
            line.ensure_new()?;
        }
        Ok(())
    }
}
