//! Intervention domain entity
//!
//! A visit of a car to the garage: status, mileage, time and money
//! tracking, and the operations performed.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::{require_new, require_text, CarId, Operation, OperationInput};
use crate::error::DomainError;

entity_id!(
    /// Unique identifier for an intervention
    InterventionId
);

/// An intervention with its operations
///
/// Equality and hashing only consider the id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Intervention {
    pub id: InterventionId,
    /// Owning car (never serialized)
    #[serde(skip_serializing)]
    pub car_id: CarId,
    /// Calendar year the intervention was recorded in (store assigned)
    pub year: i32,
    /// Sequence number within `year` (store assigned)
    pub number: i32,
    pub status: String,
    pub description: Option<String>,
    pub mileage: Option<i32>,
    pub estimated_time: Option<f64>,
    pub real_time: Option<f64>,
    pub amount: Option<f64>,
    pub paid_amount: Option<f64>,
    pub comments: Option<String>,
    pub operations: Vec<Operation>,
}

impl PartialEq for Intervention {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Intervention {}

impl Hash for Intervention {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Payload to create or update an intervention
///
/// `year` and `number` are not part of the payload: they are assigned on
/// insert and read-only afterwards. `operations: None` leaves the stored
/// operations untouched; `Some` replaces the collection, deleting the
/// operations that are no longer listed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionInput {
    #[serde(default)]
    pub id: Option<InterventionId>,
    pub status: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub mileage: Option<i32>,
    #[serde(default)]
    pub estimated_time: Option<f64>,
    #[serde(default)]
    pub real_time: Option<f64>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub paid_amount: Option<f64>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub operations: Option<Vec<OperationInput>>,
}

impl InterventionInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("status", &self.status)?;
        for operation in self.operations.iter().flatten() {
            operation.validate()?;
        }
        Ok(())
    }

    /// Check that neither the intervention nor its descendants claim an id
    pub fn ensure_new(&self) -> Result<(), DomainError> {
        require_new("intervention", self.id)?;
        for operation in self.operations.iter().flatten() {
            operation.ensure_new()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn intervention(id: i32, status: &str) -> Intervention {
        Intervention {
            id: InterventionId(id),
            car_id: CarId(1),
            year: 2024,
            number: 1,
            status: status.to_string(),
            description: None,
            mileage: Some(120_000),
            estimated_time: None,
            real_time: None,
            amount: Some(250.0),
            paid_amount: None,
            comments: None,
            operations: vec![],
        }
    }

    #[test]
    fn equality_is_identity_only() {
        let open = intervention(7, "OPEN");
        let closed = intervention(7, "CLOSED");
        let other = intervention(8, "OPEN");

        assert_eq!(open, closed);
        assert_ne!(open, other);

        let set: HashSet<Intervention> = [open, closed, other].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn payload_ignores_store_assigned_fields() {
        let input: InterventionInput = serde_json::from_str(
            r#"{"status": "OPEN", "year": 1999, "number": 42, "paidAmount": 10.5}"#,
        )
        .unwrap();

        assert_eq!(input.status, "OPEN");
        assert_eq!(input.paid_amount, Some(10.5));
        assert!(input.operations.is_none());
    }

    #[test]
    fn status_is_required() {
        let result: Result<InterventionInput, _> = serde_json::from_str(r#"{"mileage": 10}"#);
        assert!(result.is_err());

        let input = InterventionInput::default();
        assert!(matches!(input.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn serialization_omits_car_reference() {
        let json = serde_json::to_value(intervention(3, "OPEN")).unwrap();
        assert_eq!(json["status"], "OPEN");
        assert_eq!(json["mileage"], 120_000);
        assert!(json.get("carId").is_none());
        assert!(json.get("car").is_none());
    }
}
