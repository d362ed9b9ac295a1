//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., SQLite).
//!
//! Every mutation that touches more than one row is atomic: either the
//! whole cascade commits or nothing does. Mutations on a missing entity
//! fail with `DomainError::NotFound`, uniqueness breaches with
//! `DomainError::Conflict`.

use async_trait::async_trait;

use crate::domain::entities::{
    Car, CarId, CarInput, CarSort, Contact, ContactId, Intervention, InterventionId,
    InterventionInput, Operation, OperationId, OperationInput, OperationLine, OperationLineId,
    OperationLineInput,
};
use crate::error::DomainError;

/// Repository for the Car aggregate root
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// List every car with its full aggregate
    async fn find_all(&self, sort: CarSort) -> Result<Vec<Car>, DomainError>;

    /// Find a car by ID
    async fn find_by_id(&self, id: &CarId) -> Result<Option<Car>, DomainError>;

    /// Create a car, cascading its nested interventions
    async fn create(&self, car: &CarInput) -> Result<Car, DomainError>;

    /// Update a car; a present interventions collection is synchronised
    async fn update(&self, id: &CarId, car: &CarInput) -> Result<Car, DomainError>;

    /// Delete a car and all of its descendants
    async fn delete(&self, id: &CarId) -> Result<(), DomainError>;
}

/// Repository for interventions
#[async_trait]
pub trait InterventionRepository: Send + Sync {
    /// Find an intervention by ID
    async fn find_by_id(&self, id: &InterventionId) -> Result<Option<Intervention>, DomainError>;

    /// List the interventions of a car
    async fn find_by_car(&self, car_id: &CarId) -> Result<Vec<Intervention>, DomainError>;

    /// Attach a new intervention (and its operations) to a car
    async fn create(
        &self,
        car_id: &CarId,
        intervention: &InterventionInput,
    ) -> Result<Intervention, DomainError>;

    /// Update the mutable fields; a present operations collection is synchronised
    async fn update(
        &self,
        id: &InterventionId,
        intervention: &InterventionInput,
    ) -> Result<Intervention, DomainError>;

    /// Delete an intervention with its operations and lines
    async fn delete(&self, id: &InterventionId) -> Result<(), DomainError>;
}

/// Repository for operations
#[async_trait]
pub trait OperationRepository: Send + Sync {
    /// Find an operation by ID
    async fn find_by_id(&self, id: &OperationId) -> Result<Option<Operation>, DomainError>;

    /// List the operations of an intervention
    async fn find_by_intervention(
        &self,
        intervention_id: &InterventionId,
    ) -> Result<Vec<Operation>, DomainError>;

    /// Attach a new operation (and its lines) to an intervention
    async fn create(
        &self,
        intervention_id: &InterventionId,
        operation: &OperationInput,
    ) -> Result<Operation, DomainError>;

    /// Update the label; present lines are upserted, absent ones kept
    async fn update(
        &self,
        id: &OperationId,
        operation: &OperationInput,
    ) -> Result<Operation, DomainError>;

    /// Delete an operation
    ///
    /// The operation's reference to its intervention cascades, so this
    /// removes the owning intervention with all of its operations.
    async fn delete(&self, id: &OperationId) -> Result<(), DomainError>;
}

/// Repository for operation lines
#[async_trait]
pub trait OperationLineRepository: Send + Sync {
    /// Find a line by ID
    async fn find_by_id(&self, id: &OperationLineId) -> Result<Option<OperationLine>, DomainError>;

    /// List the lines of an operation
    async fn find_by_operation(
        &self,
        operation_id: &OperationId,
    ) -> Result<Vec<OperationLine>, DomainError>;

    /// Add a line to an operation
    async fn create(
        &self,
        operation_id: &OperationId,
        line: &OperationLineInput,
    ) -> Result<OperationLine, DomainError>;

    /// Update a line
    async fn update(
        &self,
        id: &OperationLineId,
        line: &OperationLineInput,
    ) -> Result<OperationLine, DomainError>;

    /// Delete a line
    async fn delete(&self, id: &OperationLineId) -> Result<(), DomainError>;
}

/// Repository for contacts
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// List contacts ordered by name
    async fn find_all(&self) -> Result<Vec<Contact>, DomainError>;

    /// Find a contact by ID
    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, DomainError>;

    /// Store a new contact under its own id
    async fn create(&self, contact: &Contact) -> Result<Contact, DomainError>;

    /// Replace a stored contact
    async fn update(&self, contact: &Contact) -> Result<Contact, DomainError>;

    /// Delete a contact
    async fn delete(&self, id: &ContactId) -> Result<(), DomainError>;
}
