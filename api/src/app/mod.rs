//! Application layer
//!
//! Use cases over the repository ports. Services validate payloads and
//! run every operation through the method logger.

pub mod car_service;
pub mod contact_service;
pub mod intervention_service;
pub mod operation_service;

pub use car_service::CarService;
pub use contact_service::ContactService;
pub use intervention_service::InterventionService;
pub use operation_service::OperationService;
