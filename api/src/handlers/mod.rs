//! HTTP handlers
//!
//! Axum request handlers for the API endpoints. Listings answer 204 when
//! empty; lookups of a missing id answer 404.

pub mod cars;
pub mod contacts;
pub mod interventions;
pub mod operation_lines;
pub mod operations;

pub use cars::{delete_car, get_car, list_cars, save_car, update_car};
pub use contacts::{delete_contact, get_contact, list_contacts, save_contact, update_contact};
pub use interventions::{
    delete_intervention, get_intervention, list_interventions, save_intervention,
    update_intervention,
};
pub use operation_lines::{
    delete_operation_line, get_operation_line, list_operation_lines, save_operation_line,
    update_operation_line,
};
pub use operations::{
    delete_operation, get_operation, list_operations, save_operation, update_operation,
};
