//! Test fixtures
//!
//! Factory functions for creating valid payloads with sensible defaults.
//! Each can be customized with struct update syntax.

use chrono::NaiveDate;

use crate::domain::entities::{
    CarInput, Contact, ContactId, ContactInput, InterventionInput, OperationInput,
    OperationLineInput,
};

/// A car without interventions
pub fn test_car(registration: &str) -> CarInput {
    CarInput {
        registration: registration.to_string(),
        serial_number: Some(format!("VF-{}", registration)),
        owner: "Dupont".to_string(),
        brand: Some("Renault".to_string()),
        model: Some("Clio".to_string()),
        motorization: Some("1.5 dCi".to_string()),
        engine_code: Some("K9K".to_string()),
        release_date: NaiveDate::from_ymd_opt(2008, 3, 14),
        comments: None,
        certificate: None,
        picture: None,
        interventions: None,
    }
}

/// A car carrying a full new subtree: one intervention, one operation, two lines
pub fn test_car_with_tree(registration: &str) -> CarInput {
    CarInput {
        interventions: Some(vec![InterventionInput {
            operations: Some(vec![OperationInput {
                operation_lines: Some(vec![
                    test_line("Oil 5W30"),
                    OperationLineInput {
                        quantity: Some(1.0),
                        ..test_line("Oil filter")
                    },
                ]),
                ..test_operation("Oil change")
            }]),
            ..test_intervention("OPEN")
        }]),
        ..test_car(registration)
    }
}

pub fn test_intervention(status: &str) -> InterventionInput {
    InterventionInput {
        id: None,
        status: status.to_string(),
        description: Some("Annual service".to_string()),
        mileage: Some(152_000),
        estimated_time: Some(1.5),
        real_time: None,
        amount: Some(180.0),
        paid_amount: None,
        comments: None,
        operations: None,
    }
}

pub fn test_operation(label: &str) -> OperationInput {
    OperationInput {
        id: None,
        label: label.to_string(),
        operation_lines: None,
    }
}

pub fn test_line(label: &str) -> OperationLineInput {
    OperationLineInput {
        id: None,
        label: label.to_string(),
        quantity: Some(4.5),
        done: None,
    }
}

pub fn test_contact_input(id: i32, name: &str) -> ContactInput {
    ContactInput {
        id: Some(ContactId(id)),
        name: Some(name.to_string()),
        nickname: None,
        number: Some(33_612_345_678),
        favorite: None,
        picture: None,
    }
}

pub fn test_contact(id: i32, name: &str) -> Contact {
    test_contact_input(id, name).to_contact(ContactId(id))
}
