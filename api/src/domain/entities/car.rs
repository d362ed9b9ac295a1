//! Car domain entity
//!
//! The aggregate root. A car owns its interventions; deleting the car or
//! dropping an intervention from its collection deletes the intervention
//! and everything below it.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{require_text, Intervention, InterventionInput};
use crate::error::DomainError;

entity_id!(
    /// Unique identifier for a car
    CarId
);

/// A car with its full intervention history
#[derive(Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: CarId,
    /// Unique across all cars
    pub registration: String,
    /// Unique across all cars when present
    pub serial_number: Option<String>,
    pub owner: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub motorization: Option<String>,
    pub engine_code: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub comments: Option<String>,
    /// Scanned registration certificate
    #[serde(with = "super::binary")]
    pub certificate: Option<Vec<u8>>,
    #[serde(with = "super::binary")]
    pub picture: Option<Vec<u8>>,
    pub interventions: Vec<Intervention>,
}

// Attachments can weigh megabytes; only report whether they are present.
impl fmt::Debug for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Car")
            .field("id", &self.id)
            .field("registration", &self.registration)
            .field("serial_number", &self.serial_number)
            .field("owner", &self.owner)
            .field("brand", &self.brand)
            .field("model", &self.model)
            .field("motorization", &self.motorization)
            .field("engine_code", &self.engine_code)
            .field("release_date", &self.release_date)
            .field("comments", &self.comments)
            .field("certificate", &self.certificate.is_some())
            .field("picture", &self.picture.is_some())
            .field("interventions", &self.interventions)
            .finish()
    }
}

/// Payload to create or update a car
///
/// On update, `interventions: None` leaves the stored interventions
/// untouched while `Some` synchronises the collection (orphan removal).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarInput {
    pub registration: String,
    #[serde(default)]
    pub serial_number: Option<String>,
    pub owner: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub motorization: Option<String>,
    #[serde(default)]
    pub engine_code: Option<String>,
    #[serde(default, deserialize_with = "super::date::deserialize")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default, with = "super::binary")]
    pub certificate: Option<Vec<u8>>,
    #[serde(default, with = "super::binary")]
    pub picture: Option<Vec<u8>>,
    #[serde(default)]
    pub interventions: Option<Vec<InterventionInput>>,
}

impl CarInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("registration", &self.registration)?;
        require_text("owner", &self.owner)?;
        for intervention in self.interventions.iter().flatten() {
            intervention.validate()?;
        }
        Ok(())
    }

    /// Check that no nested child claims an id
    pub fn ensure_new(&self) -> Result<(), DomainError> {
        for intervention in self.interventions.iter().flatten() {
            intervention.ensure_new()?;
        }
        Ok(())
    }
}

/// Sort key for car listings (always ascending, ties broken by id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CarSort {
    Id,
    #[default]
    Registration,
    SerialNumber,
    Owner,
    Brand,
    Model,
    ReleaseDate,
}

impl std::str::FromStr for CarSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(CarSort::Id),
            "registration" => Ok(CarSort::Registration),
            "serialNumber" => Ok(CarSort::SerialNumber),
            "owner" => Ok(CarSort::Owner),
            "brand" => Ok(CarSort::Brand),
            "model" => Ok(CarSort::Model),
            "releaseDate" => Ok(CarSort::ReleaseDate),
            _ => Err(format!("Unknown sort field: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car() -> Car {
        Car {
            id: CarId(1),
            registration: "AB-123-CD".to_string(),
            serial_number: Some("VF1234".to_string()),
            owner: "Dupont".to_string(),
            brand: Some("Renault".to_string()),
            model: Some("Clio".to_string()),
            motorization: None,
            engine_code: None,
            release_date: NaiveDate::from_ymd_opt(2004, 5, 17),
            comments: None,
            certificate: Some(vec![1, 2, 3]),
            picture: None,
            interventions: vec![],
        }
    }

    #[test]
    fn sort_from_str() {
        assert_eq!("registration".parse::<CarSort>().unwrap(), CarSort::Registration);
        assert_eq!("serialNumber".parse::<CarSort>().unwrap(), CarSort::SerialNumber);
        assert_eq!("releaseDate".parse::<CarSort>().unwrap(), CarSort::ReleaseDate);
        assert!("mileage".parse::<CarSort>().is_err());
        assert_eq!(CarSort::default(), CarSort::Registration);
    }

    #[test]
    fn debug_hides_attachment_bytes() {
        let output = format!("{:?}", car());
        assert!(output.contains("certificate: true"));
        assert!(output.contains("picture: false"));
        assert!(!output.contains("[1, 2, 3]"));
    }

    #[test]
    fn equality_covers_declared_fields() {
        let mut other = car();
        assert_eq!(car(), other);
        other.owner = "Martin".to_string();
        assert_ne!(car(), other);
    }

    #[test]
    fn serializes_camel_case_with_base64_attachments() {
        let json = serde_json::to_value(car()).unwrap();
        assert_eq!(json["serialNumber"], "VF1234");
        assert_eq!(json["releaseDate"], "2004-05-17");
        assert_eq!(json["certificate"], "AQID");
        assert!(json["picture"].is_null());
        assert!(json["interventions"].as_array().unwrap().is_empty());
    }

    #[test]
    fn input_requires_registration_and_owner() {
        let missing_owner: Result<CarInput, _> =
            serde_json::from_str(r#"{"registration": "AB-123-CD"}"#);
        assert!(missing_owner.is_err());

        let blank = CarInput {
            registration: "AB-123-CD".to_string(),
            owner: " ".to_string(),
            ..Default::default()
        };
        assert!(matches!(blank.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn input_reads_date_picker_timestamps() {
        let input: CarInput = serde_json::from_str(
            r#"{
                "registration": "AB-123-CD",
                "owner": "Dupont",
                "releaseDate": "2004-05-17T00:00:00.000Z"
            }"#,
        )
        .unwrap();

        assert_eq!(input.release_date, NaiveDate::from_ymd_opt(2004, 5, 17));
    }

    #[test]
    fn new_car_rejects_nested_ids() {
        let input: CarInput = serde_json::from_str(
            r#"{
                "registration": "AB-123-CD",
                "owner": "Dupont",
                "interventions": [{"id": 4, "status": "OPEN"}]
            }"#,
        )
        .unwrap();

        assert!(input.validate().is_ok());
        assert!(matches!(input.ensure_new(), Err(DomainError::Validation(_))));
    }
}
