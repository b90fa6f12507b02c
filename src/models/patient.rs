use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::{BloodGroup, Gender};
use super::required;
use crate::db::DatabaseError;

/// Upper bound accepted for a patient's age.
pub const MAX_PATIENT_AGE: u32 = 120;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub registration_date: Option<NaiveDate>,
}

/// Patient form submission. Registration date is assigned on insert.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPatient {
    #[serde(default)]
    pub name: String,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub blood_group: Option<BloodGroup>,
}

impl NewPatient {
    pub fn validate(&self) -> Result<(), DatabaseError> {
        required(&self.name, "Name")?;
        if let Some(age) = self.age {
            if age > MAX_PATIENT_AGE {
                return Err(DatabaseError::Validation(format!(
                    "Age must be between 0 and {MAX_PATIENT_AGE}"
                )));
            }
        }
        Ok(())
    }
}
