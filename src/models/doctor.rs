use serde::{Deserialize, Serialize};

use super::{non_negative, required};
use crate::db::DatabaseError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub specialization: String,
    pub department_id: Option<i64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub experience_years: Option<u32>,
    pub consultation_fee: f64,
}

/// Doctor form submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewDoctor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub specialization: String,
    pub department_id: Option<i64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub experience_years: Option<u32>,
    #[serde(default)]
    pub consultation_fee: f64,
}

impl NewDoctor {
    pub fn validate(&self) -> Result<(), DatabaseError> {
        required(&self.name, "Name")?;
        required(&self.specialization, "Specialization")?;
        non_negative(self.consultation_fee, "Consultation fee")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor() -> NewDoctor {
        NewDoctor {
            name: "Dr. Test".into(),
            specialization: "Cardiologist".into(),
            consultation_fee: 1500.0,
            ..Default::default()
        }
    }

    #[test]
    fn valid_doctor_passes() {
        assert!(doctor().validate().is_ok());
    }

    #[test]
    fn name_and_specialization_required() {
        let mut d = doctor();
        d.specialization = "   ".into();
        let err = d.validate().unwrap_err();
        assert!(err.to_string().contains("Specialization is required"));

        let mut d = doctor();
        d.name.clear();
        assert!(d.validate().is_err());
    }

    #[test]
    fn negative_fee_rejected() {
        let mut d = doctor();
        d.consultation_fee = -1.0;
        assert!(d.validate().is_err());
        d.consultation_fee = f64::NAN;
        assert!(d.validate().is_err());
        d.consultation_fee = 0.0;
        assert!(d.validate().is_ok());
    }
}
