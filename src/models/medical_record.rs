use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{non_negative, optional_text};
use crate::db::DatabaseError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub visit_date: NaiveDate,
    pub diagnosis: Option<String>,
    pub prescription: Option<String>,
    pub treatment: Option<String>,
    pub follow_up_date: Option<NaiveDate>,
    pub cost: f64,
}

#[derive(Debug, Clone)]
pub struct NewMedicalRecord {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub visit_date: NaiveDate,
    pub diagnosis: Option<String>,
    pub prescription: Option<String>,
    pub treatment: Option<String>,
    pub follow_up_date: Option<NaiveDate>,
    pub cost: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MedicalRecordForm {
    pub patient_id: Option<i64>,
    pub doctor_id: Option<i64>,
    pub visit_date: Option<NaiveDate>,
    pub diagnosis: Option<String>,
    pub prescription: Option<String>,
    pub treatment: Option<String>,
    pub follow_up_date: Option<NaiveDate>,
    #[serde(default)]
    pub cost: f64,
}

impl MedicalRecordForm {
    pub fn into_new(self) -> Result<NewMedicalRecord, DatabaseError> {
        let patient_id = self
            .patient_id
            .ok_or_else(|| DatabaseError::Validation("Patient is required".into()))?;
        let doctor_id = self
            .doctor_id
            .ok_or_else(|| DatabaseError::Validation("Doctor is required".into()))?;
        let visit_date = self
            .visit_date
            .ok_or_else(|| DatabaseError::Validation("Visit date is required".into()))?;
        non_negative(self.cost, "Cost")?;

        if let Some(follow_up) = self.follow_up_date {
            if follow_up < visit_date {
                return Err(DatabaseError::Validation(
                    "Follow-up date cannot precede the visit".into(),
                ));
            }
        }

        Ok(NewMedicalRecord {
            patient_id,
            doctor_id,
            visit_date,
            diagnosis: optional_text(&self.diagnosis),
            prescription: optional_text(&self.prescription),
            treatment: optional_text(&self.treatment),
            follow_up_date: self.follow_up_date,
            cost: self.cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> MedicalRecordForm {
        MedicalRecordForm {
            patient_id: Some(1),
            doctor_id: Some(1),
            visit_date: NaiveDate::from_ymd_opt(2024, 12, 15),
            diagnosis: Some("Hypertension".into()),
            cost: 3000.0,
            ..Default::default()
        }
    }

    #[test]
    fn valid_form_converts() {
        let rec = form().into_new().unwrap();
        assert_eq!(rec.diagnosis.as_deref(), Some("Hypertension"));
        assert_eq!(rec.cost, 3000.0);
    }

    #[test]
    fn negative_cost_rejected() {
        let mut f = form();
        f.cost = -10.0;
        assert!(f.into_new().is_err());
    }

    #[test]
    fn follow_up_before_visit_rejected() {
        let mut f = form();
        f.follow_up_date = NaiveDate::from_ymd_opt(2024, 12, 1);
        assert!(f.into_new().is_err());
    }
}
