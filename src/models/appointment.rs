use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::enums::AppointmentStatus;
use super::optional_text;
use crate::db::DatabaseError;

/// Display format for appointment times, e.g. `02:30 PM`.
pub const TIME_FORMAT: &str = "%I:%M %p";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub status: AppointmentStatus,
    pub reason: Option<String>,
    pub notes: Option<String>,
}

/// A validated booking. Carries no status: every booking starts `Scheduled`.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub reason: Option<String>,
    pub notes: Option<String>,
}

/// Booking form as submitted. Fields a client may leave out are optional
/// here so missing input surfaces as a validation message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookAppointmentForm {
    pub patient_id: Option<i64>,
    pub doctor_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub reason: Option<String>,
    pub notes: Option<String>,
}

impl BookAppointmentForm {
    pub fn into_new(self) -> Result<NewAppointment, DatabaseError> {
        let patient_id = self
            .patient_id
            .ok_or_else(|| DatabaseError::Validation("Patient is required".into()))?;
        let doctor_id = self
            .doctor_id
            .ok_or_else(|| DatabaseError::Validation("Doctor is required".into()))?;
        let date = self
            .date
            .ok_or_else(|| DatabaseError::Validation("Date is required".into()))?;
        let time = optional_text(&self.time)
            .ok_or_else(|| DatabaseError::Validation("Time is required".into()))?;
        let time = parse_appointment_time(&time)?;

        Ok(NewAppointment {
            patient_id,
            doctor_id,
            date,
            time: Some(time),
            reason: optional_text(&self.reason),
            notes: optional_text(&self.notes),
        })
    }
}

/// Accepts `14:30`, `14:30:00`, `2:30 PM` and `02:30 pm`.
pub fn parse_appointment_time(input: &str) -> Result<NaiveTime, DatabaseError> {
    let s = input.trim();
    let upper = s.to_uppercase();
    ["%H:%M", "%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
        .or_else(|| NaiveTime::parse_from_str(&upper, TIME_FORMAT).ok())
        .or_else(|| NaiveTime::parse_from_str(&upper, "%l:%M %p").ok())
        .ok_or_else(|| DatabaseError::Validation(format!("Invalid time: {s}")))
}

pub fn format_appointment_time(time: &NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}
