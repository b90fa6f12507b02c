use super::enums::AppointmentStatus;

#[derive(Debug, Default)]
pub struct PatientFilter {
    /// Case-insensitive substring of the patient's name.
    pub name_contains: Option<String>,
}

#[derive(Debug, Default)]
pub struct AppointmentFilter {
    pub status: Option<AppointmentStatus>,
    pub limit: Option<u32>,
}

#[derive(Debug, Default)]
pub struct MedicalRecordFilter {
    pub patient_id: Option<i64>,
}
