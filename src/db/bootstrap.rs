//! Store bootstrap: schema creation, corruption recovery, sample data.
//!
//! Runs once at startup. The sample dataset is only written when the
//! `departments` table is empty, so repeated runs leave existing data alone.

use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use rusqlite::Connection;
use serde::Serialize;

use super::repository::*;
use super::sqlite::open_or_recreate;
use super::DatabaseError;
use crate::models::enums::*;
use crate::models::*;

/// Outcome of a bootstrap run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BootstrapReport {
    /// The previous file failed the liveness check and was replaced.
    pub recreated: bool,
    /// Sample data was inserted on this run.
    pub seeded: bool,
}

/// Ensure the store at `path` is readable, migrated, and populated.
pub fn bootstrap(path: &Path) -> Result<BootstrapReport, DatabaseError> {
    let (conn, recreated) = open_or_recreate(path)?;
    let seeded = seed_if_empty(&conn)?;

    tracing::info!(path = %path.display(), recreated, seeded, "Store ready");
    Ok(BootstrapReport { recreated, seeded })
}

/// Insert the sample dataset when no departments exist. Returns whether
/// anything was written.
pub fn seed_if_empty(conn: &Connection) -> Result<bool, DatabaseError> {
    if count_rows(conn, Table::Departments)? > 0 {
        return Ok(false);
    }

    tracing::info!("Empty store, loading sample data");
    let tx = conn.unchecked_transaction()?;

    let dept_ids = SAMPLE_DEPARTMENTS
        .iter()
        .map(|&(name, head, location, phone)| {
            insert_department(
                &tx,
                &NewDepartment {
                    name: name.into(),
                    head_doctor: Some(head.into()),
                    location: Some(location.into()),
                    phone: Some(phone.into()),
                },
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let doctor_ids = SAMPLE_DOCTORS
        .iter()
        .map(|&(name, specialization, dept, phone, email, years, fee)| {
            insert_doctor(
                &tx,
                &NewDoctor {
                    name: name.into(),
                    specialization: specialization.into(),
                    department_id: Some(dept_ids[dept]),
                    phone: Some(phone.into()),
                    email: Some(email.into()),
                    experience_years: Some(years),
                    consultation_fee: fee,
                },
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut patient_ids = Vec::with_capacity(SAMPLE_PATIENTS.len());
    for &(name, age, gender, phone, email, address, contact, blood, registered) in SAMPLE_PATIENTS {
        let id = insert_patient(
            &tx,
            &NewPatient {
                name: name.into(),
                age: Some(age),
                gender: Some(gender),
                phone: Some(phone.into()),
                email: Some(email.into()),
                address: Some(address.into()),
                emergency_contact: Some(contact.into()),
                blood_group: Some(blood),
            },
            ymd(registered),
        )?;
        patient_ids.push(id);
    }

    for &(patient, doctor, date, (h, m), status, reason, notes) in SAMPLE_APPOINTMENTS {
        insert_appointment_with_status(
            &tx,
            &NewAppointment {
                patient_id: patient_ids[patient],
                doctor_id: doctor_ids[doctor],
                date: ymd(date),
                time: NaiveTime::from_hms_opt(h, m, 0),
                reason: Some(reason.into()),
                notes: Some(notes.into()),
            },
            status,
        )?;
    }

    for &(patient, doctor, visit, diagnosis, prescription, treatment, follow_up, cost) in
        SAMPLE_MEDICAL_RECORDS
    {
        insert_medical_record(
            &tx,
            &NewMedicalRecord {
                patient_id: patient_ids[patient],
                doctor_id: doctor_ids[doctor],
                visit_date: ymd(visit),
                diagnosis: Some(diagnosis.into()),
                prescription: Some(prescription.into()),
                treatment: Some(treatment.into()),
                follow_up_date: Some(ymd(follow_up)),
                cost,
            },
        )?;
    }

    tx.commit()?;
    Ok(true)
}

fn ymd((y, m, d): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

type Ymd = (i32, u32, u32);

const SAMPLE_DEPARTMENTS: &[(&str, &str, &str, &str)] = &[
    ("Cardiology", "Dr. Ahmed Khan", "Block A, Floor 2", "021-1234567"),
    ("Neurology", "Dr. Sarah Ali", "Block B, Floor 3", "021-2345678"),
    ("Orthopedics", "Dr. Hassan Sheikh", "Block C, Floor 1", "021-3456789"),
    ("Pediatrics", "Dr. Fatima Malik", "Block A, Floor 1", "021-4567890"),
    ("Emergency", "Dr. Omar Siddiqui", "Ground Floor", "021-5678901"),
];

/// (name, specialization, department index, phone, email, years, fee)
const SAMPLE_DOCTORS: &[(&str, &str, usize, &str, &str, u32, f64)] = &[
    ("Dr. Ahmed Khan", "Cardiologist", 0, "0300-1234567", "ahmed.khan@hospital.com", 15, 3000.0),
    ("Dr. Sarah Ali", "Neurologist", 1, "0300-2345678", "sarah.ali@hospital.com", 12, 3500.0),
    ("Dr. Hassan Sheikh", "Orthopedic Surgeon", 2, "0300-3456789", "hassan.sheikh@hospital.com", 18, 4000.0),
    ("Dr. Fatima Malik", "Pediatrician", 3, "0300-4567890", "fatima.malik@hospital.com", 10, 2500.0),
    ("Dr. Omar Siddiqui", "Emergency Medicine", 4, "0300-5678901", "omar.siddiqui@hospital.com", 8, 2000.0),
    ("Dr. Zainab Qureshi", "Cardiologist", 0, "0300-6789012", "zainab.qureshi@hospital.com", 7, 2800.0),
    ("Dr. Ali Raza", "Neurologist", 1, "0300-7890123", "ali.raza@hospital.com", 5, 3200.0),
];

type SamplePatient = (&'static str, u32, Gender, &'static str, &'static str, &'static str, &'static str, BloodGroup, Ymd);

const SAMPLE_PATIENTS: &[SamplePatient] = &[
    ("Muhammad Asif", 45, Gender::Male, "0301-1111111", "asif@email.com", "Karachi, Pakistan", "0302-2222222", BloodGroup::BPositive, (2024, 1, 15)),
    ("Ayesha Khan", 32, Gender::Female, "0301-3333333", "ayesha@email.com", "Lahore, Pakistan", "0302-4444444", BloodGroup::APositive, (2024, 1, 20)),
    ("Bilal Ahmed", 28, Gender::Male, "0301-5555555", "bilal@email.com", "Islamabad, Pakistan", "0302-6666666", BloodGroup::OPositive, (2024, 2, 1)),
    ("Sana Malik", 35, Gender::Female, "0301-7777777", "sana@email.com", "Faisalabad, Pakistan", "0302-8888888", BloodGroup::AbPositive, (2024, 2, 10)),
    ("Ahmed Ali", 50, Gender::Male, "0301-9999999", "ahmed@email.com", "Peshawar, Pakistan", "0302-0000000", BloodGroup::BNegative, (2024, 2, 15)),
];

/// (patient index, doctor index, date, (hour, minute), status, reason, notes)
const SAMPLE_APPOINTMENTS: &[(usize, usize, Ymd, (u32, u32), AppointmentStatus, &str, &str)] = &[
    (0, 0, (2024, 12, 20), (10, 0), AppointmentStatus::Scheduled, "Chest pain", "Regular checkup"),
    (1, 1, (2024, 12, 21), (14, 0), AppointmentStatus::Completed, "Headache", "MRI recommended"),
    (2, 2, (2024, 12, 22), (11, 0), AppointmentStatus::Scheduled, "Knee pain", "X-ray required"),
    (3, 3, (2024, 12, 23), (9, 0), AppointmentStatus::Scheduled, "Child fever", "Routine checkup"),
    (4, 4, (2024, 12, 19), (20, 0), AppointmentStatus::Completed, "Emergency", "Accident case"),
];

/// (patient index, doctor index, visit, diagnosis, prescription, treatment, follow-up, cost)
const SAMPLE_MEDICAL_RECORDS: &[(usize, usize, Ymd, &str, &str, &str, Ymd, f64)] = &[
    (0, 0, (2024, 12, 15), "Hypertension", "Amlodipine 5mg daily", "Lifestyle changes recommended", (2025, 1, 15), 3000.0),
    (1, 1, (2024, 12, 10), "Migraine", "Sumatriptan as needed", "Stress management", (2024, 12, 25), 3500.0),
    (4, 4, (2024, 12, 19), "Fracture - Right arm", "Cast applied", "Surgery not required", (2025, 1, 2), 15000.0),
];
