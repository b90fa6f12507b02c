use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use super::{escape_like, parse_date, DATE_FORMAT};
use crate::db::DatabaseError;
use crate::models::enums::*;
use crate::models::*;

const PATIENT_COLUMNS: &str = "patient_id, name, age, gender, phone, email, address,
                               emergency_contact, blood_group, registration_date";

pub fn insert_patient(
    conn: &Connection,
    patient: &NewPatient,
    registration_date: NaiveDate,
) -> Result<i64, DatabaseError> {
    patient.validate()?;
    conn.execute(
        "INSERT INTO patients (name, age, gender, phone, email, address, emergency_contact, blood_group, registration_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            patient.name.trim(),
            patient.age,
            patient.gender.map(|g| g.as_str()),
            optional_text(&patient.phone),
            optional_text(&patient.email),
            optional_text(&patient.address),
            optional_text(&patient.emergency_contact),
            patient.blood_group.map(|b| b.as_str()),
            registration_date.format(DATE_FORMAT).to_string(),
        ],
    )
    .map_err(DatabaseError::from_write)?;
    Ok(conn.last_insert_rowid())
}

pub fn get_patient(conn: &Connection, id: i64) -> Result<Option<Patient>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE patient_id = ?1"),
            params![id],
            read_patient_row,
        )
        .optional()?;
    row.map(patient_from_row).transpose()
}

/// List patients, optionally narrowed to names containing a substring.
/// The search text is bound, never spliced into the statement.
pub fn list_patients(conn: &Connection, filter: &PatientFilter) -> Result<Vec<Patient>, DatabaseError> {
    let search = optional_text(&filter.name_contains);

    let mut stmt = conn.prepare(&format!(
        "SELECT {PATIENT_COLUMNS} FROM patients
         WHERE ?1 IS NULL OR name LIKE '%' || ?1 || '%' ESCAPE '\\'
         ORDER BY patient_id"
    ))?;

    let rows = stmt.query_map(params![search.as_deref().map(escape_like)], read_patient_row)?;

    let mut patients = Vec::new();
    for row in rows {
        patients.push(patient_from_row(row?)?);
    }
    Ok(patients)
}

type PatientRow = (
    i64,
    String,
    Option<u32>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
);

fn read_patient_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PatientRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
        row.get(9)?,
    ))
}

fn patient_from_row(row: PatientRow) -> Result<Patient, DatabaseError> {
    let (id, name, age, gender, phone, email, address, emergency_contact, blood_group, registered) =
        row;
    Ok(Patient {
        id,
        name,
        age,
        gender: gender.as_deref().map(Gender::from_str).transpose()?,
        phone,
        email,
        address,
        emergency_contact,
        blood_group: blood_group.as_deref().map(BloodGroup::from_str).transpose()?,
        registration_date: parse_date(registered),
    })
}
