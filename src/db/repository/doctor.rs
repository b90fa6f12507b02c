use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::*;

const DOCTOR_COLUMNS: &str = "doctor_id, name, specialization, dept_id, phone, email,
                              experience_years, consultation_fee";

pub fn insert_doctor(conn: &Connection, doctor: &NewDoctor) -> Result<i64, DatabaseError> {
    doctor.validate()?;
    conn.execute(
        "INSERT INTO doctors (name, specialization, dept_id, phone, email, experience_years, consultation_fee)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            doctor.name.trim(),
            doctor.specialization.trim(),
            doctor.department_id,
            optional_text(&doctor.phone),
            optional_text(&doctor.email),
            doctor.experience_years,
            doctor.consultation_fee,
        ],
    )
    .map_err(DatabaseError::from_write)?;
    Ok(conn.last_insert_rowid())
}

pub fn get_doctor(conn: &Connection, id: i64) -> Result<Option<Doctor>, DatabaseError> {
    let doctor = conn
        .query_row(
            &format!("SELECT {DOCTOR_COLUMNS} FROM doctors WHERE doctor_id = ?1"),
            params![id],
            row_to_doctor,
        )
        .optional()?;
    Ok(doctor)
}

fn row_to_doctor(row: &rusqlite::Row<'_>) -> rusqlite::Result<Doctor> {
    Ok(Doctor {
        id: row.get(0)?,
        name: row.get(1)?,
        specialization: row.get(2)?,
        department_id: row.get(3)?,
        phone: row.get(4)?,
        email: row.get(5)?,
        experience_years: row.get(6)?,
        consultation_fee: row.get::<_, Option<f64>>(7)?.unwrap_or(0.0),
    })
}
