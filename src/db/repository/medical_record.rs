use rusqlite::{params, Connection};

use super::{parse_date, parse_required_date, DATE_FORMAT};
use crate::db::DatabaseError;
use crate::models::*;

pub fn insert_medical_record(conn: &Connection, rec: &NewMedicalRecord) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO medical_records (patient_id, doctor_id, visit_date, diagnosis, prescription, treatment, follow_up_date, cost)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            rec.patient_id,
            rec.doctor_id,
            rec.visit_date.format(DATE_FORMAT).to_string(),
            rec.diagnosis,
            rec.prescription,
            rec.treatment,
            rec.follow_up_date.map(|d| d.format(DATE_FORMAT).to_string()),
            rec.cost,
        ],
    )
    .map_err(DatabaseError::from_write)?;
    Ok(conn.last_insert_rowid())
}

/// Medical history, most recent visit first.
pub fn list_medical_records(
    conn: &Connection,
    filter: &MedicalRecordFilter,
) -> Result<Vec<MedicalRecord>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT record_id, patient_id, doctor_id, visit_date, diagnosis, prescription,
                treatment, follow_up_date, cost
         FROM medical_records
         WHERE ?1 IS NULL OR patient_id = ?1
         ORDER BY visit_date DESC, record_id DESC",
    )?;

    let rows = stmt.query_map(params![filter.patient_id], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, i64>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, Option<String>>(4)?,
            row.get::<_, Option<String>>(5)?,
            row.get::<_, Option<String>>(6)?,
            row.get::<_, Option<String>>(7)?,
            row.get::<_, Option<f64>>(8)?,
        ))
    })?;

    let mut records = Vec::new();
    for row in rows {
        let (id, patient_id, doctor_id, visit_date, diagnosis, prescription, treatment, follow_up, cost) =
            row?;
        records.push(MedicalRecord {
            id,
            patient_id,
            doctor_id,
            visit_date: parse_required_date(&visit_date, "visit_date")?,
            diagnosis,
            prescription,
            treatment,
            follow_up_date: parse_date(follow_up),
            cost: cost.unwrap_or(0.0),
        });
    }
    Ok(records)
}
