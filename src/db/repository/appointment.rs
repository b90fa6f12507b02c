use std::str::FromStr;

use rusqlite::{params, Connection, OptionalExtension};

use super::{parse_required_date, DATE_FORMAT};
use crate::db::DatabaseError;
use crate::models::enums::AppointmentStatus;
use crate::models::*;

const APPOINTMENT_COLUMNS: &str = "appointment_id, patient_id, doctor_id, appointment_date,
                                   appointment_time, status, reason, notes";

/// Book an appointment. New bookings are always `Scheduled`.
pub fn insert_appointment(conn: &Connection, appt: &NewAppointment) -> Result<i64, DatabaseError> {
    insert_appointment_with_status(conn, appt, AppointmentStatus::Scheduled)
}

/// Insert with an explicit status. Only the sample-data loader records
/// historical (completed or cancelled) visits; bookings go through
/// `insert_appointment`.
pub(crate) fn insert_appointment_with_status(
    conn: &Connection,
    appt: &NewAppointment,
    status: AppointmentStatus,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO appointments (patient_id, doctor_id, appointment_date, appointment_time, status, reason, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            appt.patient_id,
            appt.doctor_id,
            appt.date.format(DATE_FORMAT).to_string(),
            appt.time.as_ref().map(format_appointment_time),
            status.as_str(),
            appt.reason,
            appt.notes,
        ],
    )
    .map_err(DatabaseError::from_write)?;
    Ok(conn.last_insert_rowid())
}

pub fn get_appointment(conn: &Connection, id: i64) -> Result<Option<Appointment>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE appointment_id = ?1"),
            params![id],
            read_appointment_row,
        )
        .optional()?;
    row.map(appointment_from_row).transpose()
}

pub fn list_appointments(
    conn: &Connection,
    filter: &AppointmentFilter,
) -> Result<Vec<Appointment>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {APPOINTMENT_COLUMNS} FROM appointments
         WHERE ?1 IS NULL OR status = ?1
         ORDER BY appointment_date DESC, appointment_id DESC
         LIMIT ?2"
    ))?;

    let limit = filter.limit.map(i64::from).unwrap_or(-1);
    let rows = stmt.query_map(
        params![filter.status.map(|s| s.as_str()), limit],
        read_appointment_row,
    )?;

    let mut appointments = Vec::new();
    for row in rows {
        appointments.push(appointment_from_row(row?)?);
    }
    Ok(appointments)
}

type AppointmentRow = (
    i64,
    i64,
    i64,
    String,
    Option<String>,
    String,
    Option<String>,
    Option<String>,
);

fn read_appointment_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AppointmentRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
    ))
}

fn appointment_from_row(row: AppointmentRow) -> Result<Appointment, DatabaseError> {
    let (id, patient_id, doctor_id, date, time, status, reason, notes) = row;
    Ok(Appointment {
        id,
        patient_id,
        doctor_id,
        date: parse_required_date(&date, "appointment_date")?,
        time,
        status: AppointmentStatus::from_str(&status)?,
        reason,
        notes,
    })
}
