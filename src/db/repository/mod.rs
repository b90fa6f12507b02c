//! Repository layer: entity-scoped inserts and listings.
//!
//! Every function takes a borrowed `Connection` and binds all caller
//! input as parameters. Inserts return the new auto-increment id.

mod appointment;
mod department;
mod doctor;
mod medical_record;
mod patient;

pub use appointment::*;
pub use department::*;
pub use doctor::*;
pub use medical_record::*;
pub use patient::*;

use chrono::NaiveDate;

use super::DatabaseError;

/// Storage format for every date column.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn parse_date(value: Option<String>) -> Option<NaiveDate> {
    value.and_then(|d| NaiveDate::parse_from_str(&d, DATE_FORMAT).ok())
}

pub(crate) fn parse_required_date(value: &str, column: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        DatabaseError::CorruptValue(format!("{column} holds invalid date {value:?}: {e}"))
    })
}

/// Escape `LIKE` wildcards so user text matches literally under `ESCAPE '\'`.
pub(crate) fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Count rows in one of the known tables.
pub fn count_rows(conn: &rusqlite::Connection, table: Table) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        &format!("SELECT COUNT(*) FROM {}", table.as_str()),
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Closed set of entity tables; keeps table names out of caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Departments,
    Doctors,
    Patients,
    Appointments,
    MedicalRecords,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Departments => "departments",
            Table::Doctors => "doctors",
            Table::Patients => "patients",
            Table::Appointments => "appointments",
            Table::MedicalRecords => "medical_records",
        }
    }
}
