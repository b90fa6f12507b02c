//! Query/report layer: read-only aggregates behind the dashboard,
//! analytics page and the canned-question assistant.
//!
//! Every function is a pure read over a borrowed connection. Values that
//! come from callers (status filters, specialization keywords) are bound
//! as parameters.

use std::str::FromStr;

use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::db::{count_rows, escape_like, DatabaseError, Table};
use crate::models::enums::AppointmentStatus;
use crate::models::AppointmentFilter;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Headline counters for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub patients: i64,
    pub doctors: i64,
    pub appointments: i64,
    /// Appointments still `Scheduled`.
    pub pending: i64,
}

/// Appointment joined with the names of the people involved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentListing {
    pub id: i64,
    pub patient_name: String,
    pub doctor_name: String,
    pub date: String,
    pub time: Option<String>,
    pub status: AppointmentStatus,
    pub reason: Option<String>,
}

/// Doctor joined with the department name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorListing {
    pub id: i64,
    pub name: String,
    pub specialization: String,
    pub department_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub experience_years: Option<u32>,
    pub consultation_fee: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentAppointments {
    pub department: String,
    pub appointments: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorRevenue {
    pub doctor_id: i64,
    pub doctor_name: String,
    pub completed_appointments: i64,
    pub consultation_fee: f64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: AppointmentStatus,
    pub count: i64,
}

/// Ten-year age band, `lower..=upper`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBucket {
    pub label: String,
    pub lower: u32,
    pub upper: u32,
    pub patients: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentPerformance {
    pub department: String,
    pub completed_appointments: i64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopDoctor {
    pub name: String,
    pub appointments: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientContact {
    pub name: String,
    pub age: Option<u32>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialtyVisit {
    pub patient_name: String,
    pub date: String,
    pub reason: Option<String>,
}

/// Width of an age histogram band in years.
pub const AGE_BUCKET_WIDTH: u32 = 10;

// ---------------------------------------------------------------------------
// Counters
// ---------------------------------------------------------------------------

pub fn fetch_stats(conn: &Connection) -> Result<DashboardStats, DatabaseError> {
    Ok(DashboardStats {
        patients: count_rows(conn, Table::Patients)?,
        doctors: count_rows(conn, Table::Doctors)?,
        appointments: count_rows(conn, Table::Appointments)?,
        pending: count_appointments_by_status(conn, AppointmentStatus::Scheduled)?,
    })
}

pub fn count_appointments_by_status(
    conn: &Connection,
    status: AppointmentStatus,
) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM appointments WHERE status = ?1",
        params![status.as_str()],
        |row| row.get(0),
    )?;
    Ok(count)
}

// ---------------------------------------------------------------------------
// Joined listings
// ---------------------------------------------------------------------------

/// Appointments with patient and doctor names, latest date first.
pub fn fetch_appointment_listings(
    conn: &Connection,
    filter: &AppointmentFilter,
) -> Result<Vec<AppointmentListing>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT a.appointment_id, p.name, d.name, a.appointment_date,
                a.appointment_time, a.status, a.reason
         FROM appointments a
         JOIN patients p ON a.patient_id = p.patient_id
         JOIN doctors d ON a.doctor_id = d.doctor_id
         WHERE ?1 IS NULL OR a.status = ?1
         ORDER BY a.appointment_date DESC, a.appointment_id DESC
         LIMIT ?2",
    )?;

    let limit = filter.limit.map(i64::from).unwrap_or(-1);
    let rows = stmt.query_map(params![filter.status.map(|s| s.as_str()), limit], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, Option<String>>(4)?,
            row.get::<_, String>(5)?,
            row.get::<_, Option<String>>(6)?,
        ))
    })?;

    let mut listings = Vec::new();
    for row in rows {
        let (id, patient_name, doctor_name, date, time, status, reason) = row?;
        listings.push(AppointmentListing {
            id,
            patient_name,
            doctor_name,
            date,
            time,
            status: AppointmentStatus::from_str(&status)?,
            reason,
        });
    }
    Ok(listings)
}

pub fn fetch_doctor_listings(conn: &Connection) -> Result<Vec<DoctorListing>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT d.doctor_id, d.name, d.specialization, dept.dept_name, d.phone,
                d.email, d.experience_years, d.consultation_fee
         FROM doctors d
         LEFT JOIN departments dept ON d.dept_id = dept.dept_id
         ORDER BY d.doctor_id",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(DoctorListing {
            id: row.get(0)?,
            name: row.get(1)?,
            specialization: row.get(2)?,
            department_name: row.get(3)?,
            phone: row.get(4)?,
            email: row.get(5)?,
            experience_years: row.get(6)?,
            consultation_fee: row.get::<_, Option<f64>>(7)?.unwrap_or(0.0),
        })
    })?;

    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

// ---------------------------------------------------------------------------
// Grouped aggregates
// ---------------------------------------------------------------------------

/// Appointment count per department; departments with no bookings report 0.
pub fn appointments_per_department(
    conn: &Connection,
) -> Result<Vec<DepartmentAppointments>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT dept.dept_name, COUNT(a.appointment_id)
         FROM departments dept
         LEFT JOIN doctors d ON d.dept_id = dept.dept_id
         LEFT JOIN appointments a ON a.doctor_id = d.doctor_id
         GROUP BY dept.dept_id
         ORDER BY dept.dept_id",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(DepartmentAppointments {
            department: row.get(0)?,
            appointments: row.get(1)?,
        })
    })?;

    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Revenue per doctor: completed appointments × consultation fee.
/// Scheduled and cancelled visits earn nothing; doctors without a
/// completed visit are omitted. Highest revenue first.
pub fn revenue_by_doctor(conn: &Connection) -> Result<Vec<DoctorRevenue>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT d.doctor_id, d.name, COUNT(a.appointment_id), COALESCE(d.consultation_fee, 0)
         FROM doctors d
         JOIN appointments a ON a.doctor_id = d.doctor_id AND a.status = ?1
         GROUP BY d.doctor_id
         ORDER BY COUNT(a.appointment_id) * COALESCE(d.consultation_fee, 0) DESC, d.doctor_id",
    )?;

    let rows = stmt.query_map(params![AppointmentStatus::Completed.as_str()], |row| {
        let completed: i64 = row.get(2)?;
        let fee: f64 = row.get(3)?;
        Ok(DoctorRevenue {
            doctor_id: row.get(0)?,
            doctor_name: row.get(1)?,
            completed_appointments: completed,
            consultation_fee: fee,
            revenue: completed as f64 * fee,
        })
    })?;

    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Count per status, every status present (zero when unused).
pub fn status_distribution(conn: &Connection) -> Result<Vec<StatusCount>, DatabaseError> {
    AppointmentStatus::ALL
        .iter()
        .map(|&status| {
            Ok(StatusCount {
                status,
                count: count_appointments_by_status(conn, status)?,
            })
        })
        .collect()
}

/// Patients grouped into ten-year bands, youngest first. Empty bands
/// are left out; patients without a recorded age are not counted.
pub fn age_histogram(conn: &Connection) -> Result<Vec<AgeBucket>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT (age / ?1) * ?1 AS lower, COUNT(*)
         FROM patients
         WHERE age IS NOT NULL
         GROUP BY lower
         ORDER BY lower",
    )?;

    let rows = stmt.query_map(params![AGE_BUCKET_WIDTH], |row| {
        let lower: u32 = row.get(0)?;
        let upper = lower + AGE_BUCKET_WIDTH - 1;
        Ok(AgeBucket {
            label: format!("{lower}-{upper}"),
            lower,
            upper,
            patients: row.get(1)?,
        })
    })?;

    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Completed appointments and the fees they brought in, per department.
pub fn department_performance(
    conn: &Connection,
) -> Result<Vec<DepartmentPerformance>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT dept.dept_name,
                COUNT(a.appointment_id),
                COALESCE(SUM(CASE WHEN a.appointment_id IS NOT NULL THEN d.consultation_fee END), 0)
         FROM departments dept
         LEFT JOIN doctors d ON d.dept_id = dept.dept_id
         LEFT JOIN appointments a ON a.doctor_id = d.doctor_id AND a.status = ?1
         GROUP BY dept.dept_id
         ORDER BY dept.dept_id",
    )?;

    let rows = stmt.query_map(params![AppointmentStatus::Completed.as_str()], |row| {
        Ok(DepartmentPerformance {
            department: row.get(0)?,
            completed_appointments: row.get(1)?,
            revenue: row.get(2)?,
        })
    })?;

    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

// ---------------------------------------------------------------------------
// Assistant queries
// ---------------------------------------------------------------------------

/// Mean consultation fee, `None` when there are no doctors.
pub fn average_consultation_fee(conn: &Connection) -> Result<Option<f64>, DatabaseError> {
    let avg = conn.query_row("SELECT AVG(consultation_fee) FROM doctors", [], |row| {
        row.get::<_, Option<f64>>(0)
    })?;
    Ok(avg)
}

/// Doctor with the most appointments of any status. Ties go to the
/// doctor registered first.
pub fn top_doctor_by_appointments(conn: &Connection) -> Result<Option<TopDoctor>, DatabaseError> {
    let top = conn
        .query_row(
            "SELECT d.name, COUNT(a.appointment_id) AS n
             FROM doctors d
             LEFT JOIN appointments a ON a.doctor_id = d.doctor_id
             GROUP BY d.doctor_id
             ORDER BY n DESC, d.doctor_id
             LIMIT 1",
            [],
            |row| {
                Ok(TopDoctor {
                    name: row.get(0)?,
                    appointments: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(top)
}

/// Distinct patients with at least one appointment with a doctor whose
/// specialization contains `keyword`.
pub fn patients_seen_by_specialization(
    conn: &Connection,
    keyword: &str,
) -> Result<Vec<PatientContact>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT p.patient_id, p.name, p.age, p.phone
         FROM patients p
         JOIN appointments a ON a.patient_id = p.patient_id
         JOIN doctors d ON a.doctor_id = d.doctor_id
         WHERE d.specialization LIKE '%' || ?1 || '%' ESCAPE '\\'
         ORDER BY p.patient_id",
    )?;

    let rows = stmt.query_map(params![escape_like(keyword)], |row| {
        Ok(PatientContact {
            name: row.get(1)?,
            age: row.get(2)?,
            phone: row.get(3)?,
        })
    })?;

    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Appointments with doctors whose specialization contains `keyword`.
pub fn appointments_by_specialization(
    conn: &Connection,
    keyword: &str,
) -> Result<Vec<SpecialtyVisit>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT p.name, a.appointment_date, a.reason
         FROM appointments a
         JOIN patients p ON a.patient_id = p.patient_id
         JOIN doctors d ON a.doctor_id = d.doctor_id
         WHERE d.specialization LIKE '%' || ?1 || '%' ESCAPE '\\'
         ORDER BY a.appointment_date, a.appointment_id",
    )?;

    let rows = stmt.query_map(params![escape_like(keyword)], |row| {
        Ok(SpecialtyVisit {
            patient_name: row.get(0)?,
            date: row.get(1)?,
            reason: row.get(2)?,
        })
    })?;

    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}
