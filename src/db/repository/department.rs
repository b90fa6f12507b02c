use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::*;

pub fn insert_department(conn: &Connection, dept: &NewDepartment) -> Result<i64, DatabaseError> {
    dept.validate()?;
    conn.execute(
        "INSERT INTO departments (dept_name, head_doctor, location, phone)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            dept.name.trim(),
            optional_text(&dept.head_doctor),
            optional_text(&dept.location),
            optional_text(&dept.phone),
        ],
    )
    .map_err(DatabaseError::from_write)?;
    Ok(conn.last_insert_rowid())
}

pub fn list_departments(conn: &Connection) -> Result<Vec<Department>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT dept_id, dept_name, head_doctor, location, phone
         FROM departments ORDER BY dept_id",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(Department {
            id: row.get(0)?,
            name: row.get(1)?,
            head_doctor: row.get(2)?,
            location: row.get(3)?,
            phone: row.get(4)?,
        })
    })?;

    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}
