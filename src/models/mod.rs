pub mod appointment;
pub mod department;
pub mod doctor;
pub mod enums;
pub mod filters;
pub mod medical_record;
pub mod patient;

pub use appointment::*;
pub use department::*;
pub use doctor::*;
pub use filters::*;
pub use medical_record::*;
pub use patient::*;

use crate::db::DatabaseError;

/// Trimmed value of a required text field, or a validation error naming it.
pub(crate) fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, DatabaseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DatabaseError::Validation(format!("{field} is required")));
    }
    Ok(trimmed)
}

/// Optional text with blank input collapsed to `None`.
pub(crate) fn optional_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub(crate) fn non_negative(value: f64, field: &str) -> Result<(), DatabaseError> {
    if !value.is_finite() || value < 0.0 {
        return Err(DatabaseError::Validation(format!(
            "{field} must be zero or greater"
        )));
    }
    Ok(())
}
