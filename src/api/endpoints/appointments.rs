//! Appointment endpoints.
//!
//! - `GET /api/appointments?status=`: listing with patient and doctor names
//! - `POST /api/appointments`: book a new appointment

use std::str::FromStr;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::CreatedResponse;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::insert_appointment;
use crate::models::enums::AppointmentStatus;
use crate::models::{AppointmentFilter, BookAppointmentForm};
use crate::reports::{fetch_appointment_listings, AppointmentListing};

/// Selector value meaning "no status filter".
const ALL_STATUSES: &str = "All";

#[derive(Debug, Default, Deserialize)]
pub struct AppointmentQuery {
    pub status: Option<String>,
}

#[derive(Serialize)]
pub struct AppointmentsResponse {
    pub appointments: Vec<AppointmentListing>,
}

pub async fn list(
    State(ctx): State<ApiContext>,
    query: Result<Query<AppointmentQuery>, QueryRejection>,
) -> Result<Json<AppointmentsResponse>, ApiError> {
    let Query(query) = query?;
    let status = parse_status_filter(query.status.as_deref())?;

    let conn = ctx.open_db()?;
    let appointments = fetch_appointment_listings(&conn, &AppointmentFilter { status, limit: None })?;
    Ok(Json(AppointmentsResponse { appointments }))
}

fn parse_status_filter(raw: Option<&str>) -> Result<Option<AppointmentStatus>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") | Some(ALL_STATUSES) => Ok(None),
        Some(s) => Ok(Some(AppointmentStatus::from_str(s)?)),
    }
}

/// New bookings are stored as `Scheduled`; a `status` field in the body is ignored.
pub async fn book(
    State(ctx): State<ApiContext>,
    payload: Result<Json<BookAppointmentForm>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Json(form) = payload?;
    let appointment = form.into_new()?;

    let conn = ctx.open_db()?;
    let id = insert_appointment(&conn, &appointment)?;

    tracing::info!(appointment_id = id, "Appointment booked");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_and_absent_mean_no_filter() {
        assert_eq!(parse_status_filter(None).unwrap(), None);
        assert_eq!(parse_status_filter(Some("All")).unwrap(), None);
        assert_eq!(parse_status_filter(Some(" ")).unwrap(), None);
    }

    #[test]
    fn known_status_parses() {
        assert_eq!(
            parse_status_filter(Some("Completed")).unwrap(),
            Some(AppointmentStatus::Completed)
        );
    }

    #[test]
    fn unknown_status_is_bad_request() {
        let err = parse_status_filter(Some("Pending")).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
