//! Dashboard page: headline counters, charts and the latest bookings.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::AppointmentFilter;
use crate::reports::{self, AgeBucket, AppointmentListing, DashboardStats, DepartmentAppointments};

/// Number of bookings shown in the "recent appointments" panel.
pub const RECENT_APPOINTMENTS: u32 = 10;

#[derive(Serialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub appointments_by_department: Vec<DepartmentAppointments>,
    pub age_distribution: Vec<AgeBucket>,
    pub recent_appointments: Vec<AppointmentListing>,
}

/// `GET /api/dashboard`
pub async fn overview(State(ctx): State<ApiContext>) -> Result<Json<DashboardResponse>, ApiError> {
    let conn = ctx.open_db()?;

    let stats = reports::fetch_stats(&conn)?;
    let appointments_by_department = reports::appointments_per_department(&conn)?;
    let age_distribution = reports::age_histogram(&conn)?;
    let recent_appointments = reports::fetch_appointment_listings(
        &conn,
        &AppointmentFilter {
            status: None,
            limit: Some(RECENT_APPOINTMENTS),
        },
    )?;

    Ok(Json(DashboardResponse {
        stats,
        appointments_by_department,
        age_distribution,
        recent_appointments,
    }))
}
