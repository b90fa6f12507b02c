//! Analytics page.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::reports::{self, DepartmentPerformance, DoctorRevenue, StatusCount};

#[derive(Serialize)]
pub struct AnalyticsResponse {
    pub revenue_by_doctor: Vec<DoctorRevenue>,
    pub total_revenue: f64,
    pub status_distribution: Vec<StatusCount>,
    pub department_performance: Vec<DepartmentPerformance>,
}

/// `GET /api/analytics`
pub async fn overview(State(ctx): State<ApiContext>) -> Result<Json<AnalyticsResponse>, ApiError> {
    let conn = ctx.open_db()?;

    let revenue_by_doctor = reports::revenue_by_doctor(&conn)?;
    let total_revenue = revenue_by_doctor.iter().map(|r| r.revenue).sum();

    Ok(Json(AnalyticsResponse {
        revenue_by_doctor,
        total_revenue,
        status_distribution: reports::status_distribution(&conn)?,
        department_performance: reports::department_performance(&conn)?,
    }))
}
