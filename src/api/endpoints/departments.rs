use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::list_departments;
use crate::models::Department;

#[derive(Serialize)]
pub struct DepartmentsResponse {
    pub departments: Vec<Department>,
}

/// `GET /api/departments`: feeds the department selector on the doctor form.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<DepartmentsResponse>, ApiError> {
    let conn = ctx.open_db()?;
    let departments = list_departments(&conn)?;
    Ok(Json(DepartmentsResponse { departments }))
}
