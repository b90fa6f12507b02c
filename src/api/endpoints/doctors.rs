//! Doctor endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use super::CreatedResponse;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::insert_doctor;
use crate::models::NewDoctor;
use crate::reports::{fetch_doctor_listings, DoctorListing};

#[derive(Serialize)]
pub struct DoctorsResponse {
    pub doctors: Vec<DoctorListing>,
}

/// `GET /api/doctors`: doctors with their department names.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<DoctorsResponse>, ApiError> {
    let conn = ctx.open_db()?;
    let doctors = fetch_doctor_listings(&conn)?;
    Ok(Json(DoctorsResponse { doctors }))
}

/// `POST /api/doctors`
pub async fn create(
    State(ctx): State<ApiContext>,
    payload: Result<Json<NewDoctor>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Json(doctor) = payload?;
    let conn = ctx.open_db()?;
    let id = insert_doctor(&conn, &doctor)?;

    tracing::info!(doctor_id = id, "Doctor added");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}
