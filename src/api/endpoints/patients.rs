//! Patient endpoints.
//!
//! - `GET /api/patients?search=`: list, optionally filtered by name
//! - `POST /api/patients`: register a patient
//! - `GET /api/patients/:id`: patient with medical history

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::CreatedResponse;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::{
    get_patient, insert_patient, list_medical_records, list_patients, DatabaseError,
};
use crate::models::{MedicalRecord, MedicalRecordFilter, NewPatient, Patient, PatientFilter};

#[derive(Debug, Default, Deserialize)]
pub struct PatientQuery {
    pub search: Option<String>,
}

#[derive(Serialize)]
pub struct PatientsResponse {
    pub patients: Vec<Patient>,
}

pub async fn list(
    State(ctx): State<ApiContext>,
    query: Result<Query<PatientQuery>, QueryRejection>,
) -> Result<Json<PatientsResponse>, ApiError> {
    let Query(query) = query?;
    let filter = PatientFilter {
        name_contains: query
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    };

    let conn = ctx.open_db()?;
    let patients = list_patients(&conn, &filter)?;
    Ok(Json(PatientsResponse { patients }))
}

/// Registration date is today's local date.
pub async fn create(
    State(ctx): State<ApiContext>,
    payload: Result<Json<NewPatient>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Json(patient) = payload?;
    let today = chrono::Local::now().date_naive();

    let conn = ctx.open_db()?;
    let id = insert_patient(&conn, &patient, today)?;

    tracing::info!(patient_id = id, "Patient registered");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

#[derive(Serialize)]
pub struct PatientDetailResponse {
    pub patient: Patient,
    pub medical_history: Vec<MedicalRecord>,
}

pub async fn detail(
    State(ctx): State<ApiContext>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<PatientDetailResponse>, ApiError> {
    let Path(id) = id?;
    let conn = ctx.open_db()?;

    let patient = get_patient(&conn, id)?
        .ok_or_else(|| DatabaseError::NotFound {
            entity_type: "Patient".into(),
            id: id.to_string(),
        })?;
    let medical_history = list_medical_records(
        &conn,
        &MedicalRecordFilter {
            patient_id: Some(id),
        },
    )?;

    Ok(Json(PatientDetailResponse {
        patient,
        medical_history,
    }))
}
