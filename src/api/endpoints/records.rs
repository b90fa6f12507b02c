//! Medical record endpoints.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::CreatedResponse;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::{insert_medical_record, list_medical_records};
use crate::models::{MedicalRecord, MedicalRecordFilter, MedicalRecordForm};

#[derive(Debug, Default, Deserialize)]
pub struct RecordQuery {
    pub patient_id: Option<i64>,
}

#[derive(Serialize)]
pub struct RecordsResponse {
    pub records: Vec<MedicalRecord>,
}

/// `GET /api/records?patient_id=`
pub async fn list(
    State(ctx): State<ApiContext>,
    query: Result<Query<RecordQuery>, QueryRejection>,
) -> Result<Json<RecordsResponse>, ApiError> {
    let Query(query) = query?;
    let conn = ctx.open_db()?;
    let records = list_medical_records(
        &conn,
        &MedicalRecordFilter {
            patient_id: query.patient_id,
        },
    )?;
    Ok(Json(RecordsResponse { records }))
}

/// `POST /api/records`
pub async fn create(
    State(ctx): State<ApiContext>,
    payload: Result<Json<MedicalRecordForm>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Json(form) = payload?;
    let record = form.into_new()?;

    let conn = ctx.open_db()?;
    let id = insert_medical_record(&conn, &record)?;

    tracing::info!(record_id = id, patient_id = record.patient_id, "Medical record added");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}
