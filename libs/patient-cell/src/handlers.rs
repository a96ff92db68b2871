use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{CreatePatientRequest, UpdatePatientRequest};
use crate::services::PatientService;

#[axum::debug_handler]
pub async fn create_patient(
    State(service): State<Arc<PatientService>>,
    Json(request): Json<CreatePatientRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let patient = service.create_patient(request).await?;
    Ok((StatusCode::CREATED, Json(json!(patient))))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(service): State<Arc<PatientService>>,
    Path(mobileno): Path<String>,
) -> Result<Json<Value>, AppError> {
    let patient = service.get_patient(&mobileno).await?;
    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn update_patient(
    State(service): State<Arc<PatientService>>,
    Path(mobileno): Path<String>,
    Json(request): Json<UpdatePatientRequest>,
) -> Result<Json<Value>, AppError> {
    let patient = service.update_patient(&mobileno, request).await?;
    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn list_patients(State(service): State<Arc<PatientService>>) -> Result<Json<Value>, AppError> {
    let patients = service.list_patients().await;

    Ok(Json(json!({
        "patients": patients,
        "total": patients.len()
    })))
}
