use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{CreateHospitalRequest, CreatePharmacyRequest, HospitalListQuery, PincodeQuery};
use crate::services::FacilityService;

// ==============================================================================
// HOSPITALS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_hospital(
    State(service): State<Arc<FacilityService>>,
    Json(request): Json<CreateHospitalRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let hospital = service.create_hospital(request).await?;
    Ok((StatusCode::CREATED, Json(json!(hospital))))
}

#[axum::debug_handler]
pub async fn list_hospitals(
    State(service): State<Arc<FacilityService>>,
    Query(query): Query<HospitalListQuery>,
) -> Result<Json<Value>, AppError> {
    let hospitals = service.list_hospitals(query.q.as_deref()).await;

    Ok(Json(json!({
        "hospitals": hospitals,
        "total": hospitals.len()
    })))
}

#[axum::debug_handler]
pub async fn get_hospital(
    State(service): State<Arc<FacilityService>>,
    Path(hospital_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let hospital = service.get_hospital(&hospital_id).await?;
    Ok(Json(json!(hospital)))
}

#[axum::debug_handler]
pub async fn search_hospitals(
    State(service): State<Arc<FacilityService>>,
    Query(query): Query<PincodeQuery>,
) -> Result<Json<Value>, AppError> {
    let outcome = service.search_hospitals(query.pincode.as_deref()).await?;

    Ok(Json(json!({
        "results": outcome.results,
        "message": outcome.message
    })))
}

// ==============================================================================
// PHARMACIES
// ==============================================================================

#[axum::debug_handler]
pub async fn create_pharmacy(
    State(service): State<Arc<FacilityService>>,
    Json(request): Json<CreatePharmacyRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let pharmacy = service.create_pharmacy(request).await?;
    Ok((StatusCode::CREATED, Json(json!(pharmacy))))
}

#[axum::debug_handler]
pub async fn list_pharmacies(
    State(service): State<Arc<FacilityService>>,
) -> Result<Json<Value>, AppError> {
    let pharmacies = service.list_pharmacies().await;

    Ok(Json(json!({
        "pharmacies": pharmacies,
        "total": pharmacies.len()
    })))
}

#[axum::debug_handler]
pub async fn get_pharmacy(
    State(service): State<Arc<FacilityService>>,
    Path(pharmacy_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let pharmacy = service.get_pharmacy(&pharmacy_id).await?;
    Ok(Json(json!(pharmacy)))
}

#[axum::debug_handler]
pub async fn search_pharmacies(
    State(service): State<Arc<FacilityService>>,
    Query(query): Query<PincodeQuery>,
) -> Result<Json<Value>, AppError> {
    let outcome = service.search_pharmacies(query.pincode.as_deref()).await?;

    Ok(Json(json!({
        "results": outcome.results,
        "message": outcome.message
    })))
}
