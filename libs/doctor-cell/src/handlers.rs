use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{
    AssociationFilters, CreateDoctorRequest, CreateSpecializationRequest, InviteDoctorRequest,
    RespondInvitationRequest,
};
use crate::router::DoctorState;

// ==============================================================================
// DOCTORS & SPECIALIZATIONS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<DoctorState>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let doctor = state.doctors.create_doctor(request).await?;
    Ok((StatusCode::CREATED, Json(json!(doctor))))
}

#[axum::debug_handler]
pub async fn list_doctors(State(state): State<DoctorState>) -> Result<Json<Value>, AppError> {
    let doctors = state.doctors.list_doctors().await;

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len()
    })))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<DoctorState>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let doctor = state.doctors.get_doctor(&doctor_id).await?;
    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn create_specialization(
    State(state): State<DoctorState>,
    Json(request): Json<CreateSpecializationRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let specialization = state.doctors.create_specialization(request).await?;
    Ok((StatusCode::CREATED, Json(json!(specialization))))
}

#[axum::debug_handler]
pub async fn list_specializations(State(state): State<DoctorState>) -> Result<Json<Value>, AppError> {
    let specializations = state.doctors.list_specializations().await;
    Ok(Json(json!({ "specializations": specializations })))
}

// ==============================================================================
// ASSOCIATIONS
// ==============================================================================

#[axum::debug_handler]
pub async fn invite_doctor(
    State(state): State<DoctorState>,
    Json(request): Json<InviteDoctorRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let association = state.associations.invite(request).await?;
    Ok((StatusCode::CREATED, Json(json!(association))))
}

#[axum::debug_handler]
pub async fn list_associations(
    State(state): State<DoctorState>,
    Query(filters): Query<AssociationFilters>,
) -> Result<Json<Value>, AppError> {
    let associations = state.associations.list(&filters).await;

    Ok(Json(json!({
        "associations": associations,
        "total": associations.len()
    })))
}

#[axum::debug_handler]
pub async fn get_association(
    State(state): State<DoctorState>,
    Path(association_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let association = state.associations.get(&association_id).await?;
    Ok(Json(json!(association)))
}

#[axum::debug_handler]
pub async fn respond_invitation(
    State(state): State<DoctorState>,
    Path(association_id): Path<String>,
    Json(request): Json<RespondInvitationRequest>,
) -> Result<Json<Value>, AppError> {
    let outcome = state.associations.respond(&association_id, request.accept).await?;

    let body = match outcome {
        Some(association) => json!({
            "status": "accepted",
            "association": association
        }),
        None => json!({
            "status": "rejected",
            "association_id": association_id
        }),
    };

    Ok(Json(body))
}

#[axum::debug_handler]
pub async fn toggle_availability(
    State(state): State<DoctorState>,
    Path(association_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let association = state.associations.toggle_availability(&association_id).await?;
    Ok(Json(json!(association)))
}
