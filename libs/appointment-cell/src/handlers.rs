// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{AppointmentFilters, BookAppointmentRequest, UpdateStatusRequest};
use crate::services::BookingService;

#[axum::debug_handler]
pub async fn book_hospital_appointment(
    State(service): State<Arc<BookingService>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let appointment = service.book_hospital_appointment(request).await?;
    Ok((StatusCode::CREATED, Json(json!(appointment))))
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(service): State<Arc<BookingService>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let appointment = service.create_appointment(request).await?;
    Ok((StatusCode::CREATED, Json(json!(appointment))))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(service): State<Arc<BookingService>>,
    Query(filters): Query<AppointmentFilters>,
) -> Result<Json<Value>, AppError> {
    let appointments = service.list_appointments(&filters).await;

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

#[axum::debug_handler]
pub async fn list_hospital_appointments(
    State(service): State<Arc<BookingService>>,
    Path(hospital_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let appointments = service.list_hospital_appointments(&hospital_id).await;

    Ok(Json(json!({
        "hospital_id": hospital_id,
        "appointments": appointments,
        "total": appointments.len()
    })))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(service): State<Arc<BookingService>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let appointment = service.get_appointment(&appointment_id).await?;
    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(service): State<Arc<BookingService>>,
    Path(appointment_id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = service
        .update_status(&appointment_id, &request.appointment_status)
        .await?;
    Ok(Json(json!(appointment)))
}
