// libs/appointment-cell/src/models.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::{Record, StoreError};
use shared_models::error::AppError;

pub const DEFAULT_URGENCY_SCORE: i32 = 1;
pub const DEFAULT_STATUS: &str = "Pending";

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// A patient's booking with one doctor-hospital association on one day.
///
/// `token_no` is set once at creation and never changes; only the status moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub appointment_id: String,
    pub doctor_instance_id: String,
    pub patient_mobile: String,
    pub appointment_date: NaiveDate,
    pub urgency_score: i32,
    pub token_no: String,
    /// Free text, e.g. Pending, Consulting, Completed, Cancelled.
    pub appointment_status: String,
}

impl Appointment {
    pub fn is_on(&self, doctor_instance_id: &str, date: NaiveDate) -> bool {
        self.doctor_instance_id == doctor_instance_id && self.appointment_date == date
    }
}

impl Record for Appointment {
    fn key(&self) -> &str {
        &self.appointment_id
    }
}

/// An appointment joined with the doctor and hospital behind its association.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppointmentView {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub doctor_id: Option<String>,
    pub hospital_id: Option<String>,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

/// Booking request; every field is optional on the wire so missing ones can be
/// reported together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub hospital_id: Option<String>,
    #[serde(alias = "patient_contact")]
    pub patient_mobile: Option<String>,
    pub appointment_date: Option<NaiveDate>,
    pub urgency_score: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub appointment_status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentFilters {
    pub patient_mobile: Option<String>,
    pub doctor_id: Option<String>,
    pub hospital_id: Option<String>,
    pub appointment_date: Option<NaiveDate>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug, PartialEq)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Missing required fields")]
    MissingFields,

    #[error("Patient not found")]
    PatientNotFound,

    #[error("No doctors available at this hospital.")]
    NoDoctorsAvailable,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::NotFound | AppointmentError::PatientNotFound => {
                AppError::NotFound(err.to_string())
            }
            AppointmentError::MissingFields | AppointmentError::NoDoctorsAvailable => {
                AppError::BadRequest(err.to_string())
            }
            AppointmentError::ValidationError(msg) => AppError::ValidationError(msg),
            AppointmentError::Store(e) => AppError::Internal(e.to_string()),
        }
    }
}
