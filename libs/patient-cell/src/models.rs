use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::{Record, StoreError};
use shared_models::error::AppError;

/// Patients are keyed by their mobile number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub mobileno: String,
    pub name: String,
    pub age: i32,
    pub pincode: i64,
    pub gender: String,
}

impl Record for Patient {
    fn key(&self) -> &str {
        &self.mobileno
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePatientRequest {
    pub mobileno: String,
    pub name: String,
    pub age: i32,
    pub pincode: i64,
    pub gender: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePatientRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub pincode: Option<i64>,
    pub gender: Option<String>,
}

pub const MAX_MOBILE_LENGTH: usize = 15;

#[derive(Error, Debug, PartialEq)]
pub enum PatientError {
    #[error("Patient not found")]
    NotFound,

    #[error("Patient with mobile number {0} already exists")]
    AlreadyRegistered(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<StoreError> for PatientError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey { key, .. } => PatientError::AlreadyRegistered(key),
        }
    }
}

impl From<PatientError> for AppError {
    fn from(err: PatientError) -> Self {
        match err {
            PatientError::NotFound => AppError::NotFound(err.to_string()),
            PatientError::AlreadyRegistered(_) => AppError::Conflict(err.to_string()),
            PatientError::ValidationError(msg) => AppError::ValidationError(msg),
        }
    }
}
