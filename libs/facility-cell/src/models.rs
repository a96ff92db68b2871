use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::{Record, StoreError};
use shared_models::error::AppError;
use shared_utils::Coordinates;

use crate::services::search::Locatable;

pub const HOSPITAL_ID_PREFIX: &str = "H";
pub const PHARMACY_ID_PREFIX: &str = "PH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub hospital_id: String,
    pub hospital_name: String,
    pub location: String,
    pub address: Option<String>,
    pub pincode: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub contact: String,
    pub working_hours: String,
}

impl Record for Hospital {
    fn key(&self) -> &str {
        &self.hospital_id
    }
}

impl Locatable for Hospital {
    const LABEL_PLURAL: &'static str = "hospitals";

    fn postal_code(&self) -> Option<i64> {
        self.pincode
    }

    fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::from_parts(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pharmacy {
    pub pharmacy_id: String,
    pub pharmacy_name: String,
    pub address: Option<String>,
    pub pincode: i64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub contact: String,
}

impl Record for Pharmacy {
    fn key(&self) -> &str {
        &self.pharmacy_id
    }
}

impl Locatable for Pharmacy {
    const LABEL_PLURAL: &'static str = "pharmacies";

    fn postal_code(&self) -> Option<i64> {
        Some(self.pincode)
    }

    fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::from_parts(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHospitalRequest {
    pub hospital_name: String,
    pub location: String,
    pub address: Option<String>,
    pub pincode: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub contact: String,
    pub working_hours: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePharmacyRequest {
    pub pharmacy_name: String,
    pub address: Option<String>,
    pub pincode: i64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub contact: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HospitalListQuery {
    pub q: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PincodeQuery {
    pub pincode: Option<String>,
}

#[derive(Error, Debug, PartialEq)]
pub enum FacilityError {
    #[error("Hospital not found")]
    HospitalNotFound,

    #[error("Pharmacy not found")]
    PharmacyNotFound,

    #[error("Pincode is required")]
    PincodeRequired,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<FacilityError> for AppError {
    fn from(err: FacilityError) -> Self {
        match err {
            FacilityError::HospitalNotFound | FacilityError::PharmacyNotFound => {
                AppError::NotFound(err.to_string())
            }
            FacilityError::PincodeRequired => AppError::BadRequest(err.to_string()),
            FacilityError::ValidationError(msg) => AppError::ValidationError(msg),
            FacilityError::Store(e) => AppError::Conflict(e.to_string()),
        }
    }
}
