use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::{Record, StoreError};
use shared_models::error::AppError;

pub const DOCTOR_ID_PREFIX: &str = "DR";
pub const SPECIALIZATION_ID_PREFIX: &str = "SP";
pub const ASSOCIATION_ID_PREFIX: &str = "DH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub doctor_id: String,
    pub doctor_name: String,
    pub experience: i32,
}

impl Record for Doctor {
    fn key(&self) -> &str {
        &self.doctor_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specialization {
    pub specialization_id: String,
    pub specialization_name: String,
}

impl Record for Specialization {
    fn key(&self) -> &str {
        &self.specialization_id
    }
}

/// A doctor practising at a hospital.
///
/// Starts as a pending invitation (`is_accepted == false`). Rejected invitations
/// are deleted rather than kept around.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorHospital {
    pub doctor_instance_id: String,
    pub doctor_id: String,
    pub hospital_id: String,
    pub specialization_id: String,
    pub fees: String,
    pub working_hours: String,
    pub is_available: bool,
    pub is_accepted: bool,
}

impl DoctorHospital {
    /// Accepted and currently taking patients.
    pub fn is_bookable(&self) -> bool {
        self.is_accepted && self.is_available
    }
}

impl Record for DoctorHospital {
    fn key(&self) -> &str {
        &self.doctor_instance_id
    }
}

/// How a doctor is picked from a hospital's bookable associations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentPolicy {
    /// Fewest appointments on the requested date.
    LeastLoaded,
    /// Uniform random pick, ignoring load.
    RandomPool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub doctor_id: Option<String>,
    pub doctor_name: String,
    pub experience: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSpecializationRequest {
    pub specialization_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteDoctorRequest {
    pub doctor_id: String,
    pub hospital_id: String,
    pub specialization_id: String,
    pub fees: String,
    pub working_hours: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondInvitationRequest {
    pub accept: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssociationFilters {
    pub specialization_id: Option<String>,
    pub doctor_id: Option<String>,
    pub hospital_id: Option<String>,
    pub pending: Option<bool>,
}

impl AssociationFilters {
    pub fn matches(&self, association: &DoctorHospital) -> bool {
        self.specialization_id
            .as_ref()
            .map_or(true, |id| &association.specialization_id == id)
            && self.doctor_id.as_ref().map_or(true, |id| &association.doctor_id == id)
            && self.hospital_id.as_ref().map_or(true, |id| &association.hospital_id == id)
            && self.pending.map_or(true, |pending| association.is_accepted != pending)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum DoctorError {
    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Hospital not found")]
    HospitalNotFound,

    #[error("Specialization not found")]
    SpecializationNotFound,

    #[error("Association not found")]
    AssociationNotFound,

    #[error("Doctor {doctor_id} is already associated with hospital {hospital_id}")]
    AlreadyAssociated { doctor_id: String, hospital_id: String },

    #[error("Invitation has already been accepted")]
    InvitationAlreadyAccepted,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DoctorError> for AppError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::DoctorNotFound
            | DoctorError::HospitalNotFound
            | DoctorError::SpecializationNotFound
            | DoctorError::AssociationNotFound => AppError::NotFound(err.to_string()),
            DoctorError::AlreadyAssociated { .. } | DoctorError::InvitationAlreadyAccepted => {
                AppError::Conflict(err.to_string())
            }
            DoctorError::ValidationError(msg) => AppError::ValidationError(msg),
            DoctorError::Store(e) => AppError::Conflict(e.to_string()),
        }
    }
}
