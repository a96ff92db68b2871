use std::sync::Arc;

use tracing::{info, warn};

use facility_cell::Hospital;
use shared_database::{RowAction, Table};
use shared_utils::generate_id;

use crate::models::{
    AssociationFilters, Doctor, DoctorError, DoctorHospital, InviteDoctorRequest, Specialization,
    ASSOCIATION_ID_PREFIX,
};

/// Invitation lifecycle of doctor-hospital associations.
///
/// invite -> pending; respond(accept) -> accepted; respond(reject) -> deleted;
/// toggle_availability flips `is_available` at any point.
pub struct AssociationService {
    associations: Arc<Table<DoctorHospital>>,
    doctors: Arc<Table<Doctor>>,
    hospitals: Arc<Table<Hospital>>,
    specializations: Arc<Table<Specialization>>,
}

impl AssociationService {
    pub fn new(
        associations: Arc<Table<DoctorHospital>>,
        doctors: Arc<Table<Doctor>>,
        hospitals: Arc<Table<Hospital>>,
        specializations: Arc<Table<Specialization>>,
    ) -> Self {
        Self {
            associations,
            doctors,
            hospitals,
            specializations,
        }
    }

    pub fn associations(&self) -> Arc<Table<DoctorHospital>> {
        self.associations.clone()
    }

    /// Hospital-initiated invitation; the doctor has to accept before taking bookings.
    pub async fn invite(&self, request: InviteDoctorRequest) -> Result<DoctorHospital, DoctorError> {
        if !self.doctors.contains(&request.doctor_id).await {
            return Err(DoctorError::DoctorNotFound);
        }
        if !self.hospitals.contains(&request.hospital_id).await {
            return Err(DoctorError::HospitalNotFound);
        }
        if !self.specializations.contains(&request.specialization_id).await {
            return Err(DoctorError::SpecializationNotFound);
        }

        let association = self
            .associations
            .insert_with(|existing| {
                let duplicate = existing
                    .iter()
                    .any(|a| a.doctor_id == request.doctor_id && a.hospital_id == request.hospital_id);
                if duplicate {
                    return Err(DoctorError::AlreadyAssociated {
                        doctor_id: request.doctor_id.clone(),
                        hospital_id: request.hospital_id.clone(),
                    });
                }

                Ok(DoctorHospital {
                    doctor_instance_id: generate_id(
                        existing.iter().map(|a| a.doctor_instance_id.as_str()),
                        ASSOCIATION_ID_PREFIX,
                    ),
                    doctor_id: request.doctor_id,
                    hospital_id: request.hospital_id,
                    specialization_id: request.specialization_id,
                    fees: request.fees,
                    working_hours: request.working_hours,
                    is_available: true,
                    is_accepted: false,
                })
            })
            .await?;

        info!(
            "Hospital {} invited doctor {} as {}",
            association.hospital_id, association.doctor_id, association.doctor_instance_id
        );
        Ok(association)
    }

    /// Accepts (returns the updated association) or rejects (deletes it, returns `None`).
    pub async fn respond(
        &self,
        association_id: &str,
        accept: bool,
    ) -> Result<Option<DoctorHospital>, DoctorError> {
        let (association, action) = self
            .associations
            .modify(association_id, |a| {
                if a.is_accepted {
                    return Err(DoctorError::InvitationAlreadyAccepted);
                }
                if accept {
                    a.is_accepted = true;
                    Ok(RowAction::Keep)
                } else {
                    Ok(RowAction::Remove)
                }
            })
            .await
            .ok_or(DoctorError::AssociationNotFound)?
            .inspect_err(|_| warn!("Ignoring response to already accepted invitation {}", association_id))?;

        match action {
            RowAction::Keep => {
                info!("Doctor {} accepted invitation {}", association.doctor_id, association_id);
                Ok(Some(association))
            }
            RowAction::Remove => {
                info!("Doctor {} rejected invitation {}", association.doctor_id, association_id);
                Ok(None)
            }
        }
    }

    pub async fn toggle_availability(&self, association_id: &str) -> Result<DoctorHospital, DoctorError> {
        let updated = self
            .associations
            .update(association_id, |a| a.is_available = !a.is_available)
            .await
            .ok_or(DoctorError::AssociationNotFound)?;

        info!(
            "Association {} is now {}",
            association_id,
            if updated.is_available { "available" } else { "unavailable" }
        );
        Ok(updated)
    }

    pub async fn get(&self, association_id: &str) -> Result<DoctorHospital, DoctorError> {
        self.associations
            .get(association_id)
            .await
            .ok_or(DoctorError::AssociationNotFound)
    }

    pub async fn list(&self, filters: &AssociationFilters) -> Vec<DoctorHospital> {
        self.associations.filter(|a| filters.matches(a)).await
    }
}
