use std::sync::Arc;

use tracing::{debug, info};

use shared_database::Table;
use shared_utils::generate_id;

use crate::models::{
    CreateDoctorRequest, CreateSpecializationRequest, Doctor, DoctorError, Specialization,
    DOCTOR_ID_PREFIX, SPECIALIZATION_ID_PREFIX,
};

pub struct DoctorService {
    doctors: Arc<Table<Doctor>>,
    specializations: Arc<Table<Specialization>>,
}

impl DoctorService {
    pub fn new(doctors: Arc<Table<Doctor>>, specializations: Arc<Table<Specialization>>) -> Self {
        Self { doctors, specializations }
    }

    /// Registers a doctor. A caller-supplied ID is kept; otherwise one is generated.
    pub async fn create_doctor(&self, request: CreateDoctorRequest) -> Result<Doctor, DoctorError> {
        if request.doctor_name.trim().is_empty() {
            return Err(DoctorError::ValidationError("doctor_name must not be empty".to_string()));
        }
        if request.experience < 0 {
            return Err(DoctorError::ValidationError("experience must not be negative".to_string()));
        }

        let requested_id = request
            .doctor_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        let doctor = self
            .doctors
            .insert_with(|existing| {
                let doctor_id = requested_id.unwrap_or_else(|| {
                    generate_id(existing.iter().map(|d| d.doctor_id.as_str()), DOCTOR_ID_PREFIX)
                });
                Ok::<_, DoctorError>(Doctor {
                    doctor_id,
                    doctor_name: request.doctor_name,
                    experience: request.experience,
                })
            })
            .await?;

        info!("Registered doctor {} ({})", doctor.doctor_id, doctor.doctor_name);
        Ok(doctor)
    }

    pub async fn get_doctor(&self, doctor_id: &str) -> Result<Doctor, DoctorError> {
        debug!("Fetching doctor {}", doctor_id);
        self.doctors.get(doctor_id).await.ok_or(DoctorError::DoctorNotFound)
    }

    pub async fn list_doctors(&self) -> Vec<Doctor> {
        self.doctors.all().await
    }

    pub async fn create_specialization(
        &self,
        request: CreateSpecializationRequest,
    ) -> Result<Specialization, DoctorError> {
        let name = request.specialization_name.trim().to_string();
        if name.is_empty() {
            return Err(DoctorError::ValidationError(
                "specialization_name must not be empty".to_string(),
            ));
        }

        let specialization = self
            .specializations
            .insert_with(|existing| {
                let specialization_id = generate_id(
                    existing.iter().map(|s| s.specialization_id.as_str()),
                    SPECIALIZATION_ID_PREFIX,
                );
                Ok::<_, DoctorError>(Specialization {
                    specialization_id,
                    specialization_name: name,
                })
            })
            .await?;

        info!("Registered specialization {}", specialization.specialization_id);
        Ok(specialization)
    }

    pub async fn list_specializations(&self) -> Vec<Specialization> {
        self.specializations.all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use shared_database::StoreError;

    fn service() -> DoctorService {
        DoctorService::new(Arc::new(Table::new("doctors")), Arc::new(Table::new("specializations")))
    }

    fn request(id: Option<&str>, name: &str) -> CreateDoctorRequest {
        CreateDoctorRequest {
            doctor_id: id.map(str::to_string),
            doctor_name: name.to_string(),
            experience: 5,
        }
    }

    #[tokio::test]
    async fn test_generated_and_supplied_ids() {
        let service = service();

        let generated = service.create_doctor(request(None, "Dr. Rao")).await.unwrap();
        assert_eq!(generated.doctor_id, "DR1");

        let supplied = service.create_doctor(request(Some("DR7"), "Dr. Iyer")).await.unwrap();
        assert_eq!(supplied.doctor_id, "DR7");

        let next = service.create_doctor(request(None, "Dr. Khan")).await.unwrap();
        assert_eq!(next.doctor_id, "DR8");
    }

    #[tokio::test]
    async fn test_supplied_id_at_integer_limit_does_not_block_generation() {
        let service = service();
        service
            .create_doctor(request(Some("DR9223372036854775807"), "Dr. Max"))
            .await
            .unwrap();

        let first = service.create_doctor(request(None, "Dr. Rao")).await.unwrap();
        let second = service.create_doctor(request(None, "Dr. Iyer")).await.unwrap();
        assert_eq!(first.doctor_id, "DR1");
        assert_eq!(second.doctor_id, "DR2");
    }

    #[tokio::test]
    async fn test_duplicate_doctor_id_conflicts() {
        let service = service();
        service.create_doctor(request(Some("DOC-A"), "Dr. Rao")).await.unwrap();

        assert_matches!(
            service.create_doctor(request(Some("DOC-A"), "Dr. Rao")).await,
            Err(DoctorError::Store(StoreError::DuplicateKey { .. }))
        );
    }

    #[tokio::test]
    async fn test_specializations() {
        let service = service();
        let cardio = service
            .create_specialization(CreateSpecializationRequest { specialization_name: "Cardiology".into() })
            .await
            .unwrap();
        assert_eq!(cardio.specialization_id, "SP1");

        assert_matches!(
            service
                .create_specialization(CreateSpecializationRequest { specialization_name: " ".into() })
                .await,
            Err(DoctorError::ValidationError(_))
        );
        assert_eq!(service.list_specializations().await.len(), 1);
    }
}
