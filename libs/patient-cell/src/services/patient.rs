use std::sync::Arc;

use tracing::{debug, info};

use shared_database::Table;

use crate::models::{CreatePatientRequest, Patient, PatientError, UpdatePatientRequest, MAX_MOBILE_LENGTH};

pub struct PatientService {
    patients: Arc<Table<Patient>>,
}

impl PatientService {
    pub fn new(patients: Arc<Table<Patient>>) -> Self {
        Self { patients }
    }

    pub fn patients(&self) -> Arc<Table<Patient>> {
        self.patients.clone()
    }

    pub async fn create_patient(&self, request: CreatePatientRequest) -> Result<Patient, PatientError> {
        let mobileno = validate_mobile(&request.mobileno)?;
        if request.name.trim().is_empty() {
            return Err(PatientError::ValidationError("name must not be empty".to_string()));
        }
        if request.age < 0 {
            return Err(PatientError::ValidationError("age must not be negative".to_string()));
        }

        let patient = self
            .patients
            .insert(Patient {
                mobileno,
                name: request.name,
                age: request.age,
                pincode: request.pincode,
                gender: request.gender,
            })
            .await?;

        info!("Registered patient {}", patient.mobileno);
        Ok(patient)
    }

    pub async fn get_patient(&self, mobileno: &str) -> Result<Patient, PatientError> {
        debug!("Fetching patient {}", mobileno);
        self.patients.get(mobileno).await.ok_or(PatientError::NotFound)
    }

    pub async fn list_patients(&self) -> Vec<Patient> {
        self.patients.all().await
    }

    pub async fn update_patient(
        &self,
        mobileno: &str,
        request: UpdatePatientRequest,
    ) -> Result<Patient, PatientError> {
        if request.age.is_some_and(|age| age < 0) {
            return Err(PatientError::ValidationError("age must not be negative".to_string()));
        }

        self.patients
            .update(mobileno, |patient| {
                if let Some(name) = request.name {
                    patient.name = name;
                }
                if let Some(age) = request.age {
                    patient.age = age;
                }
                if let Some(pincode) = request.pincode {
                    patient.pincode = pincode;
                }
                if let Some(gender) = request.gender {
                    patient.gender = gender;
                }
            })
            .await
            .ok_or(PatientError::NotFound)
    }
}

fn validate_mobile(raw: &str) -> Result<String, PatientError> {
    let mobile = raw.trim();
    let digits = mobile.strip_prefix('+').unwrap_or(mobile);

    if digits.is_empty() || mobile.len() > MAX_MOBILE_LENGTH || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(PatientError::ValidationError(format!("invalid mobile number: {:?}", raw)));
    }

    Ok(mobile.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn request(mobileno: &str) -> CreatePatientRequest {
        CreatePatientRequest {
            mobileno: mobileno.to_string(),
            name: "Asha".to_string(),
            age: 34,
            pincode: 560034,
            gender: "F".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_and_update() {
        let service = PatientService::new(Arc::new(Table::new("patients")));
        service.create_patient(request("9876543210")).await.unwrap();

        let updated = service
            .update_patient("9876543210", UpdatePatientRequest { age: Some(35), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(updated.age, 35);
        assert_eq!(updated.name, "Asha");
    }

    #[tokio::test]
    async fn test_duplicate_mobile_rejected() {
        let service = PatientService::new(Arc::new(Table::new("patients")));
        service.create_patient(request("9876543210")).await.unwrap();

        assert_matches!(
            service.create_patient(request(" 9876543210 ")).await,
            Err(PatientError::AlreadyRegistered(m)) if m == "9876543210"
        );
    }

    #[test]
    fn test_mobile_validation() {
        assert!(validate_mobile("+919876543210").is_ok());
        assert!(validate_mobile("98765-43210").is_err());
        assert!(validate_mobile("").is_err());
        assert!(validate_mobile("1234567890123456").is_err());
    }
}
