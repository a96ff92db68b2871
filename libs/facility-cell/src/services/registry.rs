use std::sync::Arc;

use tracing::{debug, info};

use shared_database::Table;
use shared_utils::generate_id;

use crate::models::{
    CreateHospitalRequest, CreatePharmacyRequest, FacilityError, Hospital, Pharmacy,
    HOSPITAL_ID_PREFIX, PHARMACY_ID_PREFIX,
};
use crate::services::search::{search_by_postal_code, SearchOutcome};

/// Hospitals and pharmacies, plus the postal-code search over both.
pub struct FacilityService {
    hospitals: Arc<Table<Hospital>>,
    pharmacies: Arc<Table<Pharmacy>>,
}

impl FacilityService {
    pub fn new(hospitals: Arc<Table<Hospital>>, pharmacies: Arc<Table<Pharmacy>>) -> Self {
        Self { hospitals, pharmacies }
    }

    pub fn hospitals(&self) -> Arc<Table<Hospital>> {
        self.hospitals.clone()
    }

    pub fn pharmacies(&self) -> Arc<Table<Pharmacy>> {
        self.pharmacies.clone()
    }

    // ==============================================================================
    // HOSPITALS
    // ==============================================================================

    pub async fn create_hospital(&self, request: CreateHospitalRequest) -> Result<Hospital, FacilityError> {
        require_name(&request.hospital_name, "hospital_name")?;
        validate_coordinates(request.latitude, request.longitude)?;

        let hospital = self
            .hospitals
            .insert_with(|existing| {
                let hospital_id = generate_id(existing.iter().map(|h| h.hospital_id.as_str()), HOSPITAL_ID_PREFIX);
                Ok::<_, FacilityError>(Hospital {
                    hospital_id,
                    hospital_name: request.hospital_name,
                    location: request.location,
                    address: request.address,
                    pincode: request.pincode,
                    latitude: request.latitude,
                    longitude: request.longitude,
                    contact: request.contact,
                    working_hours: request.working_hours,
                })
            })
            .await?;

        info!("Registered hospital {} ({})", hospital.hospital_id, hospital.hospital_name);
        Ok(hospital)
    }

    pub async fn get_hospital(&self, hospital_id: &str) -> Result<Hospital, FacilityError> {
        self.hospitals
            .get(hospital_id)
            .await
            .ok_or(FacilityError::HospitalNotFound)
    }

    /// Lists hospitals, optionally narrowed by a case-insensitive match on name,
    /// address or pincode.
    pub async fn list_hospitals(&self, query: Option<&str>) -> Vec<Hospital> {
        let needle = match query.map(str::trim) {
            Some(q) if !q.is_empty() => q.to_lowercase(),
            _ => return self.hospitals.all().await,
        };

        debug!("Filtering hospitals by {:?}", needle);

        self.hospitals
            .filter(|h| {
                h.hospital_name.to_lowercase().contains(&needle)
                    || h.address.as_deref().is_some_and(|a| a.to_lowercase().contains(&needle))
                    || h.pincode.is_some_and(|p| p.to_string().contains(&needle))
            })
            .await
    }

    /// Hospitals at `pincode`, or near it, using pharmacies to locate codes no hospital sits at.
    pub async fn search_hospitals(&self, pincode: Option<&str>) -> Result<SearchOutcome<Hospital>, FacilityError> {
        let pincode = pincode.filter(|p| !p.is_empty()).ok_or(FacilityError::PincodeRequired)?;

        let hospitals = self.hospitals.all().await;
        let pharmacies = self.pharmacies.all().await;

        Ok(search_by_postal_code(&hospitals, Some(pincode), Some(&pharmacies[..])))
    }

    // ==============================================================================
    // PHARMACIES
    // ==============================================================================

    pub async fn create_pharmacy(&self, request: CreatePharmacyRequest) -> Result<Pharmacy, FacilityError> {
        require_name(&request.pharmacy_name, "pharmacy_name")?;
        validate_coordinates(request.latitude, request.longitude)?;

        let pharmacy = self
            .pharmacies
            .insert_with(|existing| {
                let pharmacy_id = generate_id(existing.iter().map(|p| p.pharmacy_id.as_str()), PHARMACY_ID_PREFIX);
                Ok::<_, FacilityError>(Pharmacy {
                    pharmacy_id,
                    pharmacy_name: request.pharmacy_name,
                    address: request.address,
                    pincode: request.pincode,
                    latitude: request.latitude,
                    longitude: request.longitude,
                    contact: request.contact,
                })
            })
            .await?;

        info!("Registered pharmacy {} ({})", pharmacy.pharmacy_id, pharmacy.pharmacy_name);
        Ok(pharmacy)
    }

    pub async fn get_pharmacy(&self, pharmacy_id: &str) -> Result<Pharmacy, FacilityError> {
        self.pharmacies
            .get(pharmacy_id)
            .await
            .ok_or(FacilityError::PharmacyNotFound)
    }

    pub async fn list_pharmacies(&self) -> Vec<Pharmacy> {
        self.pharmacies.all().await
    }

    /// Pharmacies at `pincode`, or near it, using hospitals to locate codes no pharmacy sits at.
    pub async fn search_pharmacies(&self, pincode: Option<&str>) -> Result<SearchOutcome<Pharmacy>, FacilityError> {
        let pincode = pincode.filter(|p| !p.is_empty()).ok_or(FacilityError::PincodeRequired)?;

        let pharmacies = self.pharmacies.all().await;
        let hospitals = self.hospitals.all().await;

        Ok(search_by_postal_code(&pharmacies, Some(pincode), Some(&hospitals[..])))
    }
}

fn require_name(value: &str, field: &str) -> Result<(), FacilityError> {
    if value.trim().is_empty() {
        return Err(FacilityError::ValidationError(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn validate_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<(), FacilityError> {
    if let Some(lat) = latitude {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(FacilityError::ValidationError(format!("latitude {} out of range", lat)));
        }
    }
    if let Some(lon) = longitude {
        if !(-180.0..=180.0).contains(&lon) {
            return Err(FacilityError::ValidationError(format!("longitude {} out of range", lon)));
        }
    }
    Ok(())
}
