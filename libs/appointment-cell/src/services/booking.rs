// libs/appointment-cell/src/services/booking.rs
use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use doctor_cell::services::assignment::{assign_doctor, bookable_at};
use doctor_cell::{AssignmentPolicy, DoctorHospital};
use patient_cell::Patient;
use shared_config::AppConfig;
use shared_database::Table;

use crate::models::{
    Appointment, AppointmentError, AppointmentFilters, AppointmentView, BookAppointmentRequest,
    DEFAULT_STATUS, DEFAULT_URGENCY_SCORE,
};
use crate::services::token::{token_sort_key, TokenAllocator};

/// A booking request with every required field present.
#[derive(Debug)]
struct ValidatedBooking {
    hospital_id: String,
    patient_mobile: String,
    appointment_date: NaiveDate,
    urgency_score: i32,
}

impl TryFrom<BookAppointmentRequest> for ValidatedBooking {
    type Error = AppointmentError;

    fn try_from(request: BookAppointmentRequest) -> Result<Self, Self::Error> {
        let present = |value: Option<String>| value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        match (
            present(request.hospital_id),
            present(request.patient_mobile),
            request.appointment_date,
        ) {
            (Some(hospital_id), Some(patient_mobile), Some(appointment_date)) => Ok(Self {
                hospital_id,
                patient_mobile,
                appointment_date,
                urgency_score: request.urgency_score.unwrap_or(DEFAULT_URGENCY_SCORE),
            }),
            _ => Err(AppointmentError::MissingFields),
        }
    }
}

pub struct BookingService {
    appointments: Arc<Table<Appointment>>,
    associations: Arc<Table<DoctorHospital>>,
    patients: Arc<Table<Patient>>,
    tokens: TokenAllocator,
}

impl BookingService {
    pub fn new(
        config: &AppConfig,
        appointments: Arc<Table<Appointment>>,
        associations: Arc<Table<DoctorHospital>>,
        patients: Arc<Table<Patient>>,
    ) -> Self {
        Self {
            appointments,
            associations,
            patients,
            tokens: TokenAllocator::from_config(config),
        }
    }

    pub fn appointments(&self) -> Arc<Table<Appointment>> {
        self.appointments.clone()
    }

    pub fn tokens(&self) -> TokenAllocator {
        self.tokens
    }

    // ==============================================================================
    // BOOKING
    // ==============================================================================

    /// Books at a hospital with the doctor carrying the fewest appointments that day.
    pub async fn book_hospital_appointment(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        self.book(request, AssignmentPolicy::LeastLoaded).await
    }

    /// Books with a doctor drawn at random from the hospital's bookable pool.
    pub async fn create_appointment(&self, request: BookAppointmentRequest) -> Result<Appointment, AppointmentError> {
        self.book(request, AssignmentPolicy::RandomPool).await
    }

    /// Preview of who would be assigned right now. Booking repeats this under the lock.
    pub async fn assign_doctor(
        &self,
        hospital_id: &str,
        date: NaiveDate,
        policy: AssignmentPolicy,
    ) -> Result<DoctorHospital, AppointmentError> {
        let associations = self.associations.all().await;
        let appointments = self.appointments.all().await;

        assign_doctor(&associations, hospital_id, policy, |candidate| {
            same_day_load(&appointments, candidate, date)
        })
        .cloned()
        .ok_or(AppointmentError::NoDoctorsAvailable)
    }

    async fn book(
        &self,
        request: BookAppointmentRequest,
        policy: AssignmentPolicy,
    ) -> Result<Appointment, AppointmentError> {
        let booking = ValidatedBooking::try_from(request)?;
        info!(
            "Booking at hospital {} for {} on {} ({:?})",
            booking.hospital_id, booking.patient_mobile, booking.appointment_date, policy
        );

        if !self.patients.contains(&booking.patient_mobile).await {
            warn!("Booking rejected, unknown patient {}", booking.patient_mobile);
            return Err(AppointmentError::PatientNotFound);
        }

        let associations = self.associations.all().await;
        if bookable_at(&associations, &booking.hospital_id).is_empty() {
            warn!("No bookable doctors at hospital {}", booking.hospital_id);
            return Err(AppointmentError::NoDoctorsAvailable);
        }

        let appointment = self
            .appointments
            .insert_with(|existing| {
                let chosen = assign_doctor(&associations, &booking.hospital_id, policy, |candidate| {
                    same_day_load(existing, candidate, booking.appointment_date)
                })
                .ok_or(AppointmentError::NoDoctorsAvailable)?;

                let token_no = self.tokens.allocate(
                    existing,
                    &chosen.doctor_instance_id,
                    booking.appointment_date,
                    booking.urgency_score,
                );

                Ok::<_, AppointmentError>(Appointment {
                    appointment_id: Uuid::new_v4().to_string(),
                    doctor_instance_id: chosen.doctor_instance_id.clone(),
                    patient_mobile: booking.patient_mobile.clone(),
                    appointment_date: booking.appointment_date,
                    urgency_score: booking.urgency_score,
                    token_no,
                    appointment_status: DEFAULT_STATUS.to_string(),
                })
            })
            .await?;

        info!(
            "Booked appointment {} with {} as token {}",
            appointment.appointment_id, appointment.doctor_instance_id, appointment.token_no
        );
        Ok(appointment)
    }

    // ==============================================================================
    // QUERIES
    // ==============================================================================

    pub async fn get_appointment(&self, appointment_id: &str) -> Result<Appointment, AppointmentError> {
        self.appointments
            .get(appointment_id)
            .await
            .ok_or(AppointmentError::NotFound)
    }

    /// Filtered listing, most urgent first, then by token.
    pub async fn list_appointments(&self, filters: &AppointmentFilters) -> Vec<AppointmentView> {
        debug!("Listing appointments with filters {:?}", filters);

        let mut views: Vec<AppointmentView> = self
            .joined()
            .await
            .into_iter()
            .filter(|view| matches_filters(view, filters))
            .collect();

        views.sort_by(|a, b| {
            b.appointment
                .urgency_score
                .cmp(&a.appointment.urgency_score)
                .then_with(|| token_sort_key(&a.appointment.token_no).cmp(&token_sort_key(&b.appointment.token_no)))
        });
        views
    }

    /// All appointments at one hospital, newest date first, then by token.
    pub async fn list_hospital_appointments(&self, hospital_id: &str) -> Vec<AppointmentView> {
        let mut views: Vec<AppointmentView> = self
            .joined()
            .await
            .into_iter()
            .filter(|view| view.hospital_id.as_deref() == Some(hospital_id))
            .collect();

        views.sort_by(|a, b| {
            b.appointment
                .appointment_date
                .cmp(&a.appointment.appointment_date)
                .then_with(|| token_sort_key(&a.appointment.token_no).cmp(&token_sort_key(&b.appointment.token_no)))
        });
        views
    }

    /// Changes the status only; the token stays as issued.
    pub async fn update_status(&self, appointment_id: &str, status: &str) -> Result<Appointment, AppointmentError> {
        let status = status.trim();
        if status.is_empty() {
            return Err(AppointmentError::ValidationError(
                "appointment_status must not be empty".to_string(),
            ));
        }

        let updated = self
            .appointments
            .update(appointment_id, |appointment| {
                appointment.appointment_status = status.to_string();
            })
            .await
            .ok_or(AppointmentError::NotFound)?;

        info!("Appointment {} is now {}", updated.appointment_id, updated.appointment_status);
        Ok(updated)
    }

    async fn joined(&self) -> Vec<AppointmentView> {
        let associations: HashMap<String, DoctorHospital> = self
            .associations
            .all()
            .await
            .into_iter()
            .map(|a| (a.doctor_instance_id.clone(), a))
            .collect();

        self.appointments
            .all()
            .await
            .into_iter()
            .map(|appointment| {
                let association = associations.get(&appointment.doctor_instance_id);
                AppointmentView {
                    doctor_id: association.map(|a| a.doctor_id.clone()),
                    hospital_id: association.map(|a| a.hospital_id.clone()),
                    appointment,
                }
            })
            .collect()
    }
}

fn same_day_load(appointments: &[Appointment], candidate: &DoctorHospital, date: NaiveDate) -> usize {
    appointments
        .iter()
        .filter(|a| a.is_on(&candidate.doctor_instance_id, date))
        .count()
}

fn matches_filters(view: &AppointmentView, filters: &AppointmentFilters) -> bool {
    let appointment = &view.appointment;

    filters
        .patient_mobile
        .as_deref()
        .map_or(true, |mobile| appointment.patient_mobile == mobile)
        && filters
            .doctor_id
            .as_deref()
            .map_or(true, |doctor_id| view.doctor_id.as_deref() == Some(doctor_id))
        && filters
            .hospital_id
            .as_deref()
            .map_or(true, |hospital_id| view.hospital_id.as_deref() == Some(hospital_id))
        && filters
            .appointment_date
            .map_or(true, |date| appointment.appointment_date == date)
}
