use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::services::{AssociationService, DoctorService};

#[derive(Clone)]
pub struct DoctorState {
    pub doctors: Arc<DoctorService>,
    pub associations: Arc<AssociationService>,
}

pub fn doctor_routes(state: DoctorState) -> Router {
    Router::new()
        // Doctor and specialization registries
        .route("/doctors", get(handlers::list_doctors).post(handlers::create_doctor))
        .route("/doctors/{doctor_id}", get(handlers::get_doctor))
        .route(
            "/specializations",
            get(handlers::list_specializations).post(handlers::create_specialization),
        )
        // Invitation lifecycle
        .route("/associations", get(handlers::list_associations).post(handlers::invite_doctor))
        .route("/associations/{association_id}", get(handlers::get_association))
        .route("/associations/{association_id}/respond", post(handlers::respond_invitation))
        .route(
            "/associations/{association_id}/toggle-availability",
            post(handlers::toggle_availability),
        )
        .with_state(state)
}
