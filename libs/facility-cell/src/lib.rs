pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::*;
pub use router::facility_routes;
pub use services::search::{search_by_postal_code, Locatable, SearchOutcome, NEARBY_RADIUS_KM};
pub use services::FacilityService;
