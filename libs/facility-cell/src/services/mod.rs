pub mod registry;
pub mod search;

pub use registry::FacilityService;
