pub mod assignment;
pub mod association;
pub mod doctor;

pub use association::AssociationService;
pub use doctor::DoctorService;
