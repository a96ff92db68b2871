pub mod geo;
pub mod id;
pub mod test_utils;

pub use geo::{distance_km, Coordinates, EARTH_RADIUS_KM};
pub use id::generate_id;
