use serde::Serialize;
use tracing::debug;

use shared_utils::Coordinates;

/// Radius of the nearby fallback search.
pub const NEARBY_RADIUS_KM: f64 = 50.0;

pub const INVALID_PINCODE_MESSAGE: &str = "Invalid pincode format.";

/// Anything that sits at a postal code and may have a map position.
pub trait Locatable {
    /// Plural noun used in user-facing search messages.
    const LABEL_PLURAL: &'static str;

    fn postal_code(&self) -> Option<i64>;

    /// `None` unless both latitude and longitude are known.
    fn coordinates(&self) -> Option<Coordinates>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome<T> {
    pub results: Vec<T>,
    pub message: String,
}

impl<T> SearchOutcome<T> {
    fn new(results: Vec<T>, message: impl Into<String>) -> Self {
        Self {
            results,
            message: message.into(),
        }
    }
}

/// Exact postal-code match first, then everything within [`NEARBY_RADIUS_KM`] of the code.
///
/// The reference point for the nearby search comes from the first geolocatable
/// entity at `target_code` in `collection`, else in `fallback`. Results keep
/// collection order for exact matches and ascending distance for nearby ones.
pub fn search_by_postal_code<T, R>(
    collection: &[T],
    target_code: Option<&str>,
    fallback: Option<&[R]>,
) -> SearchOutcome<T>
where
    T: Locatable + Clone,
    R: Locatable,
{
    let raw = match target_code {
        Some(raw) if !raw.is_empty() => raw,
        _ => return SearchOutcome::new(collection.to_vec(), ""),
    };

    let code: i64 = match raw.trim().parse() {
        Ok(code) => code,
        Err(_) => {
            debug!("Rejecting pincode {:?}", raw);
            return SearchOutcome::new(Vec::new(), INVALID_PINCODE_MESSAGE);
        }
    };

    let exact: Vec<T> = collection
        .iter()
        .filter(|entity| entity.postal_code() == Some(code))
        .cloned()
        .collect();

    if !exact.is_empty() {
        return SearchOutcome::new(exact, "");
    }

    let label = T::LABEL_PLURAL;
    let mut message = format!(
        "No {label} found exactly at this pincode. Searching for nearby {label}."
    );

    let reference = reference_point(collection, code)
        .or_else(|| fallback.and_then(|entities| reference_point(entities, code)));

    let Some(reference) = reference else {
        message.push_str(&format!(
            " Could not determine location for this pincode to find nearby {label}."
        ));
        return SearchOutcome::new(Vec::new(), message);
    };

    let mut nearby: Vec<(f64, &T)> = collection
        .iter()
        .filter_map(|entity| {
            let distance = reference.distance_to(&entity.coordinates()?);
            (distance <= NEARBY_RADIUS_KM).then_some((distance, entity))
        })
        .collect();

    // Stable, so equal distances keep collection order.
    nearby.sort_by(|a, b| a.0.total_cmp(&b.0));

    debug!("Found {} nearby {} for pincode {}", nearby.len(), label, code);

    SearchOutcome::new(
        nearby.into_iter().map(|(_, entity)| entity.clone()).collect(),
        message,
    )
}

fn reference_point<E: Locatable>(entities: &[E], code: i64) -> Option<Coordinates> {
    entities
        .iter()
        .filter(|entity| entity.postal_code() == Some(code))
        .find_map(|entity| entity.coordinates())
}
