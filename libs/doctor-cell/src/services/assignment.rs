use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::models::{AssignmentPolicy, DoctorHospital};

/// Accepted, available associations at `hospital_id`, in store order.
pub fn bookable_at<'a>(associations: &'a [DoctorHospital], hospital_id: &str) -> Vec<&'a DoctorHospital> {
    associations
        .iter()
        .filter(|a| a.hospital_id == hospital_id && a.is_bookable())
        .collect()
}

/// Greedy minimum-load pick over same-day counts only.
///
/// Ties go to the earliest candidate, i.e. store insertion order.
pub fn select_least_loaded<'a, F>(candidates: &[&'a DoctorHospital], same_day_load: F) -> Option<&'a DoctorHospital>
where
    F: Fn(&DoctorHospital) -> usize,
{
    candidates
        .iter()
        .copied()
        .map(|candidate| (same_day_load(candidate), candidate))
        .inspect(|(load, candidate)| debug!("{} has {} appointments", candidate.doctor_instance_id, load))
        .min_by_key(|(load, _)| *load)
        .map(|(_, candidate)| candidate)
}

pub fn select_random<'a, R>(candidates: &[&'a DoctorHospital], rng: &mut R) -> Option<&'a DoctorHospital>
where
    R: Rng + ?Sized,
{
    candidates.choose(rng).copied()
}

/// Picks a doctor for a booking at `hospital_id`, or `None` when nobody is bookable there.
pub fn assign_doctor<'a, F>(
    associations: &'a [DoctorHospital],
    hospital_id: &str,
    policy: AssignmentPolicy,
    same_day_load: F,
) -> Option<&'a DoctorHospital>
where
    F: Fn(&DoctorHospital) -> usize,
{
    let candidates = bookable_at(associations, hospital_id);

    match policy {
        AssignmentPolicy::LeastLoaded => select_least_loaded(&candidates, same_day_load),
        AssignmentPolicy::RandomPool => select_random(&candidates, &mut rand::thread_rng()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn association(id: &str, hospital_id: &str, accepted: bool, available: bool) -> DoctorHospital {
        DoctorHospital {
            doctor_instance_id: id.to_string(),
            doctor_id: format!("DR-{id}"),
            hospital_id: hospital_id.to_string(),
            specialization_id: "SP1".to_string(),
            fees: "500".to_string(),
            working_hours: "9-5".to_string(),
            is_available: available,
            is_accepted: accepted,
        }
    }

    fn loads(pairs: &[(&str, usize)]) -> HashMap<String, usize> {
        pairs.iter().map(|(id, n)| (id.to_string(), *n)).collect()
    }

    #[test]
    fn test_picks_minimum_same_day_load() {
        let associations = vec![
            association("DH1", "H1", true, true),
            association("DH2", "H1", true, true),
            association("DH3", "H1", true, true),
        ];
        let counts = loads(&[("DH1", 2), ("DH2", 0), ("DH3", 5)]);

        let chosen = assign_doctor(&associations, "H1", AssignmentPolicy::LeastLoaded, |a| {
            counts[&a.doctor_instance_id]
        });
        assert_eq!(chosen.unwrap().doctor_instance_id, "DH2");
    }

    #[test]
    fn test_ties_go_to_earliest_association() {
        let associations = vec![
            association("DH4", "H1", true, true),
            association("DH5", "H1", true, true),
        ];

        let chosen = assign_doctor(&associations, "H1", AssignmentPolicy::LeastLoaded, |_| 1);
        assert_eq!(chosen.unwrap().doctor_instance_id, "DH4");
    }

    #[test]
    fn test_only_bookable_associations_at_the_hospital() {
        let associations = vec![
            association("DH1", "H1", false, true),
            association("DH2", "H1", true, false),
            association("DH3", "H2", true, true),
        ];

        assert!(bookable_at(&associations, "H1").is_empty());
        assert!(assign_doctor(&associations, "H1", AssignmentPolicy::LeastLoaded, |_| 0).is_none());
        assert!(assign_doctor(&associations, "H1", AssignmentPolicy::RandomPool, |_| 0).is_none());
        assert_eq!(
            assign_doctor(&associations, "H2", AssignmentPolicy::RandomPool, |_| 0)
                .unwrap()
                .doctor_instance_id,
            "DH3"
        );
    }

    #[test]
    fn test_random_pool_stays_within_candidates() {
        let associations = vec![
            association("DH1", "H1", true, true),
            association("DH2", "H1", true, true),
            association("DH3", "H1", false, true),
        ];
        let candidates = bookable_at(&associations, "H1");
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let chosen = select_random(&candidates, &mut rng).unwrap();
            assert_ne!(chosen.doctor_instance_id, "DH3");
        }
    }
}
