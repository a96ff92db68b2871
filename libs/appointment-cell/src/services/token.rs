use chrono::NaiveDate;
use tracing::debug;

use shared_config::{AppConfig, TokenPolicy};

use crate::models::Appointment;

pub const NORMAL_TOKEN_PREFIX: &str = "T";
pub const URGENT_TOKEN_PREFIX: &str = "U";

/// Hands out display tokens per (association, date).
///
/// Callers must hold the appointments write lock across `allocate` and the
/// insert, otherwise two bookings can read the same count.
#[derive(Debug, Clone, Copy)]
pub struct TokenAllocator {
    policy: TokenPolicy,
    urgent_threshold: i32,
}

impl TokenAllocator {
    pub fn new(policy: TokenPolicy, urgent_threshold: i32) -> Self {
        Self {
            policy,
            urgent_threshold,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.token_policy, config.urgent_threshold)
    }

    pub fn policy(&self) -> TokenPolicy {
        self.policy
    }

    pub fn is_urgent(&self, urgency_score: i32) -> bool {
        urgency_score > self.urgent_threshold
    }

    pub fn prefix_for(&self, urgency_score: i32) -> &'static str {
        match self.policy {
            TokenPolicy::Urgency if self.is_urgent(urgency_score) => URGENT_TOKEN_PREFIX,
            _ => NORMAL_TOKEN_PREFIX,
        }
    }

    /// Next token for a booking on `doctor_instance_id` at `date`.
    pub fn allocate(
        &self,
        existing: &[Appointment],
        doctor_instance_id: &str,
        date: NaiveDate,
        urgency_score: i32,
    ) -> String {
        let prefix = self.prefix_for(urgency_score);
        let same_slot = existing.iter().filter(|a| a.is_on(doctor_instance_id, date));

        // Sequential counts every booking in the slot so it never reuses a
        // number handed out earlier under the urgency policy.
        let issued = match self.policy {
            TokenPolicy::Sequential => same_slot.count(),
            TokenPolicy::Urgency => same_slot.filter(|a| token_class(&a.token_no) == prefix).count(),
        };

        let token = format!("{}{}", prefix, issued + 1);
        debug!("Allocated token {} for {} on {}", token, doctor_instance_id, date);
        token
    }
}

/// Leading non-digit part of a token, e.g. `"U"` for `"U12"`.
pub fn token_class(token: &str) -> &str {
    let end = token.find(|c: char| c.is_ascii_digit()).unwrap_or(token.len());
    &token[..end]
}

/// Sort key ordering tokens by class, then numerically (`T2` before `T10`).
pub fn token_sort_key(token: &str) -> (&str, u64) {
    let class = token_class(token);
    let number = token[class.len()..].parse().unwrap_or(u64::MAX);
    (class, number)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
    }

    fn appointment(id: &str, association: &str, date: NaiveDate, token: &str) -> Appointment {
        Appointment {
            appointment_id: id.to_string(),
            doctor_instance_id: association.to_string(),
            patient_mobile: "9876543210".to_string(),
            appointment_date: date,
            urgency_score: 1,
            token_no: token.to_string(),
            appointment_status: "Pending".to_string(),
        }
    }

    fn book_all(allocator: TokenAllocator, scores: &[i32]) -> Vec<String> {
        let mut booked = Vec::new();
        for (i, score) in scores.iter().enumerate() {
            let token = allocator.allocate(&booked, "DH1", date(), *score);
            booked.push(appointment(&i.to_string(), "DH1", date(), &token));
        }
        booked.into_iter().map(|a| a.token_no).collect()
    }

    #[test]
    fn test_urgency_policy_partitions_counters() {
        let allocator = TokenAllocator::new(TokenPolicy::Urgency, 80);
        assert_eq!(book_all(allocator, &[50, 90, 60, 85]), vec!["T1", "U1", "T2", "U2"]);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let allocator = TokenAllocator::new(TokenPolicy::Urgency, 80);
        assert_eq!(allocator.prefix_for(80), "T");
        assert_eq!(allocator.prefix_for(81), "U");
    }

    #[test]
    fn test_sequential_policy_ignores_urgency() {
        let allocator = TokenAllocator::new(TokenPolicy::Sequential, 80);
        assert_eq!(book_all(allocator, &[50, 90, 60, 85]), vec!["T1", "T2", "T3", "T4"]);
    }

    #[test]
    fn test_counters_are_per_association_and_date() {
        let allocator = TokenAllocator::new(TokenPolicy::Urgency, 80);
        let next_day = date().succ_opt().unwrap();
        let existing = vec![
            appointment("a", "DH1", date(), "T1"),
            appointment("b", "DH2", date(), "T1"),
            appointment("c", "DH1", next_day, "T1"),
        ];

        assert_eq!(allocator.allocate(&existing, "DH1", date(), 10), "T2");
        assert_eq!(allocator.allocate(&existing, "DH3", date(), 10), "T1");
    }

    #[test]
    fn test_sequential_after_urgency_does_not_reuse_numbers() {
        let existing = vec![
            appointment("a", "DH1", date(), "T1"),
            appointment("b", "DH1", date(), "U1"),
        ];
        let allocator = TokenAllocator::new(TokenPolicy::Sequential, 80);
        assert_eq!(allocator.allocate(&existing, "DH1", date(), 10), "T3");
    }

    #[test]
    fn test_token_sort_key_is_numeric() {
        let mut tokens = vec!["T10", "U1", "T2", "T1"];
        tokens.sort_by(|a, b| token_sort_key(a).cmp(&token_sort_key(b)));
        assert_eq!(tokens, vec!["T1", "T2", "T10", "U1"]);
    }
}
