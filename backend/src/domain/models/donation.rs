//! Domain model for a donation.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub id: String,
    pub donor_id: String,
    pub amount: f64,
    /// School the donation was directed to, if any
    pub school_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Donation {
    /// Generate a unique donation ID from the current timestamp.
    /// Format: dn-<timestamp_ms>-<random_suffix>
    /// Example: dn-1625846400123-af3c
    pub fn generate_id(timestamp_ms: u64) -> String {
        let random_suffix = Self::generate_random_suffix(4);
        format!("dn-{}-{}", timestamp_ms, random_suffix)
    }

    /// Generate a random hex suffix for donation IDs.
    fn generate_random_suffix(len: usize) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_nanos();
        format!("{:x}", now % (16_u128.pow(len as u32)))
            .chars()
            .take(len)
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DonationValidationError {
    #[error("Donor ID cannot be empty")]
    EmptyDonorId,
    #[error("Donation amount must be positive")]
    NonPositiveAmount,
    #[error("Invalid donation date: {0}")]
    InvalidDate(String),
}
