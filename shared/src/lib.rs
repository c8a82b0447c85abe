use serde::{Deserialize, Serialize};

/// Donation ID in format: "dn-<epoch_millis>-<random_suffix>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub id: String,
    /// ID of the donor this donation belongs to
    pub donor_id: String,
    /// Human-readable timestamp with timezone (RFC 3339)
    pub date: String,
    /// Donation amount
    pub amount: f64,
    /// School the donation was directed to, if any
    pub school_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDonationRequest {
    /// ID of the donor making the donation
    pub donor_id: String,
    /// Donation amount (must be positive)
    pub amount: f64,
    /// School the donation is directed to, if any
    pub school_id: Option<String>,
    /// Optional date override (RFC 3339) - uses current time if not provided
    pub date: Option<String>,
}

/// A badge a donor has earned, with the time it was first recorded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub donor_id: String,
    pub badge_id: String,
    /// When the achievement was recorded (RFC 3339)
    pub achieved_at: String,
}

/// Derived metrics computed from a donor's full donation history.
///
/// Computed fresh on every badge evaluation and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DonorMetrics {
    /// Total number of donations ever made
    pub donation_count: u32,
    /// Number of distinct schools donated to
    pub distinct_schools: u32,
    /// Longest run of consecutive UTC calendar days with at least one donation
    pub best_streak_days: u32,
    /// Sum of all donation amounts
    pub total_amount: f64,
}

/// Result of one badge evaluation run, for "congratulations" UI.
///
/// `awarded_badge_ids` lists every badge the donor's current metrics satisfy,
/// which may include badges already held from an earlier run. Frontends that
/// only want genuinely new badges should diff against the achievements they
/// already know about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeEvaluation {
    pub donor_id: String,
    pub awarded_badge_ids: Vec<String>,
    pub metrics: DonorMetrics,
    /// When the evaluation ran (RFC 3339)
    pub evaluated_at: String,
}
