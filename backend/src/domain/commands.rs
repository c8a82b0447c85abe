//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. A REST or desktop layer is responsible for
//! mapping the public DTOs defined in the `shared` crate to these internal
//! types.

pub mod donations {
    use crate::domain::models::donation::Donation;

    /// Input for recording a new donation.
    #[derive(Debug, Clone)]
    pub struct RecordDonationCommand {
        pub donor_id: String,
        pub amount: f64,
        pub school_id: Option<String>,
        /// Optional date override (RFC 3339) - uses current time if not provided.
        pub date: Option<String>,
    }

    /// Result of recording a donation.
    #[derive(Debug, Clone)]
    pub struct RecordDonationResult {
        pub donation: Donation,
        pub success_message: String,
    }

    /// Query parameters for listing a donor's donations.
    #[derive(Debug, Clone)]
    pub struct DonationListQuery {
        pub donor_id: String,
        /// Maximum number of donations to return (most recent first).
        pub limit: Option<u32>,
    }

    /// Result of listing donations.
    #[derive(Debug, Clone)]
    pub struct DonationListResult {
        pub donations: Vec<Donation>,
    }
}

pub mod badges {
    use crate::domain::models::achievement::Achievement;
    use chrono::{DateTime, Utc};
    use shared::DonorMetrics;

    /// Input for running a badge evaluation for one donor.
    #[derive(Debug, Clone)]
    pub struct EvaluateBadgesCommand {
        pub donor_id: String,
    }

    /// Result of one badge evaluation run.
    ///
    /// `awarded_badge_ids` is every badge the current metrics satisfy, which
    /// may include badges already held from an earlier run.
    #[derive(Debug, Clone)]
    pub struct EvaluateBadgesResult {
        pub awarded_badge_ids: Vec<String>,
        pub metrics: DonorMetrics,
        pub evaluated_at: DateTime<Utc>,
    }

    /// Input for fetching a donor's recorded achievements.
    #[derive(Debug, Clone)]
    pub struct GetAchievementsCommand {
        pub donor_id: String,
    }

    /// Result of fetching achievements, most recent first.
    #[derive(Debug, Clone)]
    pub struct GetAchievementsResult {
        pub achievements: Vec<Achievement>,
    }
}
