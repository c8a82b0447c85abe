//! Donation recording domain logic.
//!
//! Donations are the raw material the badge evaluator works from: this
//! service validates and stores them, and is the natural place for callers to
//! hook a badge evaluation run after a new donation lands.

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::info;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::commands::donations::{
    DonationListQuery, DonationListResult, RecordDonationCommand, RecordDonationResult,
};
use crate::domain::models::donation::{Donation, DonationValidationError};
use crate::storage::csv::{CsvConnection, DonationRepository};
use crate::storage::DonationStorage;

/// Service for recording and listing donations
#[derive(Clone)]
pub struct DonationService {
    donation_repository: DonationRepository,
}

impl DonationService {
    /// Create a new DonationService
    pub fn new(csv_conn: Arc<CsvConnection>) -> Self {
        Self {
            donation_repository: DonationRepository::new((*csv_conn).clone()),
        }
    }

    /// Record a new donation for a donor
    pub fn record_donation(&self, command: RecordDonationCommand) -> Result<RecordDonationResult> {
        info!(
            "Recording donation for donor {}: ${:.2}",
            command.donor_id, command.amount
        );

        if command.donor_id.trim().is_empty() {
            return Err(DonationValidationError::EmptyDonorId.into());
        }
        if command.amount <= 0.0 {
            return Err(DonationValidationError::NonPositiveAmount.into());
        }

        let created_at: DateTime<Utc> = match &command.date {
            Some(date) => DateTime::parse_from_rfc3339(date)
                .map_err(|e| DonationValidationError::InvalidDate(e.to_string()))?
                .with_timezone(&Utc),
            None => Utc::now(),
        };

        let now_millis = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64;
        let donation = Donation {
            id: Donation::generate_id(now_millis),
            donor_id: command.donor_id.trim().to_string(),
            amount: command.amount,
            school_id: command.school_id.filter(|s| !s.trim().is_empty()),
            created_at,
        };

        self.donation_repository.store_donation(&donation)?;

        info!("Successfully recorded donation: {}", donation.id);

        Ok(RecordDonationResult {
            donation,
            success_message: "Donation recorded successfully".to_string(),
        })
    }

    /// List a donor's donations, most recent first, with an optional limit
    pub fn list_donations(&self, query: DonationListQuery) -> Result<DonationListResult> {
        let mut donations = self.donation_repository.list_donations(&query.donor_id)?;

        // Repository returns chronological order; callers want newest first.
        donations.reverse();
        if let Some(limit) = query.limit {
            donations.truncate(limit as usize);
        }

        Ok(DonationListResult { donations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;

    fn create_test_service() -> (DonationService, TestEnvironment) {
        let env = TestEnvironment::new().expect("Failed to create test environment");
        let service = DonationService::new(Arc::new(env.connection.clone()));
        (service, env)
    }

    #[test]
    fn test_record_and_list_donation() {
        let (service, _env) = create_test_service();

        let result = service
            .record_donation(RecordDonationCommand {
                donor_id: "donor-1".to_string(),
                amount: 25.0,
                school_id: Some("school-a".to_string()),
                date: Some("2024-04-01T12:00:00Z".to_string()),
            })
            .expect("Failed to record donation");

        assert_eq!(result.donation.amount, 25.0);
        assert_eq!(result.donation.school_id.as_deref(), Some("school-a"));
        assert!(result.donation.id.starts_with("dn-"));

        let listed = service
            .list_donations(DonationListQuery {
                donor_id: "donor-1".to_string(),
                limit: None,
            })
            .expect("Failed to list donations");
        assert_eq!(listed.donations.len(), 1);
        assert_eq!(listed.donations[0].id, result.donation.id);
    }

    #[test]
    fn test_list_returns_most_recent_first_with_limit() {
        let (service, _env) = create_test_service();

        for (date, amount) in [
            ("2024-04-01T12:00:00Z", 10.0),
            ("2024-04-02T12:00:00Z", 20.0),
            ("2024-04-03T12:00:00Z", 30.0),
        ] {
            service
                .record_donation(RecordDonationCommand {
                    donor_id: "donor-1".to_string(),
                    amount,
                    school_id: None,
                    date: Some(date.to_string()),
                })
                .expect("Failed to record donation");
        }

        let listed = service
            .list_donations(DonationListQuery {
                donor_id: "donor-1".to_string(),
                limit: Some(2),
            })
            .unwrap();

        assert_eq!(listed.donations.len(), 2);
        assert_eq!(listed.donations[0].amount, 30.0);
        assert_eq!(listed.donations[1].amount, 20.0);
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        let (service, _env) = create_test_service();

        let result = service.record_donation(RecordDonationCommand {
            donor_id: "donor-1".to_string(),
            amount: 0.0,
            school_id: None,
            date: None,
        });

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("must be positive"));
    }

    #[test]
    fn test_rejects_empty_donor_id() {
        let (service, _env) = create_test_service();

        let result = service.record_donation(RecordDonationCommand {
            donor_id: "   ".to_string(),
            amount: 5.0,
            school_id: None,
            date: None,
        });

        assert!(result.is_err());
    }

    #[test]
    fn test_blank_school_id_is_stored_as_none() {
        let (service, _env) = create_test_service();

        let result = service
            .record_donation(RecordDonationCommand {
                donor_id: "donor-1".to_string(),
                amount: 5.0,
                school_id: Some("  ".to_string()),
                date: None,
            })
            .unwrap();

        assert_eq!(result.donation.school_id, None);
    }
}
