//! # Donation Tracker Backend
//!
//! Gamification core for the donation tracker: recording donations and
//! evaluating badge achievement rules against a donor's history. The domain
//! layer is synchronous and storage-agnostic; the bundled storage backend
//! keeps per-donor CSV files plus a global badge rule catalog.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

pub mod domain;
pub mod storage;

// Re-export commonly used types
pub use storage::csv::CsvConnection;

use storage::csv::{AchievementRepository, BadgeRuleRepository, DonationRepository};

/// Main backend struct that orchestrates all services
pub struct Backend {
    pub donation_service: domain::DonationService,
    pub badge_service: domain::BadgeService,
}

impl Backend {
    /// Create a new backend instance with all services over one data directory
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let csv_conn = Arc::new(CsvConnection::new(data_dir)?);

        let donation_service = domain::DonationService::new(csv_conn.clone());
        let badge_service = domain::BadgeService::new(
            Arc::new(BadgeRuleRepository::new((*csv_conn).clone())),
            Arc::new(DonationRepository::new((*csv_conn).clone())),
            Arc::new(AchievementRepository::new((*csv_conn).clone())),
        );

        Ok(Backend {
            donation_service,
            badge_service,
        })
    }
}
