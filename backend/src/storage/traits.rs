//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;

use crate::domain::models::achievement::Achievement;
use crate::domain::models::badge::BadgeRule;
use crate::domain::models::donation::Donation;

/// Trait defining the interface for donation storage operations
///
/// This trait abstracts away the specific storage implementation details,
/// allowing the domain layer to work with different storage backends
/// (SQL databases, CSV files, in-memory fakes) without modification.
pub trait DonationStorage: Send + Sync {
    /// Store a new donation
    fn store_donation(&self, donation: &Donation) -> Result<()>;

    /// Retrieve a specific donation by ID
    fn get_donation(&self, donor_id: &str, donation_id: &str) -> Result<Option<Donation>>;

    /// List all donations for one donor in chronological order (oldest first)
    ///
    /// The badge evaluator does not depend on this ordering - it recomputes
    /// everything from the full set - but callers displaying history do.
    fn list_donations(&self, donor_id: &str) -> Result<Vec<Donation>>;

    /// Count all donations for one donor
    fn count_donations(&self, donor_id: &str) -> Result<u32>;
}

/// Trait defining the interface for badge rule catalog operations
pub trait BadgeRuleStorage: Send + Sync {
    /// Return the full badge catalog, order as stored
    fn list_badge_rules(&self) -> Result<Vec<BadgeRule>>;

    /// Store a badge rule, replacing any existing rule with the same ID
    fn store_badge_rule(&self, rule: &BadgeRule) -> Result<()>;
}

/// Trait defining the interface for achievement storage operations
pub trait AchievementStorage: Send + Sync {
    /// Store a batch of achievements with insert-if-absent semantics keyed on
    /// (donor_id, badge_id): pairs already present are left untouched,
    /// keeping their original achieved_at, and never cause an error. A
    /// failure of the batch surfaces as a single error.
    fn store_achievements(&self, donor_id: &str, achievements: &[Achievement]) -> Result<()>;

    /// List all achievements for one donor
    fn list_achievements(&self, donor_id: &str) -> Result<Vec<Achievement>>;

    /// Check whether a donor already holds a specific badge
    fn has_achievement(&self, donor_id: &str, badge_id: &str) -> Result<bool>;
}
