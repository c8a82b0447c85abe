//! # CSV Storage Module
//!
//! This module provides a CSV-based storage implementation for the donation
//! tracker. The domain logic is completely storage-agnostic; this backend
//! keeps per-donor files plus one global badge catalog file.
//!
//! ## File Structure
//!
//! ```text
//! data/
//! ├── badge_rules.csv
//! └── {donor_id}/
//!     ├── donations.csv
//!     └── achievements.csv
//! ```
//!
//! ## Features
//!
//! - Per-donor CSV files for donations and achievements
//! - Whole-file read/modify/write with a header row
//! - Compatible with the same storage traits as any database implementation

pub mod achievement_repository;
pub mod badge_rule_repository;
pub mod connection;
pub mod donation_repository;

#[cfg(test)]
pub mod test_utils;

pub use achievement_repository::AchievementRepository;
pub use badge_rule_repository::BadgeRuleRepository;
pub use connection::CsvConnection;
pub use donation_repository::DonationRepository;
