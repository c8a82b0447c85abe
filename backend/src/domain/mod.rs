//! # Domain Module
//!
//! Contains all business logic for the donation tracker gamification core.
//!
//! This module encapsulates the rules that define how donations are recorded
//! and how badge achievements are earned. It operates independently of any
//! specific UI framework or storage mechanism.
//!
//! ## Module Organization
//!
//! - **donation_service**: Recording and listing donations
//! - **badge_service**: Metrics computation, rule evaluation, achievement recording
//! - **commands**: Internal command/query/result types used by the services
//! - **models**: Domain entities (donations, badge rules, achievements)
//!
//! ## Core Concepts
//!
//! - **Donation**: A single gift from a donor, optionally directed at a school
//! - **Badge Rule**: A machine-checkable condition over a donor's metrics
//! - **Donor Metrics**: Counts, totals, and the consecutive-day streak derived
//!   from the full donation history on every evaluation
//! - **Achievement**: The one-time record that a donor earned a badge
//!
//! ## Design Principles
//!
//! - **Pure evaluation**: Metrics and rule decisions are deterministic
//!   functions of their inputs, so evaluation runs are order-independent and
//!   safe to repeat
//! - **Storage Agnostic**: Services depend on the storage traits, not on any
//!   particular backend
//! - **Configuration Tolerance**: Malformed or unrecognized badge rules can
//!   never fail an evaluation run

pub mod badge_service;
pub mod commands;
pub mod donation_service;
pub mod models;

pub use badge_service::*;
pub use donation_service::*;
