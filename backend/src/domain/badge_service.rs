//! Badge evaluation domain logic for the donation tracker.
//!
//! This module contains the core business logic for gamification badges:
//! computing a donor's derived metrics from their full donation history,
//! deciding which badge rules those metrics satisfy, and recording the
//! resulting achievements.
//!
//! ## Key Responsibilities
//!
//! - **Metrics Computation**: Donation count, distinct schools, longest
//!   consecutive-day streak, and total amount, derived from the full history
//! - **Rule Evaluation**: Dispatching each catalog rule against the metrics
//! - **Achievement Recording**: Persisting newly satisfied badges exactly once
//!
//! ## Business Rules
//!
//! - Metrics are a pure function of the donation history; input order never
//!   matters and nothing derived is persisted
//! - Streaks count consecutive UTC calendar days, not the donor's local time
//! - Threshold comparisons are inclusive: reaching the threshold exactly earns
//!   the badge
//! - A rule with a missing or non-finite threshold, or an unrecognized rule
//!   type, is inert - it never fires and never fails the run
//! - An achievement is recorded at most once per (donor, badge) pair; repeat
//!   evaluations keep the original achieved_at

use anyhow::Result;
use chrono::{Datelike, Utc};
use log::{debug, info};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use crate::domain::commands::badges::{
    EvaluateBadgesCommand, EvaluateBadgesResult, GetAchievementsCommand, GetAchievementsResult,
};
use crate::domain::models::achievement::Achievement;
use crate::domain::models::badge::{BadgeRule, RuleType};
use crate::domain::models::donation::Donation;
use crate::storage::{AchievementStorage, BadgeRuleStorage, DonationStorage};
use shared::DonorMetrics;

/// Compute a donor's derived metrics from their full donation history.
///
/// Pure and deterministic: shuffling the input list changes nothing.
pub fn compute_metrics(donations: &[Donation]) -> DonorMetrics {
    let distinct_schools = donations
        .iter()
        .filter_map(|d| d.school_id.as_deref())
        .collect::<HashSet<_>>()
        .len() as u32;

    let total_amount = donations.iter().map(|d| d.amount).sum();

    DonorMetrics {
        donation_count: donations.len() as u32,
        distinct_schools,
        best_streak_days: best_streak_days(donations),
        total_amount,
    }
}

/// Length of the longest run of consecutive UTC calendar days on which at
/// least one donation occurred. Multiple donations on one day collapse to a
/// single day; zero donations yield a streak of 0.
fn best_streak_days(donations: &[Donation]) -> u32 {
    // One entry per UTC calendar day, as an integer day index. BTreeSet both
    // dedupes same-day donations and yields the days in ascending order.
    let days: BTreeSet<i32> = donations
        .iter()
        .map(|d| d.created_at.date_naive().num_days_from_ce())
        .collect();

    let mut best = 0u32;
    let mut current = 0u32;
    let mut previous: Option<i32> = None;

    for day in days {
        current = match previous {
            Some(p) if day == p + 1 => current + 1,
            _ => 1,
        };
        best = best.max(current);
        previous = Some(day);
    }

    best
}

/// Return the ids of the badges whose rule the metrics satisfy, in catalog
/// order. All comparisons are inclusive (`>=`).
pub fn evaluate_rules(metrics: &DonorMetrics, rules: &[BadgeRule]) -> Vec<String> {
    let mut satisfied = Vec::new();

    for rule in rules {
        let threshold = match rule.threshold() {
            Some(t) => t,
            None => {
                // Catalogs may intentionally park rules without a threshold.
                debug!("Badge rule {} has no usable threshold, skipping", rule.id);
                continue;
            }
        };

        let earned = match rule.rule_type {
            RuleType::DonationCount => f64::from(metrics.donation_count) >= threshold,
            RuleType::DistinctSchools => f64::from(metrics.distinct_schools) >= threshold,
            RuleType::StreakDays => f64::from(metrics.best_streak_days) >= threshold,
            RuleType::TotalAmount => metrics.total_amount >= threshold,
            // Rule types this build does not know about never fire.
            RuleType::Unknown => false,
        };

        if earned {
            satisfied.push(rule.id.clone());
        }
    }

    satisfied
}

/// Service for evaluating badge rules and recording achievements.
///
/// The storage collaborators are injected so the service can run against the
/// CSV repositories in production and in-memory fakes in tests.
#[derive(Clone)]
pub struct BadgeService {
    badge_rule_repository: Arc<dyn BadgeRuleStorage>,
    donation_repository: Arc<dyn DonationStorage>,
    achievement_repository: Arc<dyn AchievementStorage>,
}

impl BadgeService {
    /// Create a new BadgeService over the given storage collaborators
    pub fn new(
        badge_rule_repository: Arc<dyn BadgeRuleStorage>,
        donation_repository: Arc<dyn DonationStorage>,
        achievement_repository: Arc<dyn AchievementStorage>,
    ) -> Self {
        Self {
            badge_rule_repository,
            donation_repository,
            achievement_repository,
        }
    }

    /// Run a full badge evaluation for one donor: load the rule catalog and
    /// the donor's donations, compute metrics, evaluate every rule, and
    /// persist the satisfied badges with a single evaluation timestamp.
    ///
    /// Failing to load rules or donations, or to persist achievements, is
    /// fatal to the run and propagates as an error. Malformed rules are not:
    /// they are skipped and the rest of the catalog still evaluates.
    pub fn evaluate_badges(&self, command: EvaluateBadgesCommand) -> Result<EvaluateBadgesResult> {
        info!("Evaluating badges for donor: {}", command.donor_id);

        let rules = self.badge_rule_repository.list_badge_rules()?;
        let donations = self.donation_repository.list_donations(&command.donor_id)?;

        let metrics = compute_metrics(&donations);
        debug!(
            "Metrics for donor {}: {} donation(s), {} school(s), {} day streak, ${:.2} total",
            command.donor_id,
            metrics.donation_count,
            metrics.distinct_schools,
            metrics.best_streak_days,
            metrics.total_amount
        );

        let awarded_badge_ids = evaluate_rules(&metrics, &rules);
        let evaluated_at = Utc::now();

        let achievements: Vec<Achievement> = awarded_badge_ids
            .iter()
            .map(|badge_id| Achievement {
                donor_id: command.donor_id.clone(),
                badge_id: badge_id.clone(),
                achieved_at: evaluated_at,
            })
            .collect();

        self.achievement_repository
            .store_achievements(&command.donor_id, &achievements)?;

        info!(
            "Donor {} satisfies {} of {} badge rule(s)",
            command.donor_id,
            awarded_badge_ids.len(),
            rules.len()
        );

        Ok(EvaluateBadgesResult {
            awarded_badge_ids,
            metrics,
            evaluated_at,
        })
    }

    /// Get a donor's recorded achievements, most recent first
    pub fn get_achievements(&self, command: GetAchievementsCommand) -> Result<GetAchievementsResult> {
        let mut achievements = self
            .achievement_repository
            .list_achievements(&command.donor_id)?;
        achievements.sort_by(|a, b| b.achieved_at.cmp(&a.achieved_at));
        Ok(GetAchievementsResult { achievements })
    }

    /// Get the full badge rule catalog (for admin and dashboard screens)
    pub fn list_badge_rules(&self) -> Result<Vec<BadgeRule>> {
        self.badge_rule_repository.list_badge_rules()
    }
}
